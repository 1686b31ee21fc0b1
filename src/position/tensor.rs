//! Position to tensor encoding for machine learning pipelines.
//!
//! A position is encoded as 21 planes of 64 `f32` values each, always
//! from White's absolute perspective (plane index 0 is square a1 whoever
//! is to move). The encoding is a pure function of the position: equal
//! positions, including their repetition history, produce identical
//! tensors.
//!
//! Plane layout:
//!
//! | Planes | Contents                                         |
//! |--------|--------------------------------------------------|
//! | 0-5    | White pawn, knight, bishop, rook, queen, king    |
//! | 6-11   | Black pawn, knight, bishop, rook, queen, king    |
//! | 12     | Side to move (all ones when White)               |
//! | 13-16  | Castling rights: WK, WQ, BK, BQ (constant planes)|
//! | 17     | En passant target square                         |
//! | 18     | Halfmove clock, clamped to 100 and scaled        |
//! | 19     | Current position seen at least twice             |
//! | 20     | Current position seen at least three times       |

use super::types::{Color, Piece, Square};
use super::Position;

/// Number of encoded planes.
pub const NUM_PLANES: usize = 21;

/// Values per plane, one per square (a1 = 0, h8 = 63).
pub const PLANE_SIZE: usize = 64;

/// Total length of the flattened tensor.
pub const TENSOR_LEN: usize = NUM_PLANES * PLANE_SIZE;

/// Plane holding all ones when White is to move.
pub const SIDE_TO_MOVE_PLANE: usize = 12;
/// First of four castling-rights planes, ordered WK, WQ, BK, BQ.
pub const CASTLING_PLANE: usize = 13;
/// Plane marking the en passant target square.
pub const EN_PASSANT_PLANE: usize = 17;
/// Plane holding the scaled halfmove clock.
pub const HALFMOVE_PLANE: usize = 18;
/// Plane set when the current position has occurred at least twice.
pub const REPETITION_TWICE_PLANE: usize = 19;
/// Plane set when the current position has occurred at least three times.
pub const REPETITION_THRICE_PLANE: usize = 20;

/// A dense `21 x 8 x 8` encoding of a position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionTensor {
    data: Vec<f32>,
}

impl PositionTensor {
    /// The flattened tensor, plane-major then square index.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// One plane's 64 values.
    ///
    /// # Panics
    ///
    /// Panics if `plane >= NUM_PLANES`.
    #[must_use]
    pub fn plane(&self, plane: usize) -> &[f32] {
        assert!(plane < NUM_PLANES, "plane index {plane} out of range");
        &self.data[plane * PLANE_SIZE..(plane + 1) * PLANE_SIZE]
    }

    /// Shape as (planes, ranks, files).
    #[must_use]
    pub const fn shape(&self) -> (usize, usize, usize) {
        (NUM_PLANES, 8, 8)
    }

    fn fill_plane(&mut self, plane: usize, value: f32) {
        self.data[plane * PLANE_SIZE..(plane + 1) * PLANE_SIZE].fill(value);
    }

    fn set(&mut self, plane: usize, square: Square, value: f32) {
        self.data[plane * PLANE_SIZE + square.as_index()] = value;
    }
}

const fn piece_plane(color: Color, piece: Piece) -> usize {
    color.index() * 6 + piece.index()
}

impl Position {
    /// Encode the position as a tensor.
    ///
    /// Deterministic: equal positions with equal repetition counts yield
    /// byte-for-byte identical tensors.
    #[must_use]
    pub fn encode(&self) -> PositionTensor {
        let mut tensor = PositionTensor {
            data: vec![0.0; TENSOR_LEN],
        };

        for color in Color::BOTH {
            for piece in Piece::ALL {
                let plane = piece_plane(color, piece);
                for sq_idx in self.pieces[color.index()][piece.index()].iter() {
                    tensor.set(plane, Square::from_idx(sq_idx), 1.0);
                }
            }
        }

        if self.white_to_move {
            tensor.fill_plane(SIDE_TO_MOVE_PLANE, 1.0);
        }

        let rights = [
            self.castling.has(Color::White, true),
            self.castling.has(Color::White, false),
            self.castling.has(Color::Black, true),
            self.castling.has(Color::Black, false),
        ];
        for (i, &right) in rights.iter().enumerate() {
            if right {
                tensor.fill_plane(CASTLING_PLANE + i, 1.0);
            }
        }

        if let Some(ep_square) = self.en_passant_target {
            tensor.set(EN_PASSANT_PLANE, ep_square, 1.0);
        }

        let clock = self.halfmove_clock.min(100) as f32 / 100.0;
        tensor.fill_plane(HALFMOVE_PLANE, clock);

        let repetitions = self.repetition_count();
        if repetitions >= 2 {
            tensor.fill_plane(REPETITION_TWICE_PLANE, 1.0);
        }
        if repetitions >= 3 {
            tensor.fill_plane(REPETITION_THRICE_PLANE, 1.0);
        }

        tensor
    }
}
