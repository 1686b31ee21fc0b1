//! Position state: piece placement, side to move, and game counters.

use super::draw::RepetitionTable;
use super::types::{bit_for_square, Bitboard, CastlingRights, Color, Piece, Square};

/// Everything needed to reverse a move exactly.
///
/// Returned by [`Position::apply`](crate::Position::apply) and consumed by
/// [`Position::undo`](crate::Position::undo). Records must be unwound in
/// reverse order of the moves that produced them.
#[derive(Clone, Debug)]
pub struct UndoRecord {
    pub(crate) captured: Option<(Color, Piece)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling: CastlingRights,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
    pub(crate) previous_hash: u64,
    pub(crate) made_hash: u64,
    pub(crate) previous_repetition_count: u32,
}

/// A complete chess position.
///
/// Piece placement is held as one bitboard per (color, piece) pair, with
/// per-color and total occupancy aggregates kept consistent at all times.
/// The Zobrist hash is updated incrementally and the position carries its
/// own repetition table, so repetition-based draw availability survives
/// apply/undo cycles.
///
/// Positions are ordinary values: `Clone` produces a fully independent
/// copy that shares no state with the original, and `==` compares the
/// full state including counters and repetition history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) white_to_move: bool,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) castling: CastlingRights,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    pub(crate) repetitions: RepetitionTable,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn initial() -> Self {
        let mut position = Position::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            position.set_piece(Square(0, file), Color::White, *piece);
            position.set_piece(Square(7, file), Color::Black, *piece);
            position.set_piece(Square(1, file), Color::White, Piece::Pawn);
            position.set_piece(Square(6, file), Color::Black, Piece::Pawn);
        }

        position.castling = CastlingRights::all();
        position.white_to_move = true;
        position.hash = position.compute_hash();
        position.repetitions.set(position.hash, 1);
        position
    }

    pub(crate) fn empty() -> Self {
        Position {
            pieces: [[Bitboard(0); 6]; 2],
            occupied: [Bitboard(0); 2],
            all_occupied: Bitboard(0),
            white_to_move: true,
            en_passant_target: None,
            castling: CastlingRights::none(),
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            repetitions: RepetitionTable::new(),
        }
    }

    /// The Zobrist hash of this position
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// True when White is to move
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    /// The color to move
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Halfmoves since the last capture or pawn move
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Fullmove number, starting at 1 and incremented after Black moves
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The en passant target square, if the last move was a double pawn push
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Current castling rights
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// How many times this exact position has occurred, including now
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.get(self.hash)
    }

    /// The bitboard of one color's pieces of one type
    #[must_use]
    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// The bitboard of all squares occupied by a color
    #[must_use]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// The bitboard of all occupied squares
    #[must_use]
    pub fn occupancy_all(&self) -> Bitboard {
        self.all_occupied
    }

    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 |= bit;
        self.occupied[c_idx].0 |= bit;
        self.all_occupied.0 |= bit;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = bit_for_square(sq).0;
        let c_idx = color.index();
        self.pieces[c_idx][piece.index()].0 &= !bit;
        self.occupied[c_idx].0 &= !bit;
        self.all_occupied.0 &= !bit;
    }

    /// The piece and its color on a square, if any
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let bit = bit_for_square(sq).0;
        if self.all_occupied.0 & bit == 0 {
            return None;
        }

        let color = if self.occupied[0].0 & bit != 0 {
            Color::White
        } else {
            Color::Black
        };
        let c_idx = color.index();
        for piece in Piece::ALL {
            if self.pieces[c_idx][piece.index()].0 & bit != 0 {
                return Some((color, piece));
            }
        }

        None
    }

    /// Get just the piece type on a square (without color)
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.piece_at(sq).map(|(_, piece)| piece)
    }

    /// Get just the color of the piece on a square
    #[must_use]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|(color, _)| color)
    }

    pub(crate) fn is_empty(&self, sq: Square) -> bool {
        self.all_occupied.0 & bit_for_square(sq).0 == 0
    }

    /// The king square for a color.
    ///
    /// Positions built through this crate always contain both kings.
    pub(crate) fn king_square(&self, color: Color) -> Square {
        let bb = self.pieces[color.index()][Piece::King.index()];
        Square::from_index(bb.0.trailing_zeros() as usize)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::initial()
    }
}
