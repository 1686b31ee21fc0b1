//! Chess position representation and rules.
//!
//! [`Position`] is a self-contained value type: cloning it yields a fully
//! independent position, and every mutation goes through the reversible
//! [`apply`](Position::apply)/[`undo`](Position::undo) pair. Move
//! generation is strictly legal and deterministic, FEN round-trips are
//! exact, and [`encode`](Position::encode) produces the fixed tensor
//! layout used by training pipelines.

mod attack_tables;
mod draw;
pub mod error;
mod fen;
mod make_unmake;
mod masks;
mod movegen;
mod state;
mod tensor;
mod types;

#[cfg(test)]
mod tests;

pub use draw::DrawStatus;
pub use state::{Position, UndoRecord};
pub use tensor::{
    PositionTensor, CASTLING_PLANE, EN_PASSANT_PLANE, HALFMOVE_PLANE, NUM_PLANES, PLANE_SIZE,
    REPETITION_THRICE_PLANE, REPETITION_TWICE_PLANE, SIDE_TO_MOVE_PLANE, TENSOR_LEN,
};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveKind, MoveList, MoveListIntoIter,
    Piece, Square, SquareIdx,
};
