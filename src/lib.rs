//! A chess rules engine built for machine learning data pipelines.
//!
//! The crate centers on [`Position`]: strictly legal move generation,
//! reversible make/unmake with an incrementally maintained Zobrist hash,
//! exact FEN round-trips, draw availability reporting, and a fixed
//! tensor encoding of the position for network input.
//!
//! ```
//! use tensor_chess::Position;
//!
//! let mut position = Position::initial();
//! let moves = position.legal_moves();
//! assert_eq!(moves.len(), 20);
//!
//! let mv = position.parse_move("e2e4").unwrap();
//! let record = position.apply(mv).unwrap();
//! position.undo(mv, record);
//! assert_eq!(position, Position::initial());
//! ```

pub mod position;
mod zobrist;

pub use position::{
    Bitboard, BitboardIter, CastlingRights, Color, DrawStatus, Move, MoveKind, MoveList,
    MoveListIntoIter, Piece, Position, PositionTensor, Square, SquareIdx, UndoRecord,
    NUM_PLANES, PLANE_SIZE, TENSOR_LEN,
};
