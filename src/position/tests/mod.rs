//! Integration-style tests exercising the full position API.

mod edge_cases;
mod perft;

use super::types::Move;
use super::Position;

/// Find the legal move with the given UCI notation, panicking if absent.
pub(crate) fn find_move(position: &Position, uci: &str) -> Move {
    position
        .legal_moves()
        .iter()
        .copied()
        .find(|mv| mv.to_string() == uci)
        .unwrap_or_else(|| panic!("move {uci} not legal in {}", position.to_fen()))
}
