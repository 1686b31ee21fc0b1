//! Draw availability tracking.
//!
//! The position reports which draw conditions currently hold; it never
//! terminates play on its own. Threefold repetition and the fifty-move
//! rule are claims a player may make, and callers (game drivers, training
//! pipelines) decide whether to honor them.

use std::collections::HashMap;

use super::types::{Bitboard, Color, Piece};
use super::Position;

/// Occurrence counts of Zobrist hashes along the current line.
///
/// Carried inside [`Position`] and kept exact through apply/undo, so a
/// position reached, left, and reached again counts twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, hash: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&hash);
        } else {
            self.counts.insert(hash, count);
        }
    }

    pub(crate) fn increment(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }
}

/// Which draw conditions hold in the current position.
///
/// All flags are informational; none of them is ever applied to move
/// generation or game state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStatus {
    /// The current position has occurred at least three times.
    pub threefold_repetition: bool,
    /// At least fifty full moves passed without a capture or pawn move.
    pub fifty_move_rule: bool,
    /// Neither side can possibly deliver checkmate.
    pub insufficient_material: bool,
}

impl DrawStatus {
    /// True when any draw condition holds.
    #[must_use]
    pub fn any(self) -> bool {
        self.threefold_repetition || self.fifty_move_rule || self.insufficient_material
    }
}

impl Position {
    /// Report which draw conditions currently hold.
    #[must_use]
    pub fn draw_status(&self) -> DrawStatus {
        DrawStatus {
            threefold_repetition: self.repetitions.get(self.hash) >= 3,
            fifty_move_rule: self.halfmove_clock >= 100,
            insufficient_material: self.is_insufficient_material(),
        }
    }

    /// K vs K, K+minor vs K, and K+B vs K+B with same-colored bishops.
    fn is_insufficient_material(&self) -> bool {
        for color in Color::BOTH {
            let pieces = &self.pieces[color.index()];
            if !pieces[Piece::Pawn.index()].is_empty()
                || !pieces[Piece::Rook.index()].is_empty()
                || !pieces[Piece::Queen.index()].is_empty()
            {
                return false;
            }
        }

        let knights = self.pieces[0][Piece::Knight.index()].0 | self.pieces[1][Piece::Knight.index()].0;
        let bishops = self.pieces[0][Piece::Bishop.index()].0 | self.pieces[1][Piece::Bishop.index()].0;
        let minors = (knights | bishops).count_ones();

        match minors {
            0 | 1 => true,
            _ => {
                // Any number of bishops all on one square color cannot mate
                knights == 0
                    && (bishops & Bitboard::LIGHT_SQUARES.0 == 0
                        || bishops & Bitboard::DARK_SQUARES.0 == 0)
            }
        }
    }
}
