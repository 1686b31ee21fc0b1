//! Applying and reversing moves.
//!
//! `apply` validates a move against the legal move list and then performs
//! the transition atomically; on rejection the position is untouched. The
//! Zobrist hash is maintained incrementally through every transition and
//! always equals a from-scratch `compute_hash`.

use crate::zobrist::ZOBRIST;

use super::error::IllegalMoveError;
use super::types::{Color, Move, MoveKind, Piece, Square};
use super::{Position, UndoRecord};

impl Position {
    /// Apply a legal move, returning the record needed to reverse it.
    ///
    /// The move must be one produced by [`legal_moves`](Self::legal_moves)
    /// or [`parse_move`](Self::parse_move) for this exact position; any
    /// other move is rejected and the position is left unchanged.
    pub fn apply(&mut self, mv: Move) -> Result<UndoRecord, IllegalMoveError> {
        if !self.legal_moves().contains(mv) {
            #[cfg(feature = "logging")]
            log::debug!("rejected illegal move {mv}");
            return Err(IllegalMoveError {
                notation: mv.to_string(),
            });
        }
        Ok(self.make(mv))
    }

    /// Perform the transition without legality checks.
    ///
    /// Callers must pass a move generated for this position; `perft` and
    /// the test suite use this directly after generation.
    pub(crate) fn make(&mut self, mv: Move) -> UndoRecord {
        let us = self.side_to_move();
        let them = us.opponent();
        let c_idx = us.index();

        let previous_hash = self.hash;
        let previous_en_passant_target = self.en_passant_target;
        let previous_castling = self.castling;
        let previous_halfmove_clock = self.halfmove_clock;
        let previous_fullmove_number = self.fullmove_number;

        let mut hash = self.hash ^ ZOBRIST.black_to_move_key;
        if let Some(old_ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_keys[old_ep.1];
        }

        // Remove the captured piece
        let mut captured: Option<(Color, Piece)> = None;
        match mv.kind() {
            MoveKind::EnPassant => {
                let captured_sq = Square(mv.from().0, mv.to().1);
                self.remove_piece(captured_sq, them, Piece::Pawn);
                hash ^= ZOBRIST.piece_keys[Piece::Pawn.index()][them.index()]
                    [captured_sq.as_index()];
                captured = Some((them, Piece::Pawn));
            }
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {}
            _ => {
                if let Some(captured_piece) = mv.captured() {
                    self.remove_piece(mv.to(), them, captured_piece);
                    hash ^= ZOBRIST.piece_keys[captured_piece.index()][them.index()]
                        [mv.to().as_index()];
                    captured = Some((them, captured_piece));
                }
            }
        }

        // Relocate the moving piece, promoting if needed
        self.remove_piece(mv.from(), us, mv.piece());
        hash ^= ZOBRIST.piece_keys[mv.piece().index()][c_idx][mv.from().as_index()];
        let placed = mv.promotion().unwrap_or(mv.piece());
        self.set_piece(mv.to(), us, placed);
        hash ^= ZOBRIST.piece_keys[placed.index()][c_idx][mv.to().as_index()];

        // Castling also relocates the rook
        if mv.is_castling() {
            let rank = mv.to().0;
            let (rook_from_file, rook_to_file) = if mv.to().1 == 6 { (7, 5) } else { (0, 3) };
            let rook_from = Square(rank, rook_from_file);
            let rook_to = Square(rank, rook_to_file);
            self.remove_piece(rook_from, us, Piece::Rook);
            self.set_piece(rook_to, us, Piece::Rook);
            hash ^= ZOBRIST.piece_keys[Piece::Rook.index()][c_idx][rook_from.as_index()];
            hash ^= ZOBRIST.piece_keys[Piece::Rook.index()][c_idx][rook_to.as_index()];
        }

        // New en passant target only after a double push
        self.en_passant_target = None;
        if mv.is_double_pawn_push() {
            let ep_sq = Square((mv.from().0 + mv.to().0) / 2, mv.from().1);
            self.en_passant_target = Some(ep_sq);
            hash ^= ZOBRIST.en_passant_keys[ep_sq.1];
        }

        if mv.piece() == Piece::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        hash ^= self.revoke_castling_rights(mv, us, captured);

        self.white_to_move = !self.white_to_move;
        self.hash = hash;

        let made_hash = hash;
        let previous_repetition_count = self.repetitions.get(made_hash);
        self.repetitions.increment(made_hash);

        UndoRecord {
            captured,
            previous_en_passant_target,
            previous_castling,
            previous_halfmove_clock,
            previous_fullmove_number,
            previous_hash,
            made_hash,
            previous_repetition_count,
        }
    }

    /// Rights lost by this move: king moves, rook moves off a home square,
    /// rook captured on a home square. Returns the hash delta.
    fn revoke_castling_rights(
        &mut self,
        mv: Move,
        us: Color,
        captured: Option<(Color, Piece)>,
    ) -> u64 {
        let mut diff = 0u64;

        if mv.piece() == Piece::King {
            if self.castling.has(us, true) {
                diff ^= ZOBRIST.castling_keys[us.index()][0];
                self.castling.remove(us, true);
            }
            if self.castling.has(us, false) {
                diff ^= ZOBRIST.castling_keys[us.index()][1];
                self.castling.remove(us, false);
            }
        } else if mv.piece() == Piece::Rook {
            let back = us.back_rank();
            if mv.from() == Square(back, 0) && self.castling.has(us, false) {
                diff ^= ZOBRIST.castling_keys[us.index()][1];
                self.castling.remove(us, false);
            } else if mv.from() == Square(back, 7) && self.castling.has(us, true) {
                diff ^= ZOBRIST.castling_keys[us.index()][0];
                self.castling.remove(us, true);
            }
        }

        if let Some((cap_color, Piece::Rook)) = captured {
            let back = cap_color.back_rank();
            if mv.to() == Square(back, 0) && self.castling.has(cap_color, false) {
                diff ^= ZOBRIST.castling_keys[cap_color.index()][1];
                self.castling.remove(cap_color, false);
            } else if mv.to() == Square(back, 7) && self.castling.has(cap_color, true) {
                diff ^= ZOBRIST.castling_keys[cap_color.index()][0];
                self.castling.remove(cap_color, true);
            }
        }

        diff
    }

    /// Reverse a move made by [`apply`](Self::apply).
    ///
    /// `record` must be the one returned when `mv` was applied, and moves
    /// must be undone in reverse order.
    pub fn undo(&mut self, mv: Move, record: UndoRecord) {
        self.repetitions
            .set(record.made_hash, record.previous_repetition_count);

        self.white_to_move = !self.white_to_move;
        self.en_passant_target = record.previous_en_passant_target;
        self.castling = record.previous_castling;
        self.hash = record.previous_hash;
        self.halfmove_clock = record.previous_halfmove_clock;
        self.fullmove_number = record.previous_fullmove_number;

        let us = self.side_to_move();
        let placed = mv.promotion().unwrap_or(mv.piece());
        self.remove_piece(mv.to(), us, placed);
        self.set_piece(mv.from(), us, mv.piece());

        match mv.kind() {
            MoveKind::CastleKingside | MoveKind::CastleQueenside => {
                let rank = mv.to().0;
                let (rook_home_file, rook_moved_file) =
                    if mv.to().1 == 6 { (7, 5) } else { (0, 3) };
                self.remove_piece(Square(rank, rook_moved_file), us, Piece::Rook);
                self.set_piece(Square(rank, rook_home_file), us, Piece::Rook);
            }
            MoveKind::EnPassant => {
                if let Some((cap_color, cap_piece)) = record.captured {
                    self.set_piece(Square(mv.from().0, mv.to().1), cap_color, cap_piece);
                }
            }
            _ => {
                if let Some((cap_color, cap_piece)) = record.captured {
                    self.set_piece(mv.to(), cap_color, cap_piece);
                }
            }
        }
    }

    /// Recompute the Zobrist hash from scratch.
    ///
    /// The incremental hash must always equal this; tests lean on that.
    pub(crate) fn compute_hash(&self) -> u64 {
        let mut hash: u64 = 0;

        for rank in 0..8 {
            for file in 0..8 {
                let sq = Square(rank, file);
                if let Some((color, piece)) = self.piece_at(sq) {
                    hash ^= ZOBRIST.piece_keys[piece.index()][color.index()][sq.as_index()];
                }
            }
        }

        if !self.white_to_move {
            hash ^= ZOBRIST.black_to_move_key;
        }

        for color in Color::BOTH {
            if self.castling.has(color, true) {
                hash ^= ZOBRIST.castling_keys[color.index()][0];
            }
            if self.castling.has(color, false) {
                hash ^= ZOBRIST.castling_keys[color.index()][1];
            }
        }

        if let Some(ep_square) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant_keys[ep_square.1];
        }

        hash
    }
}
