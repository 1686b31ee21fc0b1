//! Legal move generation.
//!
//! Generates strictly legal moves in a single pass, without probing moves
//! by make/unmake. Checkers and pinned pieces are computed up front; under
//! a single check non-king moves are restricted to capturing the checker
//! or blocking its ray, under double check only the king may move. King
//! destinations are validated against attack maps computed with the king
//! removed from the occupancy, so stepping along a checking ray is caught.
//! En passant legality is decided by simulating the resulting occupancy,
//! which covers both pins and the horizontal two-pawn discovery.
//!
//! The returned list is sorted into a canonical order (source square,
//! destination square, promotion piece), so repeated calls on equal
//! positions produce byte-for-byte identical output.

use super::attack_tables::{
    bishop_attacks, queen_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS,
};
use super::masks::{BETWEEN, LINE};
use super::types::{Bitboard, Color, Move, MoveList, Piece, Square, PROMOTION_PIECES};
use super::Position;

impl Position {
    /// Generate all legal moves for the side to move.
    ///
    /// The result is deterministic: equal positions produce identical
    /// lists in identical order.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let us = self.side_to_move();
        let them = us.opponent();
        let king_sq = self.king_square(us);
        let king_idx = king_sq.as_index();
        let occ = self.all_occupied.0;
        let own = self.occupied[us.index()].0;

        let mut moves = MoveList::new();
        let checkers = self.attackers_to(king_sq, them, occ);

        self.gen_king_moves(&mut moves, king_sq, us, them);

        if checkers.popcount() < 2 {
            // Where non-king moves may land: anywhere outside check, or on
            // the checker / its blocking ray under a single check.
            let (capture_mask, push_mask) = if checkers.is_empty() {
                (!0u64, !0u64)
            } else {
                let checker_idx = checkers.0.trailing_zeros() as usize;
                (checkers.0, BETWEEN[king_idx][checker_idx])
            };
            let allowed = capture_mask | push_mask;
            let pinned = self.pinned_pieces(us, king_idx);

            // A pinned knight can never move
            let knights =
                Bitboard(self.pieces[us.index()][Piece::Knight.index()].0 & !pinned.0);
            for from_idx in knights.iter() {
                let from = Square::from_idx(from_idx);
                let targets = KNIGHT_ATTACKS[from_idx.as_usize()] & !own & allowed;
                self.push_piece_moves(&mut moves, from, Piece::Knight, targets);
            }

            for piece in [Piece::Bishop, Piece::Rook, Piece::Queen] {
                let sliders = self.pieces[us.index()][piece.index()];
                for from_idx in sliders.iter() {
                    let from = Square::from_idx(from_idx);
                    let idx = from_idx.as_usize();
                    let mut targets = match piece {
                        Piece::Bishop => bishop_attacks(idx, occ),
                        Piece::Rook => rook_attacks(idx, occ),
                        _ => queen_attacks(idx, occ),
                    } & !own
                        & allowed;
                    if pinned.0 & (1u64 << idx) != 0 {
                        targets &= LINE[king_idx][idx];
                    }
                    self.push_piece_moves(&mut moves, from, piece, targets);
                }
            }

            let pawns = self.pieces[us.index()][Piece::Pawn.index()];
            for from_idx in pawns.iter() {
                let from = Square::from_idx(from_idx);
                let pin_ray = if pinned.0 & (1u64 << from_idx.as_usize()) != 0 {
                    LINE[king_idx][from_idx.as_usize()]
                } else {
                    !0u64
                };
                self.gen_pawn_moves(&mut moves, from, us, capture_mask, push_mask, pin_ray);
            }

            if checkers.is_empty() {
                self.gen_castling(&mut moves, king_sq, us, them);
            }
        }

        moves.sort_canonical();
        moves
    }

    /// All pieces of `by` attacking `sq`, with sliders evaluated against
    /// the given occupancy
    fn attackers_to(&self, sq: Square, by: Color, occ: u64) -> Bitboard {
        let idx = sq.as_index();
        let pieces = &self.pieces[by.index()];
        // A pawn of `by` attacks sq exactly when a pawn of the other color
        // standing on sq would attack the pawn's square
        let mut attackers =
            PAWN_ATTACKS[by.opponent().index()][idx] & pieces[Piece::Pawn.index()].0;
        attackers |= KNIGHT_ATTACKS[idx] & pieces[Piece::Knight.index()].0;
        attackers |= KING_ATTACKS[idx] & pieces[Piece::King.index()].0;

        let queens = pieces[Piece::Queen.index()].0;
        attackers |= rook_attacks(idx, occ) & (pieces[Piece::Rook.index()].0 | queens);
        attackers |= bishop_attacks(idx, occ) & (pieces[Piece::Bishop.index()].0 | queens);
        Bitboard(attackers)
    }

    /// Own pieces pinned against the king by an enemy slider
    fn pinned_pieces(&self, us: Color, king_idx: usize) -> Bitboard {
        let them = us.opponent();
        let enemy = &self.pieces[them.index()];
        let queens = enemy[Piece::Queen.index()].0;
        let enemy_occ = self.occupied[them.index()].0;
        let own = self.occupied[us.index()].0;

        // First enemy slider on each ray, looking through our pieces
        let snipers = (rook_attacks(king_idx, enemy_occ)
            & (enemy[Piece::Rook.index()].0 | queens))
            | (bishop_attacks(king_idx, enemy_occ)
                & (enemy[Piece::Bishop.index()].0 | queens));

        let mut pinned = 0u64;
        for sniper_idx in Bitboard(snipers).iter() {
            let blockers = BETWEEN[king_idx][sniper_idx.as_usize()] & self.all_occupied.0;
            if blockers.count_ones() == 1 && blockers & own != 0 {
                pinned |= blockers;
            }
        }
        Bitboard(pinned)
    }

    fn push_piece_moves(&self, moves: &mut MoveList, from: Square, piece: Piece, targets: u64) {
        for to_idx in Bitboard(targets).iter() {
            let to = Square::from_idx(to_idx);
            let mv = match self.piece_on(to) {
                Some(captured) => Move::capture(from, to, piece, captured),
                None => Move::quiet(from, to, piece),
            };
            moves.push(mv);
        }
    }

    fn gen_king_moves(&self, moves: &mut MoveList, king_sq: Square, us: Color, them: Color) {
        let king_idx = king_sq.as_index();
        let own = self.occupied[us.index()].0;
        // The king must be lifted off the board while testing destinations,
        // or a slider's ray would appear to stop on it
        let occ_without_king = self.all_occupied.0 ^ (1u64 << king_idx);

        let targets = Bitboard(KING_ATTACKS[king_idx] & !own);
        for to_idx in targets.iter() {
            let to = Square::from_idx(to_idx);
            if self.attackers_to(to, them, occ_without_king).is_empty() {
                let mv = match self.piece_on(to) {
                    Some(captured) => Move::capture(king_sq, to, Piece::King, captured),
                    None => Move::quiet(king_sq, to, Piece::King),
                };
                moves.push(mv);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn gen_pawn_moves(
        &self,
        moves: &mut MoveList,
        from: Square,
        us: Color,
        capture_mask: u64,
        push_mask: u64,
        pin_ray: u64,
    ) {
        let dir = us.pawn_direction();
        let promotion_rank = us.pawn_promotion_rank();
        let forward_rank = (from.0 as isize + dir) as usize;

        // Pushes
        let one = Square(forward_rank, from.1);
        if self.is_empty(one) {
            if (1u64 << one.as_index()) & push_mask & pin_ray != 0 {
                if forward_rank == promotion_rank {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::promote(from, one, promo, None));
                    }
                } else {
                    moves.push(Move::quiet(from, one, Piece::Pawn));
                }
            }
            if from.0 == us.pawn_start_rank() {
                let two = Square((from.0 as isize + 2 * dir) as usize, from.1);
                if self.is_empty(two) && (1u64 << two.as_index()) & push_mask & pin_ray != 0 {
                    moves.push(Move::double_pawn_push(from, two));
                }
            }
        }

        // Captures, including en passant
        let attacks = Bitboard(PAWN_ATTACKS[us.index()][from.as_index()]);
        for to_idx in attacks.iter() {
            let to = Square::from_idx(to_idx);
            let to_bit = 1u64 << to.as_index();
            if let Some((color, captured)) = self.piece_at(to) {
                if color != us && to_bit & capture_mask & pin_ray != 0 {
                    if to.0 == promotion_rank {
                        for promo in PROMOTION_PIECES {
                            moves.push(Move::promote(from, to, promo, Some(captured)));
                        }
                    } else {
                        moves.push(Move::capture(from, to, Piece::Pawn, captured));
                    }
                }
            } else if Some(to) == self.en_passant_target {
                // Under check, en passant must either capture the checking
                // pawn or land on the blocking ray
                let captured_sq = Square(from.0, to.1);
                let evades = (1u64 << captured_sq.as_index()) & capture_mask != 0
                    || to_bit & push_mask != 0;
                if evades && self.en_passant_is_legal(from, to, us) {
                    moves.push(Move::en_passant(from, to));
                }
            }
        }
    }

    /// Simulate the en passant capture and verify no slider then sees the
    /// king. Removing two pawns from one rank at once can open a rook ray
    /// that ordinary pin detection never sees.
    fn en_passant_is_legal(&self, from: Square, to: Square, us: Color) -> bool {
        let them = us.opponent();
        let captured_sq = Square(from.0, to.1);
        let king_idx = self.king_square(us).as_index();
        let occ = (self.all_occupied.0
            ^ (1u64 << from.as_index())
            ^ (1u64 << captured_sq.as_index()))
            | (1u64 << to.as_index());

        let enemy = &self.pieces[them.index()];
        let queens = enemy[Piece::Queen.index()].0;
        rook_attacks(king_idx, occ) & (enemy[Piece::Rook.index()].0 | queens) == 0
            && bishop_attacks(king_idx, occ) & (enemy[Piece::Bishop.index()].0 | queens) == 0
    }

    fn gen_castling(&self, moves: &mut MoveList, king_sq: Square, us: Color, them: Color) {
        let back = us.back_rank();
        if king_sq != Square(back, 4) {
            return;
        }

        if self.castling.has(us, true)
            && self.is_empty(Square(back, 5))
            && self.is_empty(Square(back, 6))
            && self.piece_at(Square(back, 7)) == Some((us, Piece::Rook))
            && !self.is_square_attacked(Square(back, 5), them)
            && !self.is_square_attacked(Square(back, 6), them)
        {
            moves.push(Move::castle_kingside(king_sq, Square(back, 6)));
        }
        if self.castling.has(us, false)
            && self.is_empty(Square(back, 1))
            && self.is_empty(Square(back, 2))
            && self.is_empty(Square(back, 3))
            && self.piece_at(Square(back, 0)) == Some((us, Piece::Rook))
            && !self.is_square_attacked(Square(back, 3), them)
            && !self.is_square_attacked(Square(back, 2), them)
        {
            moves.push(Move::castle_queenside(king_sq, Square(back, 2)));
        }
    }

    pub(crate) fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        !self.attackers_to(sq, by, self.all_occupied.0).is_empty()
    }

    pub(crate) fn in_check(&self, color: Color) -> bool {
        self.is_square_attacked(self.king_square(color), color.opponent())
    }

    /// True when the side to move is in check
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        self.in_check(self.side_to_move())
    }

    /// True when the side to move is checkmated
    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    /// True when the side to move has no legal move but is not in check
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to the given depth.
    ///
    /// The standard oracle for move generator correctness.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in moves.iter() {
            let record = self.make(mv);
            nodes += self.perft(depth - 1);
            self.undo(mv, record);
        }

        nodes
    }
}
