//! Attack tables for move generation.
//!
//! Sliding piece attacks (bishop, rook, queen) use Hyperbola Quintessence,
//! a branch-free `o^(o-2r)` computation over per-square ray masks. Rays
//! stop at and include the first blocker, whichever color it is; the
//! caller masks out friendly pieces. All tables are immutable singletons
//! built on first use.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates
#![allow(clippy::inline_always)] // Hot path functions

mod tables;

pub(crate) use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

use once_cell::sync::Lazy;

const FILE_A: u64 = 0x0101010101010101;

/// Diagonal masks for each square (a1-h8 direction)
static DIAGONAL_MASKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut masks = [0u64; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut mask = 0u64;
        let mut r = rank;
        let mut f = file;
        while r < 8 && f < 8 {
            mask |= 1u64 << (r * 8 + f);
            r += 1;
            f += 1;
        }
        r = rank - 1;
        f = file - 1;
        while r >= 0 && f >= 0 {
            mask |= 1u64 << (r * 8 + f);
            r -= 1;
            f -= 1;
        }
        masks[sq] = mask;
    }
    masks
});

/// Anti-diagonal masks for each square (a8-h1 direction)
static ANTI_DIAGONAL_MASKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut masks = [0u64; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as isize;
        let file = (sq % 8) as isize;
        let mut mask = 0u64;
        let mut r = rank;
        let mut f = file;
        while r < 8 && f >= 0 {
            mask |= 1u64 << (r * 8 + f);
            r += 1;
            f -= 1;
        }
        r = rank - 1;
        f = file + 1;
        while r >= 0 && f < 8 {
            mask |= 1u64 << (r * 8 + f);
            r -= 1;
            f += 1;
        }
        masks[sq] = mask;
    }
    masks
});

/// File masks for each square
static FILE_MASKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut masks = [0u64; 64];
    for sq in 0..64 {
        masks[sq] = FILE_A << (sq % 8);
    }
    masks
});

/// Rank attack lookup table indexed by `8 * occupancy_6bit + file`.
/// Occupancy covers the six inner files (b-g); edge files never block.
static RANK_ATTACKS: Lazy<[u64; 512]> = Lazy::new(|| {
    let mut attacks = [0u64; 512];
    for occ_6bit in 0..64 {
        for file in 0..8 {
            let mut attack = 0u64;
            for f in (file + 1)..8 {
                attack |= 1u64 << f;
                if (1..=6).contains(&f) && (occ_6bit & (1 << (f - 1))) != 0 {
                    break;
                }
            }
            for f in (0..file).rev() {
                attack |= 1u64 << f;
                if (1..=6).contains(&f) && (occ_6bit & (1 << (f - 1))) != 0 {
                    break;
                }
            }
            attacks[8 * occ_6bit + file] = attack;
        }
    }
    attacks
});

/// Hyperbola Quintessence along a single ray mask.
/// The reverse direction is handled via byte swap (vertical flip).
#[inline(always)]
fn hyp_quint(occupied: u64, mask: u64, square: usize) -> u64 {
    let piece_bit = 1u64 << square;
    let forward = occupied & mask;
    let backward = forward.swap_bytes();
    let forward_attacks = forward.wrapping_sub(piece_bit.wrapping_mul(2));
    let backward_attacks = backward
        .wrapping_sub(piece_bit.swap_bytes().wrapping_mul(2))
        .swap_bytes();
    (forward_attacks ^ backward_attacks) & mask
}

/// Rank attacks use the lookup table since byte swap cannot reverse a rank
#[inline(always)]
fn rank_attacks(occupied: u64, square: usize) -> u64 {
    let rank = square / 8;
    let file = square % 8;
    let rank_occ = occupied >> (rank * 8);
    let occ_6bit = ((rank_occ >> 1) & 63) as usize;
    RANK_ATTACKS[8 * occ_6bit + file] << (rank * 8)
}

/// Bishop attacks (both diagonals)
#[inline]
pub(crate) fn bishop_attacks(square: usize, occupancy: u64) -> u64 {
    hyp_quint(occupancy, DIAGONAL_MASKS[square], square)
        | hyp_quint(occupancy, ANTI_DIAGONAL_MASKS[square], square)
}

/// Rook attacks (rank and file)
#[inline]
pub(crate) fn rook_attacks(square: usize, occupancy: u64) -> u64 {
    hyp_quint(occupancy, FILE_MASKS[square], square) | rank_attacks(occupancy, square)
}

/// Queen attacks (all 8 directions)
#[inline]
pub(crate) fn queen_attacks(square: usize, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_attacks_empty_board() {
        // Rook on e4 (square 28) sees its whole rank and file
        let attacks = rook_attacks(28, 0);
        let expected_rank = 0xFFu64 << 24;
        let expected_file = FILE_A << 4;
        let expected = (expected_rank | expected_file) & !(1u64 << 28);
        assert_eq!(attacks, expected);
    }

    #[test]
    fn bishop_attacks_empty_board() {
        // Bishop on e4: b1 and h7 on the diagonal, h1 and a8 on the anti-diagonal
        let attacks = bishop_attacks(28, 0);
        assert!(attacks & (1u64 << 1) != 0); // b1
        assert!(attacks & (1u64 << 55) != 0); // h7
        assert!(attacks & (1u64 << 7) != 0); // h1
        assert!(attacks & (1u64 << 56) != 0); // a8
        assert!(attacks & (1u64 << 28) == 0); // not e4 itself
    }

    #[test]
    fn rook_rays_stop_at_blockers() {
        // Rook on e4, blockers on e6 and c4
        let blockers = (1u64 << 44) | (1u64 << 26);
        let attacks = rook_attacks(28, blockers);
        assert!(attacks & (1u64 << 44) != 0); // e6 can be captured
        assert!(attacks & (1u64 << 52) == 0); // e7 blocked
        assert!(attacks & (1u64 << 26) != 0); // c4 can be captured
        assert!(attacks & (1u64 << 25) == 0); // b4 blocked
    }

    #[test]
    fn bishop_rays_stop_at_blockers() {
        // Bishop on e4, blocker on g6
        let blockers = 1u64 << 46;
        let attacks = bishop_attacks(28, blockers);
        assert!(attacks & (1u64 << 46) != 0); // g6 can be captured
        assert!(attacks & (1u64 << 55) == 0); // h7 blocked
    }

    #[test]
    fn queen_is_union_of_rook_and_bishop() {
        for sq in 0..64 {
            for occ in [0u64, 0xFF00FF00FF00FF00, 0x00FF00FF00FF00FF] {
                assert_eq!(
                    queen_attacks(sq, occ),
                    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
                );
            }
        }
    }

    #[test]
    fn knight_table_corner_and_center() {
        assert_eq!(KNIGHT_ATTACKS[0].count_ones(), 2); // a1
        assert_eq!(KNIGHT_ATTACKS[28].count_ones(), 8); // e4
    }

    #[test]
    fn pawn_attack_tables_are_color_relative() {
        // White pawn on e4 attacks d5 and f5; black pawn attacks d3 and f3
        assert_eq!(PAWN_ATTACKS[0][28], (1u64 << 35) | (1u64 << 37));
        assert_eq!(PAWN_ATTACKS[1][28], (1u64 << 19) | (1u64 << 21));
    }
}
