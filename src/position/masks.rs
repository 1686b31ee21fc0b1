//! Pre-computed geometry masks for check evasion and pin handling.
//!
//! `BETWEEN[a][b]` holds the squares strictly between two aligned squares
//! and is empty when the squares do not share a rank, file, or diagonal.
//! `LINE[a][b]` holds the full ray through two aligned squares, edge to
//! edge, including both endpoints. A piece pinned against its king may
//! only move on `LINE[king][piece]`; a check from a slider can be blocked
//! on `BETWEEN[king][checker]`.

/// Step direction from `from` toward `to`, or (0, 0) when not aligned
const fn ray_direction(from: usize, to: usize) -> (isize, isize) {
    if from == to {
        return (0, 0);
    }
    let dr = (to / 8) as isize - (from / 8) as isize;
    let df = (to % 8) as isize - (from % 8) as isize;
    if dr == 0 {
        (0, df.signum())
    } else if df == 0 {
        (dr.signum(), 0)
    } else if dr.abs() == df.abs() {
        (dr.signum(), df.signum())
    } else {
        (0, 0)
    }
}

pub(crate) const BETWEEN: [[u64; 64]; 64] = {
    let mut table = [[0u64; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut b = 0;
        while b < 64 {
            let (dr, df) = ray_direction(a, b);
            if dr != 0 || df != 0 {
                let mut r = (a / 8) as isize + dr;
                let mut f = (a % 8) as isize + df;
                let mut mask = 0u64;
                loop {
                    let sq = (r * 8 + f) as usize;
                    if sq == b {
                        break;
                    }
                    mask |= 1u64 << sq;
                    r += dr;
                    f += df;
                }
                table[a][b] = mask;
            }
            b += 1;
        }
        a += 1;
    }
    table
};

pub(crate) const LINE: [[u64; 64]; 64] = {
    let mut table = [[0u64; 64]; 64];
    let mut a = 0;
    while a < 64 {
        let mut b = 0;
        while b < 64 {
            let (dr, df) = ray_direction(a, b);
            if dr != 0 || df != 0 {
                let mut mask = 1u64 << a;
                let mut r = (a / 8) as isize + dr;
                let mut f = (a % 8) as isize + df;
                while r >= 0 && r < 8 && f >= 0 && f < 8 {
                    mask |= 1u64 << (r * 8 + f);
                    r += dr;
                    f += df;
                }
                r = (a / 8) as isize - dr;
                f = (a % 8) as isize - df;
                while r >= 0 && r < 8 && f >= 0 && f < 8 {
                    mask |= 1u64 << (r * 8 + f);
                    r -= dr;
                    f -= df;
                }
                table[a][b] = mask;
            }
            b += 1;
        }
        a += 1;
    }
    table
};

#[cfg(test)]
mod tests {
    use super::*;

    // e1=4, e8=60, e4=28, a1=0, h8=63, b2=9

    #[test]
    fn between_vertical() {
        let mask = BETWEEN[4][60];
        assert_eq!(mask.count_ones(), 6);
        assert!(mask & (1u64 << 28) != 0); // e4 lies between e1 and e8
        assert!(mask & (1u64 << 4) == 0); // endpoints excluded
        assert!(mask & (1u64 << 60) == 0);
    }

    #[test]
    fn between_diagonal_and_symmetry() {
        assert_eq!(BETWEEN[0][63], BETWEEN[63][0]);
        assert!(BETWEEN[0][63] & (1u64 << 9) != 0); // b2 on the a1-h8 diagonal
    }

    #[test]
    fn between_unaligned_is_empty() {
        assert_eq!(BETWEEN[0][12], 0); // a1 and e2 share nothing
        assert_eq!(BETWEEN[4][4], 0);
    }

    #[test]
    fn between_adjacent_is_empty() {
        assert_eq!(BETWEEN[4][5], 0);
        assert_eq!(BETWEEN[4][12], 0);
    }

    #[test]
    fn line_runs_edge_to_edge() {
        let mask = LINE[28][36]; // e4-e5 defines the whole e-file
        assert_eq!(mask.count_ones(), 8);
        assert!(mask & (1u64 << 4) != 0); // e1
        assert!(mask & (1u64 << 60) != 0); // e8
    }

    #[test]
    fn line_includes_both_endpoints() {
        let mask = LINE[0][9]; // a1-b2 diagonal
        assert!(mask & 1 != 0);
        assert!(mask & (1u64 << 9) != 0);
        assert!(mask & (1u64 << 63) != 0); // extends to h8
    }

    #[test]
    fn line_unaligned_is_empty() {
        assert_eq!(LINE[0][12], 0);
    }
}
