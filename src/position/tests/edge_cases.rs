//! Checks, pins, mates, and other corners of the rules.

use crate::position::{Color, Move, MoveKind, Piece, Position, Square};

use super::find_move;

#[test]
fn starting_position_has_twenty_moves() {
    assert_eq!(Position::initial().legal_moves().len(), 20);
}

#[test]
fn stalemate_has_no_moves_and_no_check() {
    let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
    assert!(position.legal_moves().is_empty());
}

#[test]
fn fools_mate_is_checkmate() {
    let mut position = Position::initial();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        position.apply_uci(uci).unwrap();
    }
    assert!(position.is_checkmate());
    assert!(position.is_in_check());
    assert!(position.legal_moves().is_empty());
}

#[test]
fn back_rank_mate() {
    let position = Position::from_fen("6k1/5ppp/8/8/8/8/8/4R1K1 w - - 0 1");
    let mut probe = position.clone();
    probe.apply_uci("e1e8").unwrap();
    assert!(probe.is_checkmate());
}

#[test]
fn double_check_allows_only_king_moves() {
    // Knight on f6 and rook on e1 both check the king on e8
    let position = Position::from_fen("4k3/8/5N2/8/8/8/8/4R1K1 b - - 0 1");
    assert!(position.is_in_check());
    let moves = position.legal_moves();
    assert!(!moves.is_empty());
    for mv in moves.iter() {
        assert_eq!(mv.piece(), Piece::King, "non-king move {mv} under double check");
    }
}

#[test]
fn check_must_be_addressed() {
    // Rook on e4 checks along the e-file
    let position = Position::from_fen("4k3/8/8/8/4r2Q/8/3P1P2/4K3 w - - 0 1");
    assert!(position.is_in_check());
    for mv in position.legal_moves().iter() {
        let mut probe = position.clone();
        probe.make(*mv);
        assert!(
            !probe.in_check(Color::White),
            "move {mv} leaves the king in check"
        );
    }
    // Capturing the checker is among the evasions
    assert!(position
        .legal_moves()
        .iter()
        .any(|mv| mv.to_string() == "h4e4"));
}

#[test]
fn pinned_piece_cannot_leave_the_ray() {
    // Bishop on d2 pinned diagonally by the bishop on a5
    let position = Position::from_fen("4k3/8/8/b7/8/8/3B4/4K3 w - - 0 1");
    let moves = position.legal_moves();
    for mv in moves.iter().filter(|mv| mv.piece() == Piece::Bishop) {
        // Staying on the a5-e1 diagonal only
        assert!(
            ["c3", "b4", "a5"].contains(&mv.to().to_string().as_str()),
            "pinned bishop escaped the pin: {mv}"
        );
    }
}

#[test]
fn pinned_knight_cannot_move_at_all() {
    let position = Position::from_fen("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
    assert!(position
        .legal_moves()
        .iter()
        .all(|mv| mv.piece() != Piece::Knight));
}

#[test]
fn en_passant_discovered_check_is_illegal() {
    // Capturing en passant removes both pawns from the fifth rank and
    // exposes the king on a5 to the rook on h5
    let position = Position::from_fen("8/8/8/KPp4r/8/8/8/7k w - c6 0 1");
    let moves = position.legal_moves();
    assert!(!moves.iter().any(|mv| mv.to_string() == "b5c6"));
    assert!(moves.iter().any(|mv| mv.to_string() == "b5b6"));
}

#[test]
fn en_passant_exposing_king_diagonally_is_illegal() {
    // Both the e4 pawn and the capturer leave the h1-a8 diagonal at once,
    // opening the bishop's line to the king on c6
    let position = Position::from_fen("8/8/2k5/8/3pP3/8/8/2K4B b - e3 0 1");
    assert!(!position
        .legal_moves()
        .iter()
        .any(|mv| mv.is_en_passant()));
}

#[test]
fn en_passant_can_capture_a_checking_pawn() {
    // The double push d7d5 checked the king on c4; exd6 removes the checker
    let position = Position::from_fen("8/8/8/3pP3/2K5/8/8/7k w - d6 0 1");
    assert!(position.is_in_check());
    let moves = position.legal_moves();
    assert!(moves.iter().any(|mv| mv.is_en_passant()));
}

#[test]
fn castling_is_denied_in_check() {
    let position = Position::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
    assert!(position.is_in_check());
    assert!(!position.legal_moves().iter().any(|mv| mv.is_castling()));
}

#[test]
fn castling_is_denied_through_an_attacked_square() {
    // The rook on f8 covers f1, so kingside castling is out;
    // queenside transit squares d1 and c1 are clean
    let position = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = position.legal_moves();
    assert!(!moves.iter().any(|mv| mv.kind() == MoveKind::CastleKingside));
    assert!(moves.iter().any(|mv| mv.kind() == MoveKind::CastleQueenside));
}

#[test]
fn castling_is_allowed_with_only_b_file_attacked() {
    // Queenside castling only cares about c1 and d1; b1 may be attacked
    let position = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert!(position
        .legal_moves()
        .iter()
        .any(|mv| mv.kind() == MoveKind::CastleQueenside));
}

#[test]
fn castling_requires_empty_path() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/R2QK2R w KQ - 0 1");
    let moves = position.legal_moves();
    assert!(moves.iter().any(|mv| mv.kind() == MoveKind::CastleKingside));
    assert!(!moves.iter().any(|mv| mv.kind() == MoveKind::CastleQueenside));
}

#[test]
fn promotion_generates_all_four_pieces() {
    let position = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let promotions: Vec<Move> = position
        .legal_moves()
        .iter()
        .copied()
        .filter(|mv| mv.is_promotion())
        .collect();
    assert_eq!(promotions.len(), 4);
    let pieces: Vec<Option<Piece>> = promotions.iter().map(|mv| mv.promotion()).collect();
    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
        assert!(pieces.contains(&Some(piece)));
    }
}

#[test]
fn underpromotion_places_the_chosen_piece() {
    let mut position = Position::from_fen("8/P7/8/8/8/8/k7/7K w - - 0 1");
    position.apply_uci("a7a8n").unwrap();
    assert_eq!(
        position.piece_at(Square(7, 0)),
        Some((Color::White, Piece::Knight))
    );
    assert!(position.pieces_of(Color::White, Piece::Pawn).is_empty());
}

#[test]
fn moves_come_out_in_canonical_order() {
    let position = Position::initial();
    let moves = position.legal_moves();
    let mut keys: Vec<(Square, Square)> = moves.iter().map(|mv| (mv.from(), mv.to())).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);

    // Promotions on the same from/to pair are ordered by piece
    let position = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    keys = position
        .legal_moves()
        .iter()
        .map(|mv| (mv.from(), mv.to()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn cloned_positions_are_independent() {
    let mut original = Position::initial();
    let copy = original.clone();
    original.apply_uci("e2e4").unwrap();
    assert_ne!(original, copy);
    assert_eq!(copy, Position::initial());
    assert_eq!(copy.legal_moves().len(), 20);
}

#[test]
fn kiwipete_move_count() {
    let position = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    );
    assert_eq!(position.legal_moves().len(), 48);
}

#[test]
fn move_display_is_uci() {
    let position = Position::initial();
    let mv = find_move(&position, "b1c3");
    assert_eq!(mv.to_string(), "b1c3");
    assert_eq!(mv.from(), Square(0, 1));
    assert_eq!(mv.to(), Square(2, 2));

    let position = Position::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let mv = find_move(&position, "a7a8q");
    assert_eq!(mv.to_string(), "a7a8q");
}

#[cfg(feature = "serde")]
mod serde_round_trips {
    use crate::position::{Move, Square};
    use crate::position::Position;

    use super::super::find_move;

    #[test]
    fn square_round_trips_through_json() {
        let sq = Square(4, 4);
        let json = serde_json::to_string(&sq).unwrap();
        let back: Square = serde_json::from_str(&json).unwrap();
        assert_eq!(sq, back);
    }

    #[test]
    fn move_round_trips_through_json() {
        let position = Position::initial();
        let mv = find_move(&position, "e2e4");
        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(mv, back);
    }
}
