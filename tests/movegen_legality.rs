//! Generated legal moves never leave the mover's own king in check, and the
//! generator produces the textbook scenarios from castling, en passant, and
//! discovered check correctly.

use chess_core::movegen::{generate_captures, generate_legal};
use chess_core::position::Position;

fn assert_all_legal(fen: &str) {
    let mut pos = Position::from_fen(fen).unwrap();
    let mover = pos.side_to_move();
    let moves = generate_legal(&mut pos);
    for &mv in moves.iter() {
        pos.apply(mv);
        assert!(!pos.is_in_check(mover), "move {mv} from {fen} leaves mover in check");
        pos.undo(mv);
    }
}

#[test]
fn startpos_has_twenty_legal_moves() {
    let mut pos = Position::startpos();
    assert_eq!(generate_legal(&mut pos).len(), 20);
}

#[test]
fn no_generated_move_leaves_own_king_in_check() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ] {
        assert_all_legal(fen);
    }
}

#[test]
fn pinned_piece_cannot_move_off_the_pin_line() {
    // Black bishop on e7 is pinned to the king on e8 by the rook on e1; it
    // may not move off the e-file.
    let mut pos = Position::from_fen("4k3/4b3/8/8/8/8/8/4R2K b - - 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    for &mv in moves.iter() {
        if mv.from.to_string() == "e7" {
            assert_eq!(mv.to.file(), mv.from.file(), "pinned bishop escaped the pin line via {mv}");
        }
    }
}

#[test]
fn en_passant_capture_is_available_when_legal() {
    let mut pos = Position::from_fen("4k3/8/8/KPp5/8/8/8/8 w - c6 0 1").unwrap();
    let captures = generate_captures(&mut pos);
    assert!(captures.iter().any(|m| m.is_en_passant()));
}

#[test]
fn en_passant_that_would_expose_king_on_rank_is_forbidden() {
    // White king and rook share the 5th rank with the black pawn that just
    // double-pushed; capturing en passant would expose the white king to the
    // black rook along that rank (the "horizontal pin" edge case).
    let mut pos = Position::from_fen("8/8/8/k2Ppr1K/8/8/8/8 w - d6 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    assert!(!moves.iter().any(|m| m.is_en_passant()));
}

#[test]
fn castling_through_check_is_forbidden() {
    // Black rook on f8 attacks f1, the square the white king must cross to
    // castle kingside.
    let mut pos = Position::from_fen("5r1k/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    assert!(!moves.iter().any(|m| m.is_castling()));
}

#[test]
fn castling_is_available_when_path_is_safe() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    assert!(moves.iter().any(|m| m.is_castling()));
}
