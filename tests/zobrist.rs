//! The incrementally maintained Zobrist hash must always agree with a
//! from-scratch recomputation. `Position::from_fen` always recomputes from
//! scratch, so re-parsing a position's own FEN and comparing hashes is an
//! external equivalent of the from-scratch cross-check `Position` already
//! performs internally on every apply/undo in debug builds.

use chess_core::movegen::generate_legal;
use chess_core::position::Position;

fn recomputed_hash_matches(pos: &Position) -> bool {
    let recomputed = Position::from_fen(&pos.to_fen()).unwrap();
    recomputed.zobrist_key() == pos.zobrist_key()
}

#[test]
fn startpos_hash_matches_recompute() {
    let pos = Position::startpos();
    assert!(recomputed_hash_matches(&pos));
}

#[test]
fn hash_after_move_sequence_matches_recompute() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    for i in 0..30 {
        let moves = generate_legal(&mut pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[i % moves.len()];
        pos.apply(mv);
        assert!(recomputed_hash_matches(&pos), "hash diverged after move {i}: {mv}");
    }
}

#[test]
fn hash_after_undo_matches_recompute() {
    let mut pos = Position::startpos();
    let moves = generate_legal(&mut pos);
    let mv = moves.as_slice()[0];
    pos.apply(mv);
    pos.undo(mv);
    assert!(recomputed_hash_matches(&pos));
    assert_eq!(pos.zobrist_key(), Position::startpos().zobrist_key());
}

#[test]
fn castling_updates_hash_consistently_with_recompute() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    let castle = moves.as_slice().iter().find(|m| m.is_castling()).copied().unwrap();
    pos.apply(castle);
    assert!(recomputed_hash_matches(&pos));
}

#[test]
fn en_passant_updates_hash_consistently_with_recompute() {
    let mut pos = Position::from_fen("4k3/8/8/KPp5/8/8/8/8 w - c6 0 1").unwrap();
    let moves = generate_legal(&mut pos);
    let ep = moves.as_slice().iter().find(|m| m.is_en_passant()).copied().unwrap();
    pos.apply(ep);
    assert!(recomputed_hash_matches(&pos));
}
