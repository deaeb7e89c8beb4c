//! Property test: any sequence of legal moves, applied and then undone in
//! reverse order, restores the position exactly as it was — FEN and
//! incrementally-maintained Zobrist hash included.

use chess_core::movegen::generate_legal;
use chess_core::position::Position;
use proptest::prelude::*;

const STARTING_FENS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
];

/// Plays `picks.len()` plies from `fen`, each ply selecting the legal move at
/// `pick % legal_moves.len()` (stopping early if the position runs out of
/// legal moves), then undoes every played move in reverse order. Returns
/// `(fen_before, fen_after, zobrist_before, zobrist_after)`.
fn roundtrip(fen: &str, picks: &[usize]) -> (String, String, u64, u64) {
    let mut pos = Position::from_fen(fen).unwrap();
    let fen_before = pos.to_fen();
    let zobrist_before = pos.zobrist_key();

    let mut played = Vec::new();
    for &pick in picks {
        let moves = generate_legal(&mut pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves.as_slice()[pick % moves.len()];
        pos.apply(mv);
        played.push(mv);
    }
    for mv in played.into_iter().rev() {
        pos.undo(mv);
    }

    (fen_before, pos.to_fen(), zobrist_before, pos.zobrist_key())
}

proptest! {
    #[test]
    fn apply_undo_restores_fen_and_zobrist(
        fen_idx in 0..STARTING_FENS.len(),
        picks in prop::collection::vec(0usize..64, 0..24),
    ) {
        let fen = STARTING_FENS[fen_idx];
        let (before, after, zobrist_before, zobrist_after) = roundtrip(fen, &picks);
        prop_assert_eq!(before, after);
        prop_assert_eq!(zobrist_before, zobrist_after);
    }
}

#[test]
fn single_capture_round_trips() {
    let (before, after, zb, za) = roundtrip(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[7, 0],
    );
    assert_eq!(before, after);
    assert_eq!(zb, za);
}

#[test]
fn castling_round_trips() {
    let (before, after, zb, za) = roundtrip("4k3/8/8/8/8/8/8/4K2R w K - 0 1", &[0, 0]);
    assert_eq!(before, after);
    assert_eq!(zb, za);
}

#[test]
fn deep_sequence_from_kiwipete_round_trips() {
    let picks: Vec<usize> = (0..40).map(|i| i * 7 + 3).collect();
    let (before, after, zb, za) =
        roundtrip("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", &picks);
    assert_eq!(before, after);
    assert_eq!(zb, za);
}
