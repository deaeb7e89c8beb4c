//! Move-generator correctness oracle: count leaf nodes reachable in exactly
//! `depth` plies, and the per-root-move breakdown used to localize a
//! mismatch against a known-good node count.

use crate::movegen;
use crate::position::Position;
use crate::types::Move;

/// Count of leaf positions reachable in exactly `depth` plies from `pos`.
#[must_use]
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = movegen::generate_legal(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for &mv in moves.iter() {
        pos.apply(mv);
        nodes += perft(pos, depth - 1);
        pos.undo(mv);
    }
    nodes
}

/// Per-root-move leaf counts at `depth`, in move-generation order. Used to
/// binary-search a perft mismatch down to the offending root move.
#[must_use]
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    let moves = movegen::generate_legal(pos);
    let mut results = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        pos.apply(mv);
        let count = if depth == 0 { 1 } else { perft(pos, depth - 1) };
        pos.undo(mv);
        results.push((mv, count));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_perft_1_through_4() {
        let mut pos = Position::startpos();
        assert_eq!(perft(&mut pos, 1), 20);
        assert_eq!(perft(&mut pos, 2), 400);
        assert_eq!(perft(&mut pos, 3), 8_902);
        assert_eq!(perft(&mut pos, 4), 197_281);
    }

    #[test]
    fn kiwipete_perft_1_through_3() {
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(perft(&mut pos, 1), 48);
        assert_eq!(perft(&mut pos, 2), 2_039);
        assert_eq!(perft(&mut pos, 3), 97_862);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut pos = Position::startpos();
        let divided = perft_divide(&mut pos, 3);
        let total: u64 = divided.iter().map(|&(_, n)| n).sum();
        assert_eq!(total, perft(&mut pos, 3));
        assert_eq!(divided.len(), 20);
    }
}
