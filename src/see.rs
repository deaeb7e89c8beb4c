//! Static Exchange Evaluation: the net material result of resolving all
//! captures on a single square, least-valuable-attacker first.

use crate::eval::piece_value;
use crate::geometry;
use crate::position::Position;
use crate::types::{Bitboard, Color, PieceKind, Square};

fn least_valuable_attacker(pos: &Position, attackers: Bitboard, color: Color) -> Option<(Square, PieceKind)> {
    for piece in PieceKind::ALL {
        let candidates = Bitboard(attackers.0 & pos.pieces_of(color, piece).0);
        if !candidates.is_empty() {
            return candidates.iter().next().map(|sq| (sq, piece));
        }
    }
    None
}

fn attackers_to(pos: &Position, sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attackers = 0u64;
    for color in [Color::White, Color::Black] {
        attackers |= geometry::pawn_attacks(color.opponent(), sq).0 & pos.pieces_of(color, PieceKind::Pawn).0;
        attackers |= geometry::knight_attacks(sq).0 & pos.pieces_of(color, PieceKind::Knight).0;
        attackers |= geometry::king_attacks(sq).0 & pos.pieces_of(color, PieceKind::King).0;
        let bishop_like = pos.pieces_of(color, PieceKind::Bishop).0 | pos.pieces_of(color, PieceKind::Queen).0;
        attackers |= geometry::bishop_attacks(sq, occupancy).0 & bishop_like;
        let rook_like = pos.pieces_of(color, PieceKind::Rook).0 | pos.pieces_of(color, PieceKind::Queen).0;
        attackers |= geometry::rook_attacks(sq, occupancy).0 & rook_like;
    }
    Bitboard(attackers & occupancy.0)
}

/// Net centipawn gain for the side to move capturing on `to` via `from`,
/// simulating the full exchange sequence (standard SEE swap-list algorithm).
#[must_use]
pub fn see(pos: &Position, from: Square, to: Square) -> i32 {
    let mover = pos.side_to_move();
    let Some((_, first_attacker)) = pos.piece_at(from) else {
        return 0;
    };
    let target_value = pos
        .piece_at(to)
        .map(|(_, p)| piece_value(p))
        .unwrap_or(0);

    let mut gain = [0i32; 32];
    let mut depth = 0usize;
    gain[0] = target_value;

    let mut occupancy = pos.occupancy();
    occupancy.clear(from);
    let mut attacker_value = piece_value(first_attacker);
    let mut side = mover.opponent();

    loop {
        depth += 1;
        gain[depth] = attacker_value - gain[depth - 1];
        if gain[depth].max(-gain[depth - 1]) < 0 {
            break;
        }
        let attackers = attackers_to(pos, to, occupancy);
        let Some((attacker_sq, attacker_piece)) = least_valuable_attacker(pos, attackers, side) else {
            break;
        };
        occupancy.clear(attacker_sq);
        attacker_value = piece_value(attacker_piece);
        side = side.opponent();
        if depth >= gain.len() - 1 {
            break;
        }
    }

    while depth > 0 {
        gain[depth - 1] = -((-gain[depth - 1]).max(gain[depth]));
        depth -= 1;
    }
    gain[0]
}
