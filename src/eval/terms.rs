//! Individual evaluation terms beyond material/PST: mobility, king safety,
//! passed pawns, rook activity, and knight outposts/bishop pair.

use crate::geometry;
use crate::position::Position;
use crate::types::{Bitboard, Color, PieceKind, Square};

const FILE_A: u64 = 0x0101_0101_0101_0101;

fn file_mask(file: u8) -> u64 {
    FILE_A << file
}

fn mobility_weight(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Knight => 4,
        PieceKind::Bishop => 4,
        PieceKind::Rook => 2,
        PieceKind::Queen => 1,
        _ => 0,
    }
}

/// Count of pseudo-legal non-pawn moves per side, weighted per piece kind.
/// Returns `(white, black)` in centipawns.
pub(crate) fn mobility(pos: &Position) -> (i32, i32) {
    let occ = pos.occupancy();
    let mut scores = [0i32; 2];
    for color in [Color::White, Color::Black] {
        let own = pos.color_occupancy(color);
        let mut total = 0i32;
        for piece in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
            let weight = mobility_weight(piece);
            for from in pos.pieces_of(color, piece).iter() {
                let attacks = match piece {
                    PieceKind::Knight => geometry::knight_attacks(from),
                    PieceKind::Bishop => geometry::bishop_attacks(from, occ),
                    PieceKind::Rook => geometry::rook_attacks(from, occ),
                    PieceKind::Queen => geometry::queen_attacks(from, occ),
                    _ => unreachable!(),
                };
                let count = Bitboard(attacks.0 & !own.0).popcount() as i32;
                total += count * weight;
            }
        }
        scores[color.index()] = total;
    }
    (scores[0], scores[1])
}

fn pawn_shield_penalty(pos: &Position, color: Color) -> i32 {
    let king = pos.king_square(color);
    if (color == Color::White && king.rank() > 2) || (color == Color::Black && king.rank() < 5) {
        // King has left the back ranks; shield scoring no longer applies.
        return 0;
    }
    let own_pawns = pos.pieces_of(color, PieceKind::Pawn);
    let shield_rank = if color == Color::White { king.rank() + 1 } else { king.rank().wrapping_sub(1) };
    if shield_rank > 7 {
        return 0;
    }
    let mut missing = 0;
    for file_offset in -1i32..=1 {
        let file = king.file() as i32 + file_offset;
        if !(0..8).contains(&file) {
            continue;
        }
        let sq = Square::new(shield_rank, file as u8);
        if !own_pawns.has(sq) {
            missing += 1;
        }
    }
    missing * 10
}

fn king_attacker_penalty(pos: &Position, color: Color) -> i32 {
    let king = pos.king_square(color);
    let zone = geometry::king_attacks(king);
    let opp = color.opponent();
    let mut attackers = 0;
    for piece in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in pos.pieces_of(opp, piece).iter() {
            let attacks = match piece {
                PieceKind::Knight => geometry::knight_attacks(from),
                PieceKind::Bishop => geometry::bishop_attacks(from, pos.occupancy()),
                PieceKind::Rook => geometry::rook_attacks(from, pos.occupancy()),
                PieceKind::Queen => geometry::queen_attacks(from, pos.occupancy()),
                _ => unreachable!(),
            };
            if attacks.0 & zone.0 != 0 {
                attackers += 1;
            }
        }
    }
    attackers * 15
}

/// King safety: pawn-shield penalty plus adjacent-attacker-count penalty.
/// Returns `(white, black)` penalties already negated (lower is worse).
pub(crate) fn king_safety(pos: &Position) -> (i32, i32) {
    let white = -(pawn_shield_penalty(pos, Color::White) + king_attacker_penalty(pos, Color::White));
    let black = -(pawn_shield_penalty(pos, Color::Black) + king_attacker_penalty(pos, Color::Black));
    (white, black)
}

const PASSED_BONUS_BY_RANK: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];

/// Passed-pawn bonus, scaled by rank, for each side. No opposing pawn on the
/// same file or an adjacent file ahead of it.
pub(crate) fn passed_pawns(pos: &Position) -> (i32, i32) {
    let white_pawns = pos.pieces_of(Color::White, PieceKind::Pawn);
    let black_pawns = pos.pieces_of(Color::Black, PieceKind::Pawn);
    let mut white_score = 0;
    for sq in white_pawns.iter() {
        if is_passed(sq, black_pawns.0, Color::White) {
            white_score += PASSED_BONUS_BY_RANK[sq.rank() as usize];
        }
    }
    let mut black_score = 0;
    for sq in black_pawns.iter() {
        if is_passed(sq, white_pawns.0, Color::Black) {
            black_score += PASSED_BONUS_BY_RANK[(7 - sq.rank()) as usize];
        }
    }
    (white_score, black_score)
}

fn is_passed(sq: Square, enemy_pawns: u64, color: Color) -> bool {
    let mut front_files = file_mask(sq.file());
    if sq.file() > 0 {
        front_files |= file_mask(sq.file() - 1);
    }
    if sq.file() < 7 {
        front_files |= file_mask(sq.file() + 1);
    }
    let ahead_mask = if color == Color::White {
        let shift = (sq.rank() as u32 + 1) * 8;
        if shift >= 64 { 0 } else { u64::MAX << shift }
    } else {
        let bits_from_top = (8 - sq.rank()) as u32 * 8;
        if bits_from_top >= 64 { 0 } else { u64::MAX >> bits_from_top }
    };
    enemy_pawns & front_files & ahead_mask == 0
}

fn open_file_bonus(pos: &Position, color: Color, file: u8) -> i32 {
    let own_pawns = pos.pieces_of(color, PieceKind::Pawn).0 & file_mask(file);
    let enemy_pawns = pos.pieces_of(color.opponent(), PieceKind::Pawn).0 & file_mask(file);
    if own_pawns == 0 && enemy_pawns == 0 {
        15
    } else if own_pawns == 0 {
        8
    } else {
        0
    }
}

/// Rook activity: open/half-open file bonus plus a bonus for rooks on the
/// 7th (relative) rank.
pub(crate) fn rook_activity(pos: &Position) -> (i32, i32) {
    let mut scores = [0i32; 2];
    for color in [Color::White, Color::Black] {
        let seventh = if color == Color::White { 6 } else { 1 };
        let mut total = 0;
        for sq in pos.pieces_of(color, PieceKind::Rook).iter() {
            total += open_file_bonus(pos, color, sq.file());
            if sq.rank() == seventh {
                total += 20;
            }
        }
        scores[color.index()] = total;
    }
    (scores[0], scores[1])
}

fn outpost_rank_mask(color: Color) -> u64 {
    if color == Color::White { 0x0000_FFFF_0000_0000 } else { 0x0000_0000_FFFF_0000 }
}

/// Bonus for knights on squares no enemy pawn can ever attack, supported by
/// a friendly pawn.
pub(crate) fn knight_outposts(pos: &Position) -> (i32, i32) {
    let mut scores = [0i32; 2];
    for color in [Color::White, Color::Black] {
        let opp = color.opponent();
        let own_pawns = pos.pieces_of(color, PieceKind::Pawn);
        let enemy_pawns = pos.pieces_of(opp, PieceKind::Pawn);
        let mut total = 0;
        for sq in pos.pieces_of(color, PieceKind::Knight).iter() {
            if (1u64 << sq.0) & outpost_rank_mask(color) == 0 {
                continue;
            }
            // No enemy pawn can ever attack this square if no enemy pawn
            // sits on an adjacent file at or behind (from the enemy's
            // advancing direction) this rank.
            let attacked_by_enemy_pawn = geometry::pawn_attacks(color, sq).0 & enemy_pawns.0 != 0;
            if attacked_by_enemy_pawn {
                continue;
            }
            let supported = geometry::pawn_attacks(opp, sq).0 & own_pawns.0 != 0;
            if supported {
                total += 25;
            }
        }
        scores[color.index()] = total;
    }
    (scores[0], scores[1])
}

/// Fixed bonus for holding both bishops.
pub(crate) fn bishop_pair(pos: &Position) -> (i32, i32) {
    let white = if pos.pieces_of(Color::White, PieceKind::Bishop).popcount() >= 2 { 30 } else { 0 };
    let black = if pos.pieces_of(Color::Black, PieceKind::Bishop).popcount() >= 2 { 30 } else { 0 };
    (white, black)
}
