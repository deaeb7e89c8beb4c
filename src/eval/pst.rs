//! Material values and piece-square tables, indexed `[piece.index()][square]`
//! with squares given from White's perspective (a1=0..h8=63); Black looks
//! its tables up via the vertically mirrored square.

use crate::types::PieceKind;

pub(crate) const MATERIAL_MG: [i32; 6] = [100, 320, 330, 500, 900, 0];
pub(crate) const MATERIAL_EG: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Phase weight per piece kind; sums to 24 at the start position (a standard
/// tapering scale), used to interpolate between middlegame and endgame PSTs.
pub(crate) const PHASE_WEIGHT: [i32; 6] = [0, 1, 1, 2, 4, 0];
pub(crate) const PHASE_TOTAL: i32 = 24;

#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
    20, 20, 20, 20, 20, 20, 20, 20,
    35, 35, 35, 35, 35, 35, 35, 35,
    60, 60, 60, 60, 60, 60, 60, 60,
    90, 90, 90, 90, 90, 90, 90, 90,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_MG: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];
const KNIGHT_EG: [i32; 64] = KNIGHT_MG;

#[rustfmt::skip]
const BISHOP_MG: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];
const BISHOP_EG: [i32; 64] = BISHOP_MG;

#[rustfmt::skip]
const ROOK_MG: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];
const ROOK_EG: [i32; 64] = ROOK_MG;

#[rustfmt::skip]
const QUEEN_MG: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  0,  5,  5,  5,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];
const QUEEN_EG: [i32; 64] = QUEEN_MG;

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
     20, 30, 10,  0,  0, 10, 30, 20,
     20, 20,  0,  0,  0,  0, 20, 20,
    -10,-20,-20,-20,-20,-20,-20,-10,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
];

#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50,-30,-30,-30,-30,-30,-30,-50,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -50,-40,-30,-20,-20,-30,-40,-50,
];

pub(crate) fn pst_mg(piece: PieceKind, white_relative_square: usize) -> i32 {
    table_mg(piece)[white_relative_square]
}

pub(crate) fn pst_eg(piece: PieceKind, white_relative_square: usize) -> i32 {
    table_eg(piece)[white_relative_square]
}

fn table_mg(piece: PieceKind) -> &'static [i32; 64] {
    match piece {
        PieceKind::Pawn => &PAWN_MG,
        PieceKind::Knight => &KNIGHT_MG,
        PieceKind::Bishop => &BISHOP_MG,
        PieceKind::Rook => &ROOK_MG,
        PieceKind::Queen => &QUEEN_MG,
        PieceKind::King => &KING_MG,
    }
}

fn table_eg(piece: PieceKind) -> &'static [i32; 64] {
    match piece {
        PieceKind::Pawn => &PAWN_EG,
        PieceKind::Knight => &KNIGHT_EG,
        PieceKind::Bishop => &BISHOP_EG,
        PieceKind::Rook => &ROOK_EG,
        PieceKind::Queen => &QUEEN_EG,
        PieceKind::King => &KING_EG,
    }
}
