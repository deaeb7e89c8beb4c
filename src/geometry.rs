//! Precomputed attack geometry: knight/king/pawn attack masks, ray-based
//! sliding attacks, and `between`/`line` tables.
//!
//! Sliding attacks are computed by ray-walking to the nearest blocker rather
//! than via magic bitboards — both are correctness-equivalent, and
//! ray-walking is simpler to keep obviously correct, which is what perft
//! actually checks.

use once_cell::sync::Lazy;

use crate::types::{Bitboard, Square};

const DIR_N: usize = 0;
const DIR_S: usize = 1;
const DIR_E: usize = 2;
const DIR_W: usize = 3;
const DIR_NE: usize = 4;
const DIR_NW: usize = 5;
const DIR_SE: usize = 6;
const DIR_SW: usize = 7;
const DIRS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn on_board(r: i32, f: i32) -> bool {
    (0..8).contains(&r) && (0..8).contains(&f)
}

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for sq in 0..64usize {
        let r = (sq / 8) as i32;
        let f = (sq % 8) as i32;
        for (d, &(dr, df)) in DIRS.iter().enumerate() {
            let mut mask = 0u64;
            let (mut nr, mut nf) = (r + dr, f + df);
            while on_board(nr, nf) {
                mask |= 1u64 << (nr * 8 + nf);
                nr += dr;
                nf += df;
            }
            rays[d][sq] = mask;
        }
    }
    rays
});

fn is_increasing(dir: usize) -> bool {
    matches!(dir, DIR_N | DIR_E | DIR_NE | DIR_NW)
}

fn ray_attacks(from: usize, dir: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][from];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let blocker_idx = if is_increasing(dir) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][blocker_idx]
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let deltas = [
        (2, 1), (1, 2), (-1, 2), (-2, 1), (-2, -1), (-1, -2), (1, -2), (2, -1),
    ];
    let mut table = [0u64; 64];
    for sq in 0..64usize {
        let r = (sq / 8) as i32;
        let f = (sq % 8) as i32;
        let mut mask = 0u64;
        for (dr, df) in deltas {
            let (nr, nf) = (r + dr, f + df);
            if on_board(nr, nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        table[sq] = mask;
    }
    table
});

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut table = [0u64; 64];
    for sq in 0..64usize {
        let r = (sq / 8) as i32;
        let f = (sq % 8) as i32;
        let mut mask = 0u64;
        for (dr, df) in DIRS {
            let (nr, nf) = (r + dr, f + df);
            if on_board(nr, nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        table[sq] = mask;
    }
    table
});

/// `PAWN_ATTACKS[color.index()][square]`
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 2];
    for sq in 0..64usize {
        let r = (sq / 8) as i32;
        let f = (sq % 8) as i32;
        for (color_idx, dr) in [(0usize, 1i32), (1usize, -1i32)] {
            let mut mask = 0u64;
            let nr = r + dr;
            if (0..8).contains(&nr) {
                for df in [-1, 1] {
                    let nf = f + df;
                    if on_board(nr, nf) {
                        mask |= 1u64 << (nr * 8 + nf);
                    }
                }
            }
            table[color_idx][sq] = mask;
        }
    }
    table
});

static BETWEEN: Lazy<[[u64; 64]; 64]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 64];
    for a in 0..64usize {
        let ar = (a / 8) as i32;
        let af = (a % 8) as i32;
        for &(dr, df) in &DIRS {
            let mut mask = 0u64;
            let (mut nr, mut nf) = (ar + dr, af + df);
            while on_board(nr, nf) {
                let b = (nr * 8 + nf) as usize;
                table[a][b] = mask;
                mask |= 1u64 << b;
                nr += dr;
                nf += df;
            }
        }
    }
    table
});

static LINE: Lazy<[[u64; 64]; 64]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 64];
    for a in 0..64usize {
        let ar = (a / 8) as i32;
        let af = (a % 8) as i32;
        for &(dr, df) in &DIRS {
            let mut mask = 1u64 << a;
            let (mut nr, mut nf) = (ar + dr, af + df);
            while on_board(nr, nf) {
                let b = (nr * 8 + nf) as usize;
                mask |= 1u64 << b;
                table[a][b] = mask;
                nr += dr;
                nf += df;
            }
        }
    }
    table
});

#[must_use]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.index()])
}

#[must_use]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.index()])
}

#[must_use]
pub fn pawn_attacks(color: crate::types::Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.index()])
}

#[must_use]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let idx = sq.index();
    let occ = occupancy.0;
    Bitboard(
        ray_attacks(idx, DIR_NE, occ)
            | ray_attacks(idx, DIR_NW, occ)
            | ray_attacks(idx, DIR_SE, occ)
            | ray_attacks(idx, DIR_SW, occ),
    )
}

#[must_use]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    let idx = sq.index();
    let occ = occupancy.0;
    Bitboard(
        ray_attacks(idx, DIR_N, occ)
            | ray_attacks(idx, DIR_S, occ)
            | ray_attacks(idx, DIR_E, occ)
            | ray_attacks(idx, DIR_W, occ),
    )
}

#[must_use]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(bishop_attacks(sq, occupancy).0 | rook_attacks(sq, occupancy).0)
}

/// Squares strictly between `a` and `b` if they share a rank, file, or
/// diagonal; empty otherwise.
#[must_use]
pub fn between(a: Square, b: Square) -> Bitboard {
    Bitboard(BETWEEN[a.index()][b.index()])
}

/// The full line through `a` and `b` (inclusive) if they share a rank, file,
/// or diagonal; empty otherwise.
#[must_use]
pub fn line(a: Square, b: Square) -> Bitboard {
    Bitboard(LINE[a.index()][b.index()])
}
