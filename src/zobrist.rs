//! Deterministic Zobrist hashing.
//!
//! Keys are generated once from a fixed seed so that identical positions
//! always hash identically across runs and processes — required for
//! reproducible search and for perft/test determinism.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Color, PieceKind, Square};

const ZOBRIST_SEED: u64 = 0x5EED_C0DE_1234_5678;

pub(crate) struct ZobristTable {
    piece_keys: [[[u64; 64]; 2]; 6],
    black_to_move_key: u64,
    castle_keys: [[u64; 2]; 2],
    en_passant_keys: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let black_to_move_key = rng.gen();
        let mut castle_keys = [[0u64; 2]; 2];
        for color in &mut castle_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }
        let mut en_passant_keys = [0u64; 8];
        for key in &mut en_passant_keys {
            *key = rng.gen();
        }
        ZobristTable {
            piece_keys,
            black_to_move_key,
            castle_keys,
            en_passant_keys,
        }
    }
}

static ZOBRIST: Lazy<ZobristTable> = Lazy::new(ZobristTable::new);

#[inline]
pub(crate) fn piece_key(piece: PieceKind, color: Color, sq: Square) -> u64 {
    ZOBRIST.piece_keys[piece.index()][color.index()][sq.index()]
}

#[inline]
pub(crate) fn side_key() -> u64 {
    ZOBRIST.black_to_move_key
}

/// `side`: 0 = kingside, 1 = queenside.
#[inline]
pub(crate) fn castle_key(color: Color, side: usize) -> u64 {
    ZOBRIST.castle_keys[color.index()][side]
}

#[inline]
pub(crate) fn en_passant_key(file: u8) -> u64 {
    ZOBRIST.en_passant_keys[file as usize]
}
