//! Fixed-capacity transposition table with mate-distance normalization.
//!
//! Bucketed (4-way set-associative) open addressing, indexed by the low bits
//! of the zobrist key. Replacement prefers, in order: a slot already holding
//! this key, an older-generation slot, then the shallowest-depth slot.

use crate::types::Move;

const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    key: u64,
    depth: u8,
    score: i32,
    bound: Bound,
    best_move: Option<Move>,
    generation: u16,
}

#[derive(Default, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    pub probes: u64,
    pub hits: u64,
    pub exact_hits: u64,
    pub lower_hits: u64,
    pub upper_hits: u64,
    pub stores: u64,
    pub replacements: u64,
}

pub struct TranspositionTable {
    buckets: Vec<[Option<Entry>; BUCKET_SIZE]>,
    mask: usize,
    generation: u16,
    occupied: usize,
    counters: Counters,
}

const MATE_SCORE: i32 = 30_000;

impl TranspositionTable {
    #[must_use]
    pub fn with_capacity_mb(mb: usize) -> Self {
        let bucket_bytes = std::mem::size_of::<[Option<Entry>; BUCKET_SIZE]>();
        let requested_buckets = (mb.max(1) * 1024 * 1024) / bucket_bytes.max(1);
        let num_buckets = requested_buckets.next_power_of_two().max(1024);
        #[cfg(feature = "logging")]
        log::debug!("transposition table sized to {num_buckets} buckets ({mb} MB requested)");
        TranspositionTable {
            buckets: vec![[None; BUCKET_SIZE]; num_buckets],
            mask: num_buckets - 1,
            generation: 0,
            occupied: 0,
            counters: Counters::default(),
        }
    }

    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Probe the table. `ply` is the distance from the search root, used to
    /// undo mate-distance normalization.
    pub fn probe(&mut self, key: u64) -> Option<ProbeResult> {
        self.counters.probes += 1;
        let bucket = &self.buckets[self.index(key)];
        for slot in bucket.iter().flatten() {
            if slot.key == key {
                self.counters.hits += 1;
                match slot.bound {
                    Bound::Exact => self.counters.exact_hits += 1,
                    Bound::Lower => self.counters.lower_hits += 1,
                    Bound::Upper => self.counters.upper_hits += 1,
                }
                return Some(ProbeResult {
                    depth: slot.depth,
                    score: slot.score,
                    bound: slot.bound,
                    best_move: slot.best_move,
                });
            }
        }
        None
    }

    pub fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, best_move: Option<Move>, ply: u32) {
        self.counters.stores += 1;
        let normalized_score = normalize_for_store(score, ply);
        let idx = self.index(key);
        let bucket = &mut self.buckets[idx];

        if let Some(slot) = bucket.iter_mut().flatten().find(|s| s.key == key) {
            if depth as i32 >= slot.depth as i32 || bound == Bound::Exact {
                *slot = Entry {
                    key,
                    depth,
                    score: normalized_score,
                    bound,
                    best_move: best_move.or(slot.best_move),
                    generation: self.generation,
                };
            }
            return;
        }

        if let Some(empty) = bucket.iter_mut().find(|s| s.is_none()) {
            *empty = Some(Entry { key, depth, score: normalized_score, bound, best_move, generation: self.generation });
            self.occupied += 1;
            return;
        }

        let victim_idx = bucket
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| {
                let e = s.as_ref().expect("bucket full of Some by construction");
                let generation_rank = self.generation.wrapping_sub(e.generation);
                (std::cmp::Reverse(generation_rank), e.depth)
            })
            .map(|(i, _)| i)
            .expect("bucket has BUCKET_SIZE > 0 entries");

        self.counters.replacements += 1;
        bucket[victim_idx] = Some(Entry { key, depth, score: normalized_score, bound, best_move, generation: self.generation });
    }

    #[must_use]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    #[must_use]
    pub fn hashfull_permille(&self) -> u32 {
        let capacity = self.buckets.len() * BUCKET_SIZE;
        if capacity == 0 {
            return 0;
        }
        ((self.occupied as u64 * 1000) / capacity as u64) as u32
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = [None; BUCKET_SIZE];
        }
        self.occupied = 0;
        self.generation = 0;
        self.counters = Counters::default();
        #[cfg(feature = "logging")]
        log::trace!("transposition table cleared");
    }
}

pub struct ProbeResult {
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

impl ProbeResult {
    /// Undo mate-distance normalization for use at the probing ply.
    #[must_use]
    pub fn score_at_ply(&self, ply: u32) -> i32 {
        denormalize_for_probe(self.score, ply)
    }
}

fn normalize_for_store(score: i32, ply: u32) -> i32 {
    if score >= MATE_SCORE - 1000 {
        score + ply as i32
    } else if score <= -(MATE_SCORE - 1000) {
        score - ply as i32
    } else {
        score
    }
}

fn denormalize_for_probe(score: i32, ply: u32) -> i32 {
    if score >= MATE_SCORE - 1000 {
        score - ply as i32
    } else if score <= -(MATE_SCORE - 1000) {
        score + ply as i32
    } else {
        score
    }
}
