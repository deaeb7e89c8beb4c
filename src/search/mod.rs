//! Iterative-deepening negamax alpha-beta search over a shared
//! transposition table: null-move pruning, late-move reductions, principal
//! variation search, quiescence with SEE delta pruning, and aspiration
//! windows around the previous iteration's score.

mod ordering;

use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::Instant;

use crate::error::EngineError;
use crate::eval::{evaluate, piece_value};
use crate::movegen;
use crate::position::Position;
use crate::tt::{Bound, TranspositionTable};
use crate::types::{Color, Move, PieceKind, Square, MAX_PLY};

pub use crate::tt::Counters as TtCounters;

const MATE_SCORE: i32 = 30_000;
const INFINITY: i32 = 32_000;
const NODES_PER_STOP_CHECK: u64 = 4096;
const NULL_MOVE_REDUCTION: i32 = 3;

type KillerSlots = [Option<Move>; 2];

struct HistoryTable {
    table: Box<[[[i32; 64]; 64]; 2]>,
}

impl HistoryTable {
    fn new() -> Self {
        HistoryTable { table: Box::new([[[0; 64]; 64]; 2]) }
    }

    fn get(&self, color: Color, from: Square, to: Square) -> i32 {
        self.table[color.index()][from.index()][to.index()]
    }

    fn update(&mut self, color: Color, from: Square, to: Square, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let cell = &mut self.table[color.index()][from.index()][to.index()];
        *cell += bonus;
        if *cell > 1_000_000 {
            self.decay();
        }
    }

    fn decay(&mut self) {
        for plane in self.table.iter_mut() {
            for row in plane.iter_mut() {
                for v in row.iter_mut() {
                    *v /= 2;
                }
            }
        }
    }
}

/// Configuration of which pruning/reduction techniques are active, and the
/// aspiration window width. A closed, flat struct rather than string-keyed
/// options; callers opt out of individual techniques for testing.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOptions {
    pub tt_capacity_mb: usize,
    pub enable_nmp: bool,
    pub enable_lmr: bool,
    pub enable_futility: bool,
    pub enable_pvs: bool,
    pub aspiration_half_width_cp: i32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            tt_capacity_mb: 64,
            enable_nmp: true,
            enable_lmr: true,
            enable_futility: true,
            enable_pvs: true,
            aspiration_half_width_cp: 25,
        }
    }
}

/// Stopping conditions for one `search` call. `None` in every field means
/// search only the single best-effort depth reachable before `max_depth`'s
/// implicit ply cap.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_depth: Option<u32>,
    pub movetime_ms: Option<u64>,
    pub max_nodes: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Score {
    Cp(i32),
    Mate(i32),
}

impl Score {
    fn from_raw(raw: i32) -> Score {
        if raw >= MATE_SCORE - MAX_PLY as i32 {
            let plies_to_mate = MATE_SCORE - raw;
            Score::Mate((plies_to_mate + 1) / 2)
        } else if raw <= -(MATE_SCORE - MAX_PLY as i32) {
            let plies_to_mate = MATE_SCORE + raw;
            Score::Mate(-((plies_to_mate + 1) / 2))
        } else {
            Score::Cp(raw)
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterationStats {
    pub depth: u32,
    pub score: Score,
    pub nodes: u64,
    pub time_ms: u64,
    pub pv: Vec<Move>,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub pv: Vec<Move>,
    pub nodes: u64,
    pub qnodes: u64,
    pub seldepth: u32,
    pub elapsed_ms: u64,
    pub iterations: Vec<IterationStats>,
    pub tt_counters: TtCounters,
}

struct SearchContext<'a> {
    stop: &'a AtomicBool,
    nodes: u64,
    qnodes: u64,
    seldepth: u32,
    killers: Vec<KillerSlots>,
    history: HistoryTable,
    max_nodes: Option<u64>,
    deadline: Option<Instant>,
    aborted: bool,
}

impl<'a> SearchContext<'a> {
    fn new(stop: &'a AtomicBool, limits: &SearchLimits, start: Instant) -> Self {
        SearchContext {
            stop,
            nodes: 0,
            qnodes: 0,
            seldepth: 0,
            killers: vec![[None, None]; MAX_PLY],
            history: HistoryTable::new(),
            max_nodes: limits.max_nodes,
            deadline: limits.movetime_ms.map(|ms| start + std::time::Duration::from_millis(ms)),
            aborted: false,
        }
    }

    /// Polled every `NODES_PER_STOP_CHECK` nodes, plus at iteration
    /// boundaries in `search`. Cheap enough to call unconditionally.
    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.nodes % NODES_PER_STOP_CHECK != 0 {
            return false;
        }
        if self.stop.load(AtomicOrdering::Relaxed) {
            self.aborted = true;
        } else if self.max_nodes.is_some_and(|max| self.nodes >= max) {
            self.aborted = true;
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            self.aborted = true;
        }
        self.aborted
    }
}

fn has_non_pawn_material(pos: &Position, color: Color) -> bool {
    [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
        .iter()
        .any(|&p| !pos.pieces_of(color, p).is_empty())
}

fn lmr_reduction(depth: i32, move_index: u32) -> i32 {
    let d = f64::from(depth);
    let i = f64::from(move_index);
    (0.53 + (d.ln() * i.ln()) / 2.44).floor().max(0.0) as i32
}

#[allow(clippy::too_many_arguments)]
fn negamax(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    options: &SearchOptions,
    mut depth: i32,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    pv: &mut Vec<Move>,
) -> i32 {
    pv.clear();
    ctx.nodes += 1;
    ctx.seldepth = ctx.seldepth.max(ply);
    if ctx.should_stop() {
        return 0;
    }

    if ply > 0 && pos.is_draw() {
        return 0;
    }
    if ply as usize >= MAX_PLY - 1 {
        return evaluate(pos);
    }

    let in_check = pos.is_in_check(pos.side_to_move());
    if depth <= 0 {
        if !in_check {
            return quiescence(pos, ctx, alpha, beta, ply);
        }
        depth = 1;
    }

    let alpha_orig = alpha;
    let key = pos.zobrist_key();
    let mut tt_move = None;
    if let Some(probe) = tt.probe(key) {
        tt_move = probe.best_move;
        if ply > 0 && i32::from(probe.depth) >= depth {
            let score = probe.score_at_ply(ply);
            match probe.bound {
                Bound::Exact => return score,
                Bound::Lower if score >= beta => return score,
                Bound::Upper if score <= alpha => return score,
                _ => {}
            }
        }
    }

    if options.enable_nmp
        && !in_check
        && ply > 0
        && depth >= NULL_MOVE_REDUCTION + 1
        && has_non_pawn_material(pos, pos.side_to_move())
    {
        let undo = pos.apply_null();
        let mut child_pv = Vec::new();
        let score = -negamax(
            pos,
            tt,
            ctx,
            options,
            depth - 1 - NULL_MOVE_REDUCTION,
            ply + 1,
            -beta,
            -beta + 1,
            &mut child_pv,
        );
        pos.undo_null(undo);
        if ctx.aborted {
            return 0;
        }
        if score >= beta {
            return beta;
        }
    }

    let moves = movegen::generate_legal(pos);
    if moves.is_empty() {
        return if in_check { -(MATE_SCORE - ply as i32) } else { 0 };
    }

    let static_eval = if in_check { None } else { Some(evaluate(pos)) };
    let ordered = ordering::order_moves(pos, &moves, tt_move, &ctx.killers[ply as usize], &ctx.history);

    let mut best_score = -INFINITY;
    let mut best_move = None;
    let mut child_pv = Vec::new();

    for (idx, &mv) in ordered.iter().enumerate() {
        pos.apply(mv);
        let gives_check = pos.is_in_check(pos.side_to_move());

        // Frontier futility pruning (spec: depth == 1 only, never a move
        // that gives check). `gives_check` must be known before the prune
        // decision, which means the move has to be applied first.
        if options.enable_futility && depth == 1 && idx > 0 && mv.is_quiet() && !gives_check {
            if let Some(se) = static_eval {
                if se + 150 * depth <= alpha {
                    pos.undo(mv);
                    continue;
                }
            }
        }

        let do_lmr = options.enable_lmr && idx >= 3 && depth >= 3 && mv.is_quiet() && !in_check && !gives_check;

        let score = if options.enable_pvs && idx > 0 {
            let reduction = if do_lmr { lmr_reduction(depth, idx as u32) } else { 0 };
            let mut s = -negamax(pos, tt, ctx, options, depth - 1 - reduction, ply + 1, -alpha - 1, -alpha, &mut child_pv);
            if s > alpha && (reduction > 0 || s < beta) {
                s = -negamax(pos, tt, ctx, options, depth - 1, ply + 1, -beta, -alpha, &mut child_pv);
            }
            s
        } else {
            -negamax(pos, tt, ctx, options, depth - 1, ply + 1, -beta, -alpha, &mut child_pv)
        };

        pos.undo(mv);

        if ctx.aborted {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
            pv.clear();
            pv.push(mv);
            pv.extend(child_pv.iter().copied());
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            if mv.is_quiet() {
                let slots = &mut ctx.killers[ply as usize];
                if slots[0] != Some(mv) {
                    slots[1] = slots[0];
                    slots[0] = Some(mv);
                }
                ctx.history.update(pos.side_to_move(), mv.from, mv.to, depth as u8);
            }
            break;
        }
    }

    let bound = if best_score <= alpha_orig {
        Bound::Upper
    } else if best_score >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    tt.store(key, depth.max(0) as u8, best_score, bound, best_move, ply);

    best_score
}

/// Quiescence: resolve captures until the position is "quiet" (stand-pat
/// beats every remaining capture), generating no checks, matching the
/// teacher's quiescence exactly.
fn quiescence(pos: &mut Position, ctx: &mut SearchContext, mut alpha: i32, beta: i32, ply: u32) -> i32 {
    ctx.nodes += 1;
    ctx.qnodes += 1;
    ctx.seldepth = ctx.seldepth.max(ply);
    if ctx.should_stop() {
        return 0;
    }

    let stand_pat = evaluate(pos);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if ply as usize >= MAX_PLY - 1 {
        return stand_pat;
    }

    let captures = movegen::generate_captures(pos);
    let ordered = ordering::order_captures(pos, &captures);

    for mv in ordered {
        let see_value = if mv.is_en_passant() {
            piece_value(PieceKind::Pawn)
        } else {
            crate::see::see(pos, mv.from, mv.to)
        };
        if see_value < 0 || stand_pat + see_value + 200 < alpha {
            continue;
        }

        pos.apply(mv);
        let score = -quiescence(pos, ctx, -beta, -alpha, ply + 1);
        pos.undo(mv);

        if ctx.aborted {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

fn search_root_with_aspiration(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    ctx: &mut SearchContext,
    options: &SearchOptions,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
) -> Option<(i32, Vec<Move>)> {
    let mut widened = 0u32;
    loop {
        let mut pv = Vec::new();
        let score = negamax(pos, tt, ctx, options, depth, 0, alpha, beta, &mut pv);
        if ctx.aborted {
            return None;
        }
        if score <= alpha {
            widened += 1;
            if widened >= 2 {
                alpha = -INFINITY;
            } else {
                alpha -= options.aspiration_half_width_cp * 2;
            }
            #[cfg(feature = "logging")]
            log::trace!("aspiration fail-low at depth {depth}, widening to alpha={alpha}");
            continue;
        }
        if score >= beta {
            widened += 1;
            if widened >= 2 {
                beta = INFINITY;
            } else {
                beta += options.aspiration_half_width_cp * 2;
            }
            #[cfg(feature = "logging")]
            log::trace!("aspiration fail-high at depth {depth}, widening to beta={beta}");
            continue;
        }
        return Some((score, pv));
    }
}

/// Run iterative deepening from the current position up to `limits`,
/// returning the deepest completed iteration's result. `stop` is checked
/// cooperatively; setting it from another thread aborts the in-progress
/// iteration. If not even depth 1 completes before the abort, this returns
/// `Err(EngineError::SearchAborted)` carrying the best effort gathered so
/// far rather than fabricating a result — the search never reports success
/// for a position it never actually finished evaluating.
pub fn search(
    pos: &mut Position,
    tt: &mut TranspositionTable,
    limits: SearchLimits,
    options: SearchOptions,
    stop: &AtomicBool,
) -> Result<SearchResult, EngineError> {
    let start = Instant::now();
    tt.new_generation();
    let mut ctx = SearchContext::new(stop, &limits, start);

    let max_depth = limits.max_depth.unwrap_or(MAX_PLY as u32 - 1).min(MAX_PLY as u32 - 1).max(1);

    let mut iterations = Vec::new();
    let mut best: Option<(i32, Vec<Move>)> = None;
    let mut prev_score = 0;

    let mut depth = 1u32;
    while depth <= max_depth {
        let (alpha, beta) = if depth >= 5 {
            (prev_score - options.aspiration_half_width_cp, prev_score + options.aspiration_half_width_cp)
        } else {
            (-INFINITY, INFINITY)
        };

        let Some((score, pv)) = search_root_with_aspiration(pos, tt, &mut ctx, &options, depth as i32, alpha, beta) else {
            break;
        };

        prev_score = score;
        #[cfg(feature = "logging")]
        log::debug!(
            "iteration depth={depth} score={score} nodes={} time_ms={}",
            ctx.nodes,
            start.elapsed().as_millis()
        );
        iterations.push(IterationStats {
            depth,
            score: Score::from_raw(score),
            nodes: ctx.nodes,
            time_ms: start.elapsed().as_millis() as u64,
            pv: pv.clone(),
        });
        best = Some((score, pv));

        if ctx.should_stop() {
            #[cfg(feature = "logging")]
            log::trace!("search stopped after depth {depth}");
            break;
        }
        depth += 1;
    }

    let Some((final_score, final_pv)) = best else {
        let best_effort = SearchResult {
            best_move: None,
            score: Score::from_raw(0),
            pv: Vec::new(),
            nodes: ctx.nodes,
            qnodes: ctx.qnodes,
            seldepth: ctx.seldepth,
            elapsed_ms: start.elapsed().as_millis() as u64,
            iterations,
            tt_counters: tt.counters(),
        };
        return Err(EngineError::SearchAborted { best_effort });
    };
    let best_move = final_pv.first().copied();

    Ok(SearchResult {
        best_move,
        score: Score::from_raw(final_score),
        pv: final_pv,
        nodes: ctx.nodes,
        qnodes: ctx.qnodes,
        seldepth: ctx.seldepth,
        elapsed_ms: start.elapsed().as_millis() as u64,
        iterations,
        tt_counters: tt.counters(),
    })
}
