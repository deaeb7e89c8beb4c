//! `Game`: the single-threaded, synchronous controller an embedding host
//! (engine-protocol adapter, HTTP session layer, CLI — all out of scope
//! here) sits on top of. Owns a `Position`, its own transposition table, and
//! the applied-move history; does no parsing of transport formats.

use std::sync::atomic::AtomicBool;

use crate::error::EngineError;
use crate::movegen;
use crate::position::{parse_long_algebraic, Position};
use crate::search::{self, SearchLimits, SearchOptions, SearchResult};
use crate::tt::TranspositionTable;
use crate::types::Move;

const DEFAULT_TT_CAPACITY_MB: usize = 64;

pub struct Game {
    position: Position,
    tt: TranspositionTable,
    history: Vec<Move>,
}

impl Game {
    #[must_use]
    pub fn new() -> Self {
        Game {
            position: Position::startpos(),
            tt: TranspositionTable::with_capacity_mb(DEFAULT_TT_CAPACITY_MB),
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let position = Position::from_fen(fen).map_err(EngineError::InvalidFen)?;
        Ok(Game {
            position,
            tt: TranspositionTable::with_capacity_mb(DEFAULT_TT_CAPACITY_MB),
            history: Vec::new(),
        })
    }

    /// Parse `long_algebraic` against the current legal moves and apply it.
    pub fn apply_move(&mut self, long_algebraic: &str) -> Result<Move, EngineError> {
        let legal = movegen::generate_legal(&mut self.position);
        let mv = parse_long_algebraic(long_algebraic, &legal)
            .map_err(|_| EngineError::IllegalMove(long_algebraic.to_string()))?
            .ok_or_else(|| EngineError::IllegalMove(long_algebraic.to_string()))?;
        self.position.apply(mv);
        self.history.push(mv);
        Ok(mv)
    }

    pub fn undo(&mut self) -> Result<Move, EngineError> {
        let mv = self.history.pop().ok_or(EngineError::HistoryEmpty)?;
        self.position.undo(mv);
        Ok(mv)
    }

    #[must_use]
    pub fn fen(&self) -> String {
        self.position.to_fen()
    }

    /// Legal moves from the current position, in long-algebraic notation.
    #[must_use]
    pub fn legal_moves(&mut self) -> Vec<String> {
        movegen::generate_legal(&mut self.position)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[must_use]
    pub fn is_check(&self) -> bool {
        self.position.is_in_check(self.position.side_to_move())
    }

    #[must_use]
    pub fn is_checkmate(&mut self) -> bool {
        movegen::is_checkmate(&mut self.position)
    }

    #[must_use]
    pub fn is_stalemate(&mut self) -> bool {
        movegen::is_stalemate(&mut self.position)
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.position.is_draw()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    #[must_use]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Run a synchronous search from the current position. `stop` lets the
    /// caller cancel from another thread; pass a fresh `AtomicBool` if no
    /// external cancellation is needed. Errs with `SearchAborted` (carrying
    /// whatever partial result was gathered) if `stop` fires before even
    /// depth 1 completes; never fabricates a result for a search it didn't
    /// actually run.
    pub fn search(
        &mut self,
        limits: SearchLimits,
        options: SearchOptions,
        stop: &AtomicBool,
    ) -> Result<SearchResult, EngineError> {
        search::search(&mut self.position, &mut self.tt, limits, options, stop)
    }

    pub fn set_tt_capacity(&mut self, mb: usize) {
        #[cfg(feature = "logging")]
        log::debug!("resizing transposition table to {mb} MB");
        self.tt = TranspositionTable::with_capacity_mb(mb);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Count leaf positions reachable in exactly `depth` plies from `fen`,
/// without constructing a full `Game` (no undo history needed).
pub fn perft(fen: &str, depth: u32) -> Result<u64, EngineError> {
    let mut pos = Position::from_fen(fen).map_err(EngineError::InvalidFen)?;
    Ok(crate::perft::perft(&mut pos, depth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_undo_roundtrip_fen() {
        let mut game = Game::new();
        let fen_before = game.fen();
        game.apply_move("e2e4").unwrap();
        assert_ne!(game.fen(), fen_before);
        game.undo().unwrap();
        assert_eq!(game.fen(), fen_before);
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut game = Game::new();
        let err = game.apply_move("e2e5").unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove(_)));
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.apply_move(mv).unwrap();
        }
        assert!(game.is_checkmate());
    }
}
