//! Error types surfaced at crate boundaries.
//!
//! Move generation and make/unmake never fail. Illegal-move detection only
//! happens when mapping an input string to a legal move. These are plain
//! enums with hand-written `Display` impls, matching the rest of this crate's
//! avoidance of derive-macro error crates.

use std::fmt;

use crate::search::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FenError {
    TooFewParts { found: usize },
    InvalidPiece { ch: char },
    InvalidCastling { ch: char },
    InvalidSideToMove { found: String },
    InvalidEnPassant { found: String },
    InvalidRank { rank: usize },
    TooManyFiles { rank: usize, files: usize },
    WrongKingCount { color_is_white: bool, count: u32 },
    EnPassantInconsistent { found: String },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 parts, found {found}")
            }
            FenError::InvalidPiece { ch } => write!(f, "invalid piece character '{ch}' in FEN"),
            FenError::InvalidCastling { ch } => {
                write!(f, "invalid castling character '{ch}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square '{found}'")
            }
            FenError::InvalidRank { rank } => write!(f, "invalid rank index {rank} in FEN"),
            FenError::TooManyFiles { rank, files } => {
                write!(f, "too many files ({files}) in rank {rank}")
            }
            FenError::WrongKingCount { color_is_white, count } => {
                let side = if *color_is_white { "white" } else { "black" };
                write!(f, "{side} must have exactly one king, found {count}")
            }
            FenError::EnPassantInconsistent { found } => {
                write!(f, "en passant target '{found}' inconsistent with side to move")
            }
        }
    }
}

impl std::error::Error for FenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveParseError {
    InvalidLength { len: usize },
    InvalidSquare { notation: String },
    InvalidPromotion { ch: char },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidLength { len } => {
                write!(f, "move must be 4-5 characters, found {len}")
            }
            MoveParseError::InvalidSquare { notation } => {
                write!(f, "invalid square notation in '{notation}'")
            }
            MoveParseError::InvalidPromotion { ch } => {
                write!(f, "invalid promotion piece '{ch}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

/// Errors raised at the `Game` boundary (engine-to-host contract).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    InvalidFen(FenError),
    IllegalMove(String),
    HistoryEmpty,
    CapacityExceeded { requested_mb: usize },
    /// Search was stopped before any iteration completed (e.g. a `max_nodes`
    /// or `movetime_ms` limit too tight to finish depth 1). Carries whatever
    /// the search context had accumulated so the caller isn't left with
    /// nothing at all.
    SearchAborted { best_effort: SearchResult },
    /// A debug-assertion-class invariant failure that should be unreachable
    /// under correct use. Never constructed in a release build on valid input.
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidFen(e) => write!(f, "invalid FEN: {e}"),
            EngineError::IllegalMove(notation) => write!(f, "illegal move '{notation}'"),
            EngineError::HistoryEmpty => write!(f, "no move to undo"),
            EngineError::CapacityExceeded { requested_mb } => {
                write!(f, "transposition table capacity exceeded ({requested_mb} MB requested)")
            }
            EngineError::SearchAborted { .. } => write!(f, "search aborted before any iteration completed"),
            EngineError::Internal(msg) => write!(f, "internal invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<FenError> for EngineError {
    fn from(e: FenError) -> Self {
        EngineError::InvalidFen(e)
    }
}
