//! Error types for the rules core.
//!
//! Ordinary bad input never panics: move application, legality checks and
//! every notation parser report one of these variants instead.

use crate::types::Move;

/// Errors that can occur while manipulating or decoding positions and moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// Coordinates outside the 8x8 board
    #[error("square (rank {rank}, file {file}) is outside the board")]
    InvalidPosition { rank: i8, file: i8 },

    /// Move that breaks the moving piece's rules or the turn order
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    /// Pseudo-legal move that leaves the mover's king in check, or a failed
    /// castling precondition
    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },

    /// Text that does not decode as the named notation
    #[error("malformed {notation} `{input}`: {reason}")]
    MalformedNotation {
        notation: &'static str,
        input: String,
        reason: String,
    },
}

impl ChessError {
    pub(crate) fn malformed(notation: &'static str, input: &str, reason: impl Into<String>) -> Self {
        ChessError::MalformedNotation {
            notation,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for rules operations
pub type ChessResult<T> = Result<T, ChessError>;
