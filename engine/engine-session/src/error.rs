//! Session-level errors.

use chess_core::{GameOutcome, IllegalMoveError, InvalidPositionError};
use mcts::SearchError;
use thiserror::Error;

/// Errors surfaced by [`crate::GameSession`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Illegal(#[from] IllegalMoveError),

    #[error(transparent)]
    Invalid(#[from] InvalidPositionError),

    /// The game already ended; no further moves are accepted.
    #[error("game is over: {0:?}")]
    GameOver(GameOutcome),

    #[error(transparent)]
    Search(#[from] SearchError),
}
