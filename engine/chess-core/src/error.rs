//! Error types for move application and position validation.

use crate::moves::Move;
use crate::types::Color;
use thiserror::Error;

/// Rejected by [`crate::Position::apply`]: the move is not in the legal
/// set for the current position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move {mv} for {side}")]
pub struct IllegalMoveError {
    pub mv: Move,
    pub side: Color,
}

/// Structural problems found by [`crate::Position::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPositionError {
    #[error("no {0} king on the board")]
    MissingKing(Color),
    #[error("more than one {0} king on the board")]
    TooManyKings(Color),
    #[error("{0} pawn on a back rank")]
    PawnOnBackRank(Color),
}
