//! Move representation.

use crate::types::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a move changes the board beyond relocating one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Plain relocation to an empty square.
    Quiet,
    /// Destination holds an enemy piece.
    Capture,
    /// Pawn capture of the pawn that just double-stepped; the captured
    /// pawn is not on the destination square.
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

/// A single move. Carries everything apply needs; no board context
/// is required to interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    /// Promotion target when a pawn reaches the last rank. Generation
    /// emits all four choices; `None` on apply defaults to Queen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn quiet(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Quiet,
            promotion: None,
        }
    }

    pub fn capture(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Capture,
            promotion: None,
        }
    }

    /// True for regular and en passant captures. Used for move ordering
    /// and playout biasing.
    #[inline]
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture | MoveKind::EnPassant)
    }
}

impl fmt::Display for Move {
    /// Long algebraic without piece letters ("e2e4", "e7e8q").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
