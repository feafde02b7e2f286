//! Terminal-state classification.

use crate::movegen::{is_in_check, legal_moves};
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, PieceKind};
use serde::{Deserialize, Serialize};

/// Why a game is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// 100 plies without a pawn move or capture.
    FiftyMoveRule,
    /// Neither side can ever deliver mate (bare kings, or king plus
    /// one minor piece against a bare king).
    InsufficientMaterial,
}

/// The state of a game from the current position's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameOutcome {
    Ongoing,
    /// The side to move has no legal moves and is in check; `winner`
    /// is the side that delivered the mate.
    Checkmate { winner: Color },
    /// No legal moves but not in check.
    Stalemate,
    Draw { reason: DrawReason },
}

impl GameOutcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::Ongoing)
    }
}

/// Classify a position. Generates the legal move set; when the caller
/// already has one, [`classify_with_moves`] avoids the duplicate work.
pub fn classify(pos: &Position) -> GameOutcome {
    classify_with_moves(pos, &legal_moves(pos))
}

/// Classify a position given its precomputed legal moves. Mate and
/// stalemate are checked before the draw rules, so a mate delivered on
/// the hundredth quiet ply still counts.
pub fn classify_with_moves(pos: &Position, moves: &[Move]) -> GameOutcome {
    if moves.is_empty() {
        return if is_in_check(pos, pos.side_to_move) {
            GameOutcome::Checkmate {
                winner: pos.side_to_move.opponent(),
            }
        } else {
            GameOutcome::Stalemate
        };
    }
    if pos.halfmove_clock >= 100 {
        return GameOutcome::Draw {
            reason: DrawReason::FiftyMoveRule,
        };
    }
    if insufficient_material(pos) {
        return GameOutcome::Draw {
            reason: DrawReason::InsufficientMaterial,
        };
    }
    GameOutcome::Ongoing
}

/// True when no sequence of legal moves can produce checkmate: bare
/// kings, or exactly one knight or bishop beside them. Two knights and
/// bishop-vs-bishop endings are not covered; they stay Ongoing.
fn insufficient_material(pos: &Position) -> bool {
    let mut minors = 0usize;
    for piece in pos.board.iter().flatten().flatten() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors += 1,
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }
    minors <= 1
}
