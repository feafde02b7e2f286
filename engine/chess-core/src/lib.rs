//! Core chess rules: positions, move generation, legality and outcomes.
//!
//! This crate is the game model everything else builds on. A [`Position`] is
//! a value type (cloned per ply, never mutated in place), so search code can
//! branch freely without undo bookkeeping. The legality pipeline is:
//!
//! 1. Pseudo-legal generation per piece ([`movegen`])
//! 2. King-safety filtering by applying each candidate to a scratch copy
//! 3. Outcome classification from the filtered move set ([`outcome`])
//!
//! Applying a move goes through [`Position::apply`], which re-validates the
//! move against the legal set (the boundary the external shell calls), or
//! [`Position::apply_unchecked`] for moves the search generated itself.

pub mod error;
pub mod movegen;
pub mod moves;
pub mod outcome;
pub mod position;
pub mod types;

pub use error::{IllegalMoveError, InvalidPositionError};
pub use movegen::{is_in_check, is_square_attacked, legal_moves, perft};
pub use moves::{Move, MoveKind};
pub use outcome::{classify, classify_with_moves, DrawReason, GameOutcome};
pub use position::Position;
pub use types::{CastlingRights, Color, Piece, PieceKind, Square};
