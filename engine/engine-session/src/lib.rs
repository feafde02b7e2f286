//! Per-game engine sessions.
//!
//! The crate the outer shell talks to. A [`GameSession`] wraps one game:
//! the authoritative [`chess_core::Position`], the engine's RNG, and the
//! search configuration. A [`SessionManager`] holds many sessions behind
//! per-session mutexes so concurrent games never share state.
//!
//! The move flow is deliberately one-way:
//!
//! 1. `submit_move` applies a (validated) move and commits the new position
//! 2. `request_ai_move` searches and returns the engine's choice without
//!    applying it; the caller commits it through `submit_move`
//!
//! That keeps a single source of truth for position changes regardless of
//! which side the move came from.

pub mod error;
pub mod manager;
pub mod session;

pub use error::SessionError;
pub use manager::{SessionHandle, SessionManager};
pub use session::{mcts_config, GameSession, SearchBudget};
