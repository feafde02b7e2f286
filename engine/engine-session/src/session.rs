//! One game, one session.
//!
//! A [`GameSession`] owns the authoritative [`Position`] for a single game
//! plus the RNG and search configuration used for engine replies. The
//! session is the single writer of its position: `request_ai_move` only
//! proposes a move, and the caller commits it through `submit_move` so
//! every state change flows through one path.

use std::time::{Duration, Instant};

use chess_core::{classify, legal_moves, GameOutcome, Move, Position};
use mcts::{run_mcts, CaptureBiased, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SessionError;

/// Per-call search budget handed to [`GameSession::request_ai_move`].
/// Overrides the session's configured simulation cap and time budget
/// for that call only.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    pub time_budget: Duration,
    pub max_simulations: u32,
}

impl SearchBudget {
    pub fn new(time_budget: Duration, max_simulations: u32) -> Self {
        Self {
            time_budget,
            max_simulations,
        }
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        let config = MctsConfig::default();
        Self {
            time_budget: config.time_budget,
            max_simulations: config.max_simulations,
        }
    }
}

/// Build an [`MctsConfig`] from the loaded `[search]` settings.
pub fn mcts_config(settings: &engine_config::SearchConfig) -> MctsConfig {
    MctsConfig {
        max_simulations: settings.max_simulations,
        time_budget: Duration::from_secs_f64(settings.time_budget_secs),
        exploration: settings.exploration as f32,
        capture_bias: settings.capture_bias as f32,
        max_playout_depth: settings.max_playout_depth,
    }
}

/// A single game's state and engine.
pub struct GameSession {
    id: Uuid,
    position: Position,
    config: MctsConfig,
    rng: ChaCha20Rng,
    created_at: Instant,
    last_activity: Instant,
}

impl GameSession {
    /// Create a session at the starting position with an entropy-seeded RNG.
    pub fn new(config: MctsConfig) -> Self {
        Self::from_rng(config, ChaCha20Rng::from_entropy())
    }

    /// Create a session with a fixed seed for reproducible engine play.
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::from_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        let now = Instant::now();
        let id = Uuid::new_v4();
        info!(session = %id, "created game session");
        Self {
            id,
            position: Position::startpos(),
            config,
            rng,
            created_at: now,
            last_activity: now,
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn current_position(&self) -> &Position {
        &self.position
    }

    pub fn outcome(&self) -> GameOutcome {
        classify(&self.position)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    /// Apply a move to the session's position. The position only changes
    /// when the move is legal and the game is still running.
    pub fn submit_move(&mut self, mv: Move) -> Result<Position, SessionError> {
        self.touch();
        self.position.validate()?;
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(SessionError::GameOver(outcome));
        }

        let next = self.position.apply(mv)?;
        debug!(session = %self.id, %mv, side = %next.side_to_move, "move applied");
        self.position = next.clone();
        Ok(next)
    }

    /// Run a search and return the engine's chosen move WITHOUT applying
    /// it. Commit it with [`submit_move`](Self::submit_move).
    pub fn request_ai_move(&mut self, budget: SearchBudget) -> Result<Move, SessionError> {
        self.touch();
        self.position.validate()?;
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(SessionError::GameOver(outcome));
        }

        let config = self
            .config
            .clone()
            .with_simulations(budget.max_simulations)
            .with_time_budget(budget.time_budget);
        let policy = CaptureBiased::new(config.capture_bias);

        let result = run_mcts(self.position.clone(), &policy, config, &mut self.rng)?;
        debug!(
            session = %self.id,
            mv = %result.mv,
            simulations = result.simulations,
            value = result.value,
            "engine move selected"
        );
        Ok(result.mv)
    }

    /// Abandon the current game and return to the starting position.
    /// The RNG and configuration carry over.
    pub fn reset(&mut self) -> Position {
        self.touch();
        debug!(session = %self.id, "session reset");
        self.position = Position::startpos();
        self.position.clone()
    }

    #[inline]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[inline]
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// Record activity; called by every mutating operation.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Whether the session has been idle longer than `timeout`.
    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}
