//! Playout policies and the playout loop.
//!
//! A [`RolloutPolicy`] decides which move a playout takes at each step.
//! The default [`CaptureBiased`] policy prefers captures with a
//! configurable probability, which shortens playouts and makes tactical
//! refutations show up sooner than uniform random play does.

use chess_core::{classify_with_moves, legal_moves, GameOutcome, Move, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Picks one move during a playout. Implementations may assume `moves`
/// is non-empty; playouts stop before reaching a position without moves.
pub trait RolloutPolicy {
    fn pick(&self, moves: &[Move], rng: &mut ChaCha20Rng) -> Move;
}

/// Uniform random move selection. Mainly useful as a baseline in tests.
#[derive(Debug, Clone, Default)]
pub struct UniformRandom;

impl RolloutPolicy for UniformRandom {
    fn pick(&self, moves: &[Move], rng: &mut ChaCha20Rng) -> Move {
        *moves.choose(rng).expect("playout offered an empty move list")
    }
}

/// With probability `capture_bias`, pick uniformly among captures when
/// any exist; otherwise pick uniformly among all legal moves.
#[derive(Debug, Clone)]
pub struct CaptureBiased {
    pub capture_bias: f32,
}

impl CaptureBiased {
    pub fn new(capture_bias: f32) -> Self {
        Self { capture_bias }
    }
}

impl RolloutPolicy for CaptureBiased {
    fn pick(&self, moves: &[Move], rng: &mut ChaCha20Rng) -> Move {
        if rng.gen::<f32>() < self.capture_bias {
            let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
            if let Some(&mv) = captures.choose(rng) {
                return mv;
            }
        }
        *moves.choose(rng).expect("playout offered an empty move list")
    }
}

/// Play random moves from `start` until the game ends or the depth cap
/// is reached. Returns the terminal outcome, or `Ongoing` when capped;
/// the caller scores `Ongoing` as a draw.
pub fn playout<P: RolloutPolicy>(
    start: &Position,
    policy: &P,
    max_depth: u32,
    rng: &mut ChaCha20Rng,
) -> GameOutcome {
    let mut pos = start.clone();
    for _ in 0..max_depth {
        let moves = legal_moves(&pos);
        let outcome = classify_with_moves(&pos, &moves);
        if outcome.is_terminal() {
            return outcome;
        }
        let mv = policy.pick(&moves, rng);
        pos = pos.apply_unchecked(mv);
    }
    GameOutcome::Ongoing
}
