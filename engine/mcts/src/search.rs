//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCB1 to find a node with untried moves
//! 2. Expansion: Add a child for the first untried move (captures first)
//! 3. Simulation: Random playout from the new child's position
//! 4. Backpropagation: Update statistics along the path, flipping the
//!    result's perspective at each level
//!
//! The search is bounded both by a simulation cap and a wall-clock
//! deadline; whichever is hit first ends it.

use std::time::{Duration, Instant};

use chess_core::{classify, GameOutcome, Move, Position};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{playout, RolloutPolicy};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("cannot search a finished game")]
    GameOver(GameOutcome),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move to play
    pub mv: Move,

    /// Mean result in [0, 1] of the chosen move's subtree, from the
    /// searching side's perspective
    pub value: f32,

    /// Number of simulations performed
    pub simulations: u32,

    /// Wall-clock time the search took
    pub elapsed: Duration,
}

/// MCTS search state.
pub struct MctsSearch<'a, P: RolloutPolicy> {
    tree: MctsTree,
    policy: &'a P,
    config: MctsConfig,
}

impl<'a, P: RolloutPolicy> MctsSearch<'a, P> {
    /// Create a new search rooted at the given position.
    pub fn new(
        position: Position,
        policy: &'a P,
        config: MctsConfig,
    ) -> Result<Self, SearchError> {
        let outcome = classify(&position);
        if outcome.is_terminal() {
            return Err(SearchError::GameOver(outcome));
        }
        Ok(Self {
            tree: MctsTree::new(position),
            policy,
            config,
        })
    }

    /// Run the search until the simulation cap or the deadline, then
    /// return the most-visited root move.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        let deadline = start + self.config.time_budget;

        // An immediate mate needs no tree: take it.
        if let Some(mv) = self.find_mate_in_one() {
            debug!(%mv, "immediate mate found, skipping search");
            return Ok(SearchResult {
                mv,
                value: 1.0,
                simulations: 0,
                elapsed: start.elapsed(),
            });
        }

        let mut simulations = 0u32;
        while simulations < self.config.max_simulations && Instant::now() < deadline {
            self.simulate(rng);
            simulations += 1;
        }

        let result = match self.tree.best_move() {
            Some((mv, child_id)) => SearchResult {
                mv,
                value: self.tree.get(child_id).mean_value(),
                simulations,
                elapsed: start.elapsed(),
            },
            None => {
                // Deadline expired before a single simulation. Fall back
                // to a uniform random legal move.
                let root = self.tree.get(self.tree.root());
                let mv = *root
                    .untried
                    .choose(rng)
                    .expect("non-terminal root has legal moves");
                debug!(%mv, "search budget exhausted before any simulation, playing random move");
                SearchResult {
                    mv,
                    value: 0.5,
                    simulations,
                    elapsed: start.elapsed(),
                }
            }
        };

        let stats = self.tree.stats();
        debug!(
            mv = %result.mv,
            value = result.value,
            simulations = result.simulations,
            elapsed_ms = result.elapsed.as_millis() as u64,
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            "search complete"
        );

        Ok(result)
    }

    /// Check each root move for a move that mates on the spot.
    fn find_mate_in_one(&self) -> Option<Move> {
        let root = self.tree.get(self.tree.root());
        root.untried.iter().copied().find(|&mv| {
            matches!(
                classify(&root.position.apply_unchecked(mv)),
                GameOutcome::Checkmate { .. }
            )
        })
    }

    /// Run a single simulation (select -> expand -> playout -> backpropagate).
    fn simulate(&mut self, rng: &mut ChaCha20Rng) {
        // Selection: descend through fully expanded nodes.
        let mut current = self.tree.root();
        loop {
            let node = self.tree.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                break;
            }
            match self.tree.select_child(current, self.config.exploration) {
                Some(child_id) => current = child_id,
                None => break,
            }
        }

        // Terminal nodes reuse their exact result.
        let node = self.tree.get(current);
        if node.is_terminal() {
            let value = node.terminal_value();
            self.tree.backpropagate(current, value);
            return;
        }

        // Expansion: materialize the first untried move.
        let mv = self.tree.get_mut(current).untried.remove(0);
        let position = self.tree.get(current).position.apply_unchecked(mv);
        let child_id = self.tree.add_child(current, mv, position);

        // Simulation: the result is scored for the child's mover.
        let child = self.tree.get(child_id);
        let value = if child.is_terminal() {
            child.terminal_value()
        } else {
            let mover = child.position.side_to_move.opponent();
            let outcome = playout(
                &child.position,
                self.policy,
                self.config.max_playout_depth,
                rng,
            );
            match outcome {
                GameOutcome::Checkmate { winner } if winner == mover => 1.0,
                GameOutcome::Checkmate { .. } => 0.0,
                _ => 0.5,
            }
        };

        trace!(node = child_id.0, %mv, value, "simulation complete");

        self.tree.backpropagate(child_id, value);
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<P: RolloutPolicy>(
    position: Position,
    policy: &P,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(position, policy, config)?;
    search.run(rng)
}
