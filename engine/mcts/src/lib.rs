//! Monte Carlo Tree Search (MCTS) move selection for chess.
//!
//! This crate picks moves for [`chess_core::Position`]s by building a
//! search tree with random playouts, bounded by wall-clock time and a
//! simulation cap.
//!
//! # Overview
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1 (Upper Confidence
//!    Bound) to balance exploration and exploitation
//! 2. **Expansion**: At a node with untried moves, add one child for
//!    the next untried move (captures are tried first)
//! 3. **Simulation**: Play a capture-biased random game from the new
//!    position up to a depth cap
//! 4. **Backpropagation**: Update visit counts and value sums along the
//!    path from leaf to root, flipping the result's perspective at each
//!    level
//!
//! Results live in [0, 1]: 1 is a win for the player who moved into a
//! node, 0.5 a draw. Because of that convention, selection reads child
//! values directly and backpropagation flips with `1 - v`.
//!
//! # Usage
//!
//! ```rust
//! use chess_core::Position;
//! use mcts::{run_mcts, CaptureBiased, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let policy = CaptureBiased::new(0.8);
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_mcts(Position::startpos(), &policy, config, &mut rng).unwrap();
//! println!("best move: {} ({} simulations)", result.mv, result.simulations);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `max_simulations`: simulation cap per search (default: 500)
//! - `time_budget`: wall-clock budget per search (default: 3s)
//! - `exploration`: UCB1 exploration constant (default: sqrt(2))
//! - `capture_bias`: playout preference for captures (default: 0.8)
//! - `max_playout_depth`: playout ply cap, scored as a draw (default: 80)

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use rollout::{playout, CaptureBiased, RolloutPolicy, UniformRandom};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
