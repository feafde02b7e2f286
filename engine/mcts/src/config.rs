//! MCTS configuration parameters.

use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Maximum number of simulations per search. The search stops at
    /// this count even with time budget remaining.
    pub max_simulations: u32,

    /// Wall-clock budget per search. The deadline is checked before
    /// each simulation, so one playout may overrun it slightly.
    pub time_budget: Duration,

    /// Exploration constant for the UCB1 formula.
    /// Higher values encourage exploration, lower values favor
    /// exploitation. sqrt(2) is the classical choice for results
    /// in [0, 1].
    pub exploration: f32,

    /// Probability that a playout step picks among captures when any
    /// exist, instead of among all legal moves.
    pub capture_bias: f32,

    /// Playout depth cap in plies. Playouts that reach it without a
    /// terminal position score as a draw.
    pub max_playout_depth: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            max_simulations: 500,
            time_budget: Duration::from_secs(3),
            exploration: std::f32::consts::SQRT_2,
            capture_bias: 0.8,
            max_playout_depth: 80,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing: simulation-capped, with a
    /// time budget large enough to never be the binding limit.
    pub fn for_testing() -> Self {
        Self {
            max_simulations: 100,
            time_budget: Duration::from_secs(30),
            ..Self::default()
        }
    }

    /// Builder pattern: set the simulation cap.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.max_simulations = n;
        self
    }

    /// Builder pattern: set the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the playout capture bias.
    pub fn with_capture_bias(mut self, bias: f32) -> Self {
        self.capture_bias = bias;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.max_simulations, 500);
        assert_eq!(config.time_budget, Duration::from_secs(3));
        assert!((config.exploration - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert!((config.capture_bias - 0.8).abs() < 1e-6);
        assert_eq!(config.max_playout_depth, 80);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(100)
            .with_time_budget(Duration::from_millis(250))
            .with_exploration(1.0)
            .with_capture_bias(0.5);

        assert_eq!(config.max_simulations, 100);
        assert_eq!(config.time_budget, Duration::from_millis(250));
        assert!((config.exploration - 1.0).abs() < 1e-6);
        assert!((config.capture_bias - 0.5).abs() < 1e-6);
    }
}
