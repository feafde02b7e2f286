//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_max_simulations() -> u32 {
    defaults::max_simulations()
}
fn d_time_budget_secs() -> f64 {
    defaults::time_budget_secs()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_capture_bias() -> f64 {
    defaults::capture_bias()
}
fn d_max_playout_depth() -> u32 {
    defaults::max_playout_depth()
}
fn d_expiry_timeout_secs() -> u64 {
    defaults::expiry_timeout_secs()
}
fn d_max_sessions() -> usize {
    defaults::max_sessions()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Move search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Simulation cap per search
    #[serde(default = "d_max_simulations")]
    pub max_simulations: u32,
    /// Wall-clock budget per search, in seconds
    #[serde(default = "d_time_budget_secs")]
    pub time_budget_secs: f64,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    /// Playout preference for captures, in [0, 1]
    #[serde(default = "d_capture_bias")]
    pub capture_bias: f64,
    /// Playout ply cap; capped playouts score as a draw
    #[serde(default = "d_max_playout_depth")]
    pub max_playout_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_simulations: defaults::max_simulations(),
            time_budget_secs: defaults::time_budget_secs(),
            exploration: defaults::exploration(),
            capture_bias: defaults::capture_bias(),
            max_playout_depth: defaults::max_playout_depth(),
        }
    }
}

/// Session manager configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Idle time in seconds after which a session may be reaped
    #[serde(default = "d_expiry_timeout_secs")]
    pub expiry_timeout_secs: u64,
    /// Hard cap on concurrently held sessions
    #[serde(default = "d_max_sessions")]
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_timeout_secs: defaults::expiry_timeout_secs(),
            max_sessions: defaults::max_sessions(),
        }
    }
}
