//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the file stays the single source of truth for every component.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    session: SessionDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    max_simulations: u32,
    time_budget_secs: f64,
    exploration: f64,
    capture_bias: f64,
    max_playout_depth: u32,
}

#[derive(Debug, Deserialize)]
struct SessionDefaults {
    expiry_timeout_secs: u64,
    max_sessions: usize,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn max_simulations() -> u32 {
    DEFAULTS.search.max_simulations
}
pub fn time_budget_secs() -> f64 {
    DEFAULTS.search.time_budget_secs
}
pub fn exploration() -> f64 {
    DEFAULTS.search.exploration
}
pub fn capture_bias() -> f64 {
    DEFAULTS.search.capture_bias
}
pub fn max_playout_depth() -> u32 {
    DEFAULTS.search.max_playout_depth
}

// Session
pub fn expiry_timeout_secs() -> u64 {
    DEFAULTS.session.expiry_timeout_secs
}
pub fn max_sessions() -> usize {
    DEFAULTS.session.max_sessions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        // Just accessing these will verify the TOML parses correctly
        assert_eq!(log_level(), "info");
    }

    #[test]
    fn test_search_defaults() {
        assert_eq!(max_simulations(), 500);
        assert!((time_budget_secs() - 3.0).abs() < f64::EPSILON);
        assert!((exploration() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert!((capture_bias() - 0.8).abs() < f64::EPSILON);
        assert_eq!(max_playout_depth(), 80);
    }

    #[test]
    fn test_session_defaults() {
        assert_eq!(expiry_timeout_secs(), 86400);
        assert_eq!(max_sessions(), 1000);
    }
}
