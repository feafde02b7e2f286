//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",      // Current directory
    "../config.toml",   // Parent directory (when running from subdirectory)
    "/app/config.toml", // Docker container
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by CHESSMIND_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
/// 4. Docker container path (/app/config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("CHESSMIND_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from CHESSMIND_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "CHESSMIND_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CHESSMIND_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CHESSMIND_COMMON_LOG_LEVEL");

    // Search
    env_override!(
        config,
        search.max_simulations,
        "CHESSMIND_SEARCH_MAX_SIMULATIONS",
        parse
    );
    env_override!(
        config,
        search.time_budget_secs,
        "CHESSMIND_SEARCH_TIME_BUDGET_SECS",
        parse
    );
    env_override!(
        config,
        search.exploration,
        "CHESSMIND_SEARCH_EXPLORATION",
        parse
    );
    env_override!(
        config,
        search.capture_bias,
        "CHESSMIND_SEARCH_CAPTURE_BIAS",
        parse
    );
    env_override!(
        config,
        search.max_playout_depth,
        "CHESSMIND_SEARCH_MAX_PLAYOUT_DEPTH",
        parse
    );

    // Session
    env_override!(
        config,
        session.expiry_timeout_secs,
        "CHESSMIND_SESSION_EXPIRY_TIMEOUT_SECS",
        parse
    );
    env_override!(
        config,
        session.max_sessions,
        "CHESSMIND_SESSION_MAX_SESSIONS",
        parse
    );

    config
}
