//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across all engine components.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CHESSMIND_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CHESSMIND_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CHESSMIND_COMMON_LOG_LEVEL=debug
//!     CHESSMIND_SEARCH_MAX_SIMULATIONS=2000
//!     CHESSMIND_SEARCH_TIME_BUDGET_SECS=1.5
//!     CHESSMIND_SESSION_MAX_SESSIONS=50
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
