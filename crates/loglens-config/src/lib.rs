#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Configuration for the loglens client.
//!
//! A single [`Config`] type covers the API endpoint, the OAuth/OIDC
//! provider settings, and the durable session store location.
//!
//! # Usage
//!
//! ```rust,no_run
//! use loglens_config::Config;
//!
//! // Load from ~/.loglens/config.toml (if present) with env fallbacks.
//! let config = Config::load().unwrap();
//! println!("API at {}", config.api.base_url);
//! ```
//!
//! # Precedence
//!
//! 1. Values from the config file (`~/.loglens/config.toml`, or an explicit
//!    path via [`Config::load_file`])
//! 2. Environment variables (`LOGLENS_*`) for fields the file left unset
//! 3. Built-in defaults

/// Configuration error types.
pub mod error;
/// Configuration file discovery and loading.
pub mod loader;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use types::{ApiConfig, Config, OAuthConfig, SessionConfig};

impl Config {
    /// Load configuration from the default location with env fallbacks.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file is malformed or the
    /// final configuration fails validation.
    pub fn load() -> ConfigResult<Self> {
        loader::load(None)
    }

    /// Load configuration from an explicit file (env fallbacks still apply).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or
    /// the final configuration fails validation.
    pub fn load_file(path: &std::path::Path) -> ConfigResult<Self> {
        loader::load(Some(path))
    }
}
