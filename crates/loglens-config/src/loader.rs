//! Config file discovery and loading.
//!
//! Load order: explicit path (if given) or `~/.loglens/config.toml`, then
//! `LOGLENS_*` environment fallbacks for fields the file left at their
//! defaults, then validation.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;
use crate::validate;

/// Maximum allowed config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: usize = 1_048_576;

/// Load configuration, apply env fallbacks, and validate.
pub(crate) fn load(explicit_path: Option<&Path>) -> ConfigResult<Config> {
    let mut config = match explicit_path {
        Some(path) => read_file(path)?.ok_or_else(|| ConfigError::ReadError {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?,
        None => match default_path() {
            Some(path) => match read_file(&path)? {
                Some(config) => {
                    info!(path = %path.display(), "loaded config file");
                    config
                },
                None => Config::default(),
            },
            None => Config::default(),
        },
    };

    apply_env_fallbacks(&mut config);
    validate::validate(&config)?;
    Ok(config)
}

fn default_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().join(".loglens").join("config.toml"))
}

/// Read and parse a config file, returning `None` when it doesn't exist.
fn read_file(path: &Path) -> ConfigResult<Option<Config>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(None);
        },
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.display().to_string(),
                source: e,
            });
        },
    };

    if content.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::ValidationError {
            field: path.display().to_string(),
            message: format!(
                "config file is {} bytes, exceeding the {MAX_CONFIG_FILE_SIZE} byte limit",
                content.len()
            ),
        });
    }

    let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(config))
}

/// Fill unset fields from `LOGLENS_*` environment variables.
///
/// Env vars only apply where the file kept the built-in default, so a file
/// value always wins over the environment.
fn apply_env_fallbacks(config: &mut Config) {
    let defaults = Config::default();

    if config.api.base_url == defaults.api.base_url {
        if let Ok(url) = std::env::var("LOGLENS_API_URL") {
            debug!("api.base_url taken from LOGLENS_API_URL");
            config.api.base_url = url;
        }
    }
    if config.oauth.issuer.is_empty() {
        if let Ok(issuer) = std::env::var("LOGLENS_OAUTH_ISSUER") {
            config.oauth.issuer = issuer;
        }
    }
    if config.oauth.client_id.is_empty() {
        if let Ok(client_id) = std::env::var("LOGLENS_OAUTH_CLIENT_ID") {
            config.oauth.client_id = client_id;
        }
    }
    if config.oauth.redirect_uri.is_empty() {
        if let Ok(uri) = std::env::var("LOGLENS_OAUTH_REDIRECT_URI") {
            config.oauth.redirect_uri = uri;
        }
    }
    if config.session.store_path.is_none() {
        if let Ok(path) = std::env::var("LOGLENS_SESSION_STORE") {
            config.session.store_path = Some(PathBuf::from(path));
        }
    }
}
