//! Configuration validation rules.

use url::Url;

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-loaded configuration.
pub(crate) fn validate(config: &Config) -> ConfigResult<()> {
    require_url("api.base_url", &config.api.base_url)?;

    if config.api.timeout_secs == 0 {
        return Err(invalid("api.timeout_secs", "must be greater than zero"));
    }

    if config.oauth.is_enabled() {
        require_url("oauth.issuer", &config.oauth.issuer)?;
        if config.oauth.client_id.is_empty() {
            return Err(invalid(
                "oauth.client_id",
                "required when an issuer is configured",
            ));
        }
        require_url("oauth.redirect_uri", &config.oauth.redirect_uri)?;
        if config.oauth.scope.is_empty() {
            return Err(invalid("oauth.scope", "must not be empty"));
        }
        if let Some(uri) = &config.oauth.silent_refresh_uri {
            require_url("oauth.silent_refresh_uri", uri)?;
        }
    }

    Ok(())
}

fn require_url(field: &str, value: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Url::parse(value).map_err(|e| invalid(field, &format!("not a valid URL: {e}")))?;
    Ok(())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn bad_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError { field, .. }) if field == "api.base_url"
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn oauth_enabled_requires_client_id_and_redirect() {
        let mut config = Config::default();
        config.oauth.issuer = "https://sso.example.com".to_string();
        assert!(validate(&config).is_err());

        config.oauth.client_id = "dashboard".to_string();
        assert!(validate(&config).is_err());

        config.oauth.redirect_uri = "https://app.example.com/home".to_string();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn oauth_disabled_skips_oauth_rules() {
        let config = Config::default();
        assert!(!config.oauth.is_enabled());
        assert!(validate(&config).is_ok());
    }
}
