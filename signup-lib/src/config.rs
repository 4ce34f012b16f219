//! Runtime configuration.
//!
//! The only external setting is the create-user endpoint, read from
//! `SIGNUP_API_URL` (a `.env` file in the working directory is honoured).

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the create-user endpoint.
pub const API_URL_VAR: &str = "SIGNUP_API_URL";

/// Endpoint used when [`API_URL_VAR`] is unset or empty.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/users";

/// How long the error banner stays up before clearing itself.
pub const DEFAULT_ERROR_BANNER_TIMEOUT: Duration = Duration::from_secs(8);

/// How long the success banner stays up before clearing itself.
pub const DEFAULT_SUCCESS_BANNER_TIMEOUT: Duration = Duration::from_secs(6);

/// Form configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Create-user endpoint.
    pub api_url: Url,
    /// Auto-clear delay for the error banner.
    pub error_banner_timeout: Duration,
    /// Auto-clear delay for the success banner.
    pub success_banner_timeout: Duration,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_api_url(env::var(API_URL_VAR).ok().as_deref())
    }

    /// Builds a config from an optional endpoint value.
    ///
    /// `None` and blank values fall back to [`DEFAULT_API_URL`].
    pub fn from_api_url(value: Option<&str>) -> Result<Self, ConfigError> {
        let raw = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let api_url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            var: API_URL_VAR,
            value: raw.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_url,
            ..Self::default()
        })
    }

    /// Sets the error banner delay.
    pub fn with_error_banner_timeout(mut self, timeout: Duration) -> Self {
        self.error_banner_timeout = timeout;
        self
    }

    /// Sets the success banner delay.
    pub fn with_success_banner_timeout(mut self, timeout: Duration) -> Self {
        self.success_banner_timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            error_banner_timeout: DEFAULT_ERROR_BANNER_TIMEOUT,
            success_banner_timeout: DEFAULT_SUCCESS_BANNER_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_falls_back_to_default() {
        let config = Config::from_api_url(None).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
        assert_eq!(config.error_banner_timeout, Duration::from_secs(8));
        assert_eq!(config.success_banner_timeout, Duration::from_secs(6));
    }

    #[test]
    fn test_blank_falls_back_to_default() {
        let config = Config::from_api_url(Some("   ")).unwrap();
        assert_eq!(config.api_url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_custom_url() {
        let config = Config::from_api_url(Some("https://api.example.com/v1/users")).unwrap();
        assert_eq!(config.api_url.host_str(), Some("api.example.com"));
        assert_eq!(config.api_url.path(), "/v1/users");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = Config::from_api_url(Some("not a url")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(API_URL_VAR));
        assert!(msg.contains("not a url"));
    }
}
