//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STORE_API_URL` - Base URL of the store API (e.g., <http://localhost:3333>)
//!
//! ## Optional
//! - `CART_STORAGE_PATH` - Path of the persisted cart mirror (default: cart.json)
//! - `STORE_API_TIMEOUT_SECS` - HTTP request timeout in seconds (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_PATH: &str = "cart.json";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart engine configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the store API
    pub api_base_url: Url,
    /// Path of the persisted cart mirror
    pub storage_path: PathBuf,
    /// Timeout applied to every store API request
    pub request_timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_required_env("STORE_API_URL")?)?;
        let storage_path =
            PathBuf::from(get_env_or_default("CART_STORAGE_PATH", DEFAULT_STORAGE_PATH));
        let timeout_secs = get_env_or_default("STORE_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STORE_API_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_base_url,
            storage_path,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, bypassing the environment.
    ///
    /// Useful for embedding callers and tests that already know the API
    /// address and mirror path.
    #[must_use]
    pub fn new(api_base_url: Url, storage_path: PathBuf, request_timeout: Duration) -> Self {
        Self {
            api_base_url,
            storage_path,
            request_timeout,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the store API base URL.
///
/// A trailing slash matters to `Url::join`, so one is appended when absent;
/// `http://host/api` and `http://host/api/` configure the same client.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("STORE_API_URL".to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_appends_slash() {
        let url = parse_base_url("http://localhost:3333/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/api/");
    }

    #[test]
    fn test_parse_base_url_keeps_existing_slash() {
        let url = parse_base_url("http://localhost:3333/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let result = parse_base_url("not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_joined_routes_preserve_base_path() {
        let url = parse_base_url("http://localhost:3333/api").unwrap();
        let joined = url.join("products/1").unwrap();
        assert_eq!(joined.as_str(), "http://localhost:3333/api/products/1");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("STORE_API_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: STORE_API_URL"
        );
    }
}
