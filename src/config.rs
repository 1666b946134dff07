//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Variables
//!
//! ```bash
//! export WQXR_API_KEY="..."                       # upstream credential
//! export METADATA_SOURCES="wqxr=WQXR,wnyc=WNYC"   # id=Display Name pairs
//! ```
//!
//! `WQXR_API_KEY` is not required to start: without it the service runs, reports
//! itself degraded on `/health`, and every metadata request fails pre-flight
//! with a configuration error.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `UPSTREAM_BASE_URL` - Monitoring gateway (default: production gateway)
//! - `UPSTREAM_USER_AGENT` - User agent for upstream calls (default: `WQXR-Metadata-Viewer/1.0`)
//! - `FETCH_TIMEOUT_SECONDS` - Per-source fetch timeout (default: 10, max: 300)
//! - `METADATA_SOURCES` - Source catalog (default: `wqxr=WQXR,wnyc=WNYC,tunein-test=TuneIn Test`)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::domain::source::DEFAULT_SOURCES;
use crate::domain::{ApiKey, SourceCatalog};
use crate::infrastructure::upstream::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential (`WQXR_API_KEY`). Blank counts as unset.
    pub api_key: Option<ApiKey>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub upstream_base_url: String,
    pub user_agent: String,
    pub fetch_timeout_seconds: u64,
    pub sources: SourceCatalog,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `METADATA_SOURCES` cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("WQXR_API_KEY").ok().and_then(ApiKey::new);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let upstream_base_url =
            env::var("UPSTREAM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let user_agent =
            env::var("UPSTREAM_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let sources = Self::load_sources().context("Failed to load METADATA_SOURCES")?;

        Ok(Self {
            api_key,
            listen_addr,
            log_level,
            log_format,
            upstream_base_url,
            user_agent,
            fetch_timeout_seconds,
            sources,
        })
    }

    /// Parses the source catalog, falling back to the built-in set.
    fn load_sources() -> Result<SourceCatalog> {
        let definition =
            env::var("METADATA_SOURCES").unwrap_or_else(|_| DEFAULT_SOURCES.to_string());

        Ok(SourceCatalog::parse(&definition)?)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `upstream_base_url` is not an http(s) URL
    /// - `fetch_timeout_seconds` is outside 1..=300
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let base = url::Url::parse(&self.upstream_base_url).with_context(|| {
            format!(
                "UPSTREAM_BASE_URL is not a valid URL: '{}'",
                self.upstream_base_url
            )
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!(
                "UPSTREAM_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.upstream_base_url
            );
        }

        if self.fetch_timeout_seconds == 0 || self.fetch_timeout_seconds > 300 {
            anyhow::bail!(
                "FETCH_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.fetch_timeout_seconds
            );
        }

        if self.user_agent.trim().is_empty() {
            anyhow::bail!("UPSTREAM_USER_AGENT must not be empty");
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.upstream_base_url);

        match &self.api_key {
            Some(key) => tracing::info!("  API key: {}", mask_secret(key.expose())),
            None => tracing::warn!("  API key: not set, metadata requests will fail"),
        }

        let ids: Vec<&str> = self.sources.sources().iter().map(|s| s.id.as_str()).collect();
        tracing::info!("  Sources: {}", ids.join(", "));
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_seconds);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks a secret for logging, keeping only its last four characters.
///
/// - `abcdefgh1234` → `***1234`
/// - secrets of eight characters or fewer → `***`
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("***{tail}")
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if the source catalog is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "WQXR_API_KEY",
        "LISTEN",
        "LOG_FORMAT",
        "UPSTREAM_BASE_URL",
        "UPSTREAM_USER_AGENT",
        "FETCH_TIMEOUT_SECONDS",
        "METADATA_SOURCES",
        "RUST_LOG",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    fn valid_config() -> Config {
        Config {
            api_key: ApiKey::new("test-key"),
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            upstream_base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_seconds: 10,
            sources: SourceCatalog::default(),
        }
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdefgh1234"), "***1234");
        assert_eq!(mask_secret("short"), "***");
        assert_eq!(mask_secret(""), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "127.0.0.1:8080".to_string();

        config.upstream_base_url = "ftp://gateway.test".to_string();
        assert!(config.validate().is_err());
        config.upstream_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
        config.upstream_base_url = "http://localhost:9000".to_string();
        assert!(config.validate().is_ok());

        config.fetch_timeout_seconds = 0;
        assert!(config.validate().is_err());
        config.fetch_timeout_seconds = 301;
        assert!(config.validate().is_err());
        config.fetch_timeout_seconds = 300;
        assert!(config.validate().is_ok());

        config.user_agent = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_credential_is_valid_config() {
        let mut config = valid_config();
        config.api_key = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = Config::from_env().unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.upstream_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.sources, SourceCatalog::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("WQXR_API_KEY", "secret-value");
            env::set_var("FETCH_TIMEOUT_SECONDS", "3");
            env::set_var("METADATA_SOURCES", "wqxr=WQXR,wnycfm=WNYC FM");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.api_key.as_ref().map(ApiKey::expose), Some("secret-value"));
        assert_eq!(config.fetch_timeout_seconds, 3);
        let names: Vec<&str> = config
            .sources
            .sources()
            .iter()
            .map(|s| s.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["WQXR", "WNYC FM"]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_credential_and_bad_timeout() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("WQXR_API_KEY", "  ");
            env::set_var("FETCH_TIMEOUT_SECONDS", "soon");
        }

        let config = Config::from_env().unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.fetch_timeout_seconds, 10);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_sources_fail_to_load() {
        clear_env();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("METADATA_SOURCES", "wqxr=A,wqxr=B");
        }

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
