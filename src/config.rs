//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export PROVIDER_BASE_URL="https://sv.link/api/v2"
//! export PROVIDER_DOMAIN="sv.link"
//! export PROVIDER_TIMEOUT_SECS="15"
//! ```
//!
//! No variable is required: the defaults talk to the public sv.link API.
//! The provider API key is never part of the server configuration; callers
//! send it with every request.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from forwarding headers (default: `false`)
//! - `PROVIDER_BASE_URL` - Provider API root (default: `https://sv.link/api/v2`)
//! - `PROVIDER_DOMAIN` - Short-link domain (default: `sv.link`)
//! - `PROVIDER_TIMEOUT_SECS` - Per-call timeout (default: 15, 1..=120)
//! - `PROVIDER_PAGE_SIZE` - Listing page size (default: 100, 1..=500)
//! - `PROVIDER_MAX_PAGES` - Listing page ceiling (default: 20, 1..=1000)
//! - `PROVIDER_REQUEST_DELAY_MS` - Pause between create calls (default: 0, max 10000)
//! - `PROVIDER_USER_AGENT` - Outbound User-Agent (default: `sv-link-batch/<version>`)
//! - `MAX_BATCH_SIZE` - Largest accepted input list (default: 500, 1..=10000)

use anyhow::Result;
use std::env;
use std::time::Duration;

use crate::domain::context::ProviderSettings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── Provider settings ───────────────────────────────────────────────────
    pub provider_base_url: String,
    pub provider_domain: String,
    pub provider_timeout_secs: u64,
    pub provider_page_size: usize,
    pub provider_max_pages: usize,
    pub provider_request_delay_ms: u64,
    pub provider_user_agent: String,

    /// Largest list of URLs, links or changes accepted in one request.
    pub max_batch_size: usize,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let provider_base_url = env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| "https://sv.link/api/v2".to_string());
        let provider_domain =
            env::var("PROVIDER_DOMAIN").unwrap_or_else(|_| "sv.link".to_string());

        let provider_timeout_secs = parse_var("PROVIDER_TIMEOUT_SECS", 15);
        let provider_page_size = parse_var("PROVIDER_PAGE_SIZE", 100);
        let provider_max_pages = parse_var("PROVIDER_MAX_PAGES", 20);
        let provider_request_delay_ms = parse_var("PROVIDER_REQUEST_DELAY_MS", 0);

        let provider_user_agent = env::var("PROVIDER_USER_AGENT")
            .unwrap_or_else(|_| default_user_agent());

        let max_batch_size = parse_var("MAX_BATCH_SIZE", 500);

        Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            provider_base_url,
            provider_domain,
            provider_timeout_secs,
            provider_page_size,
            provider_max_pages,
            provider_request_delay_ms,
            provider_user_agent,
            max_batch_size,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `provider_base_url` is not an `http(s)://` URL
    /// - any numeric provider setting is outside its range
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

        if !self.provider_base_url.starts_with("http://")
            && !self.provider_base_url.starts_with("https://")
        {
            anyhow::bail!(
                "PROVIDER_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.provider_base_url
            );
        }

        if self.provider_domain.trim().is_empty() {
            anyhow::bail!("PROVIDER_DOMAIN must not be empty");
        }

        if !(1..=120).contains(&self.provider_timeout_secs) {
            anyhow::bail!(
                "PROVIDER_TIMEOUT_SECS must be between 1 and 120, got {}",
                self.provider_timeout_secs
            );
        }

        if !(1..=500).contains(&self.provider_page_size) {
            anyhow::bail!(
                "PROVIDER_PAGE_SIZE must be between 1 and 500, got {}",
                self.provider_page_size
            );
        }

        if !(1..=1000).contains(&self.provider_max_pages) {
            anyhow::bail!(
                "PROVIDER_MAX_PAGES must be between 1 and 1000, got {}",
                self.provider_max_pages
            );
        }

        if self.provider_request_delay_ms > 10_000 {
            anyhow::bail!(
                "PROVIDER_REQUEST_DELAY_MS is too large (max: 10000), got {}",
                self.provider_request_delay_ms
            );
        }

        if !(1..=10_000).contains(&self.max_batch_size) {
            anyhow::bail!(
                "MAX_BATCH_SIZE must be between 1 and 10000, got {}",
                self.max_batch_size
            );
        }

        Ok(())
    }

    /// Settings handed to every request context.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            base_url: self.provider_base_url.trim_end_matches('/').to_string(),
            domain: self.provider_domain.trim().to_string(),
            timeout: Duration::from_secs(self.provider_timeout_secs),
            page_size: self.provider_page_size,
            max_pages: self.provider_max_pages,
            request_delay: Duration::from_millis(self.provider_request_delay_ms),
            max_batch_size: self.max_batch_size,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Provider: {}", self.provider_base_url);
        tracing::info!("  Domain: {}", self.provider_domain);
        tracing::info!("  Timeout: {}s", self.provider_timeout_secs);
        tracing::info!(
            "  Listing: {} per page, at most {} pages",
            self.provider_page_size,
            self.provider_max_pages
        );
        tracing::info!("  Request delay: {}ms", self.provider_request_delay_ms);
        tracing::info!("  Max batch size: {}", self.max_batch_size);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            provider_base_url: "https://sv.link/api/v2".to_string(),
            provider_domain: "sv.link".to_string(),
            provider_timeout_secs: 15,
            provider_page_size: 100,
            provider_max_pages: 20,
            provider_request_delay_ms: 0,
            provider_user_agent: default_user_agent(),
            max_batch_size: 500,
        }
    }
}

/// `sv-link-batch/<crate version>`.
pub fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "PROVIDER_BASE_URL",
        "PROVIDER_DOMAIN",
        "PROVIDER_TIMEOUT_SECS",
        "PROVIDER_PAGE_SIZE",
        "PROVIDER_MAX_PAGES",
        "PROVIDER_REQUEST_DELAY_MS",
        "MAX_BATCH_SIZE",
        "BEHIND_PROXY",
    ];

    fn clear_vars() {
        // SAFETY: callers are #[serial]
        unsafe {
            for var in VARS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());
        config.listen_addr = "0.0.0.0:3000".to_string();

        config.provider_base_url = "ftp://sv.link".to_string();
        assert!(config.validate().is_err());
        config.provider_base_url = "http://localhost:8080/api/v2".to_string();
        assert!(config.validate().is_ok());

        config.provider_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.provider_timeout_secs = 15;

        config.provider_page_size = 501;
        assert!(config.validate().is_err());
        config.provider_page_size = 100;

        config.provider_request_delay_ms = 10_001;
        assert!(config.validate().is_err());
        config.provider_request_delay_ms = 100;

        config.max_batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_vars();

        let config = Config::from_env();

        assert_eq!(config.provider_base_url, "https://sv.link/api/v2");
        assert_eq!(config.provider_domain, "sv.link");
        assert_eq!(config.provider_timeout_secs, 15);
        assert_eq!(config.max_batch_size, 500);
        assert!(!config.behind_proxy);
        assert!(config.provider_user_agent.starts_with("sv-link-batch/"));
    }

    #[test]
    #[serial]
    fn test_provider_settings_from_env() {
        clear_vars();
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("PROVIDER_BASE_URL", "http://127.0.0.1:9000/api/v2/");
            env::set_var("PROVIDER_TIMEOUT_SECS", "3");
            env::set_var("PROVIDER_PAGE_SIZE", "50");
            env::set_var("PROVIDER_REQUEST_DELAY_MS", "100");
            env::set_var("BEHIND_PROXY", "TRUE");
        }

        let config = Config::from_env();
        let settings = config.provider_settings();

        assert!(config.behind_proxy);
        assert_eq!(settings.base_url, "http://127.0.0.1:9000/api/v2");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.request_delay, Duration::from_millis(100));

        clear_vars();
    }

    #[test]
    #[serial]
    fn test_unparseable_numbers_fall_back() {
        clear_vars();
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PROVIDER_MAX_PAGES", "many");
        }

        assert_eq!(Config::from_env().provider_max_pages, 20);

        clear_vars();
    }
}
