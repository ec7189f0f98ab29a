//! Environment-driven configuration.
//!
//! Quote-source credentials are optional: a missing key simply disables that
//! adapter in the acquisition waterfall, it is never a startup error.

use std::env;
use std::time::Duration;

/// Get the current environment (production, sandbox, etc.)
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Alpha Vantage API key; `None` disables the primary source.
    pub alpha_vantage_key: Option<String>,
    /// Override for the Alpha Vantage base URL (used by tests).
    pub alpha_vantage_url: Option<String>,
    /// Override for the Yahoo Finance base URL (used by tests).
    pub yahoo_url: Option<String>,
    /// Per-adapter fetch timeout inside the waterfall.
    pub source_timeout: Duration,
    /// Minimum candle count for a source response to be accepted.
    pub min_rows: usize,
    /// HTTP server port.
    pub http_port: u16,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        let alpha_vantage_key = env::var("ALPHA_VANTAGE_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());

        let source_timeout = env::var("SOURCE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let min_rows = env::var("MIN_SOURCE_ROWS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let http_port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);

        Self {
            alpha_vantage_key,
            alpha_vantage_url: env::var("ALPHA_VANTAGE_URL").ok(),
            yahoo_url: env::var("YAHOO_URL").ok(),
            source_timeout,
            min_rows,
            http_port,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha_vantage_key: None,
            alpha_vantage_url: None,
            yahoo_url: None,
            source_timeout: Duration::from_secs(10),
            min_rows: 5,
            http_port: 8080,
        }
    }
}
