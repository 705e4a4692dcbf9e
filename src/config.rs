//! Client configuration parsed from environment variables.

use crate::error::ConfigError;
use crate::net::types::ListScope;
use crate::session::Session;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub full_name: Option<String>,
    pub list_scope: ListScope,
    pub timeouts: HttpTimeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token: None,
            full_name: None,
            list_scope: ListScope::All,
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// All optional:
    /// - `GRAINFLOW_API_URL`: donation service base URL, default `http://localhost:5000`
    /// - `GRAINFLOW_TOKEN`: bearer credential of the signed-in donor
    /// - `GRAINFLOW_FULL_NAME`: display name of the signed-in donor
    /// - `GRAINFLOW_LIST_SCOPE`: `all` (default) or `mine`
    /// - `GRAINFLOW_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GRAINFLOW_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the list scope is not recognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = normalize_api_url(
            &std::env::var("GRAINFLOW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
        );
        let list_scope = parse_list_scope(std::env::var("GRAINFLOW_LIST_SCOPE").ok().as_deref())?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("GRAINFLOW_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GRAINFLOW_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            token: std::env::var("GRAINFLOW_TOKEN").ok(),
            full_name: std::env::var("GRAINFLOW_FULL_NAME").ok(),
            list_scope,
            timeouts,
        })
    }

    /// Session context described by this config.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.token.clone(), self.full_name.clone())
    }
}

/// Trim whitespace and trailing slashes so endpoint paths join cleanly.
#[must_use]
pub fn normalize_api_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Parse a list scope name; `None` selects the public list.
///
/// # Errors
///
/// Returns an error for names other than `all` and `mine`.
pub fn parse_list_scope(raw: Option<&str>) -> Result<ListScope, ConfigError> {
    match raw.map(str::trim).unwrap_or("all") {
        "all" | "" => Ok(ListScope::All),
        "mine" => Ok(ListScope::Mine),
        other => Err(ConfigError::Parse(format!(
            "unknown GRAINFLOW_LIST_SCOPE '{other}' (expected 'all' or 'mine')"
        ))),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
