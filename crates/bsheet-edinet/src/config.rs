//! Client configuration.

use bsheet_core::{ExtractError, Result};
use std::fmt;
use std::time::Duration;

/// EDINET API v2 base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://disclosure.edinet-fsa.go.jp/api/v2";

/// EDINET code list archive URL.
pub const DEFAULT_CODE_LIST_URL: &str =
    "https://disclosure2dl.edinet-fsa.go.jp/searchdocument/codelist/Edinetcode.zip";

/// Environment variable holding the API subscription key.
pub const API_KEY_ENV: &str = "EDINET_API_KEY";

const DEFAULT_USER_AGENT: &str = concat!("bsheet/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_CODE_LIST_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Settings for [`EdinetClient`](crate::EdinetClient).
#[derive(Clone)]
pub struct EdinetConfig {
    pub(crate) api_key: String,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) min_interval: Duration,
    pub(crate) code_list_ttl: Duration,
    pub(crate) api_base_url: String,
    pub(crate) code_list_url: String,
}

impl fmt::Debug for EdinetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdinetConfig")
            .field("api_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("min_interval", &self.min_interval)
            .field("code_list_ttl", &self.code_list_ttl)
            .field("api_base_url", &self.api_base_url)
            .field("code_list_url", &self.code_list_url)
            .finish()
    }
}

impl EdinetConfig {
    /// Creates a configuration with defaults and the given subscription key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_interval: DEFAULT_MIN_INTERVAL,
            code_list_ttl: DEFAULT_CODE_LIST_TTL,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            code_list_url: DEFAULT_CODE_LIST_URL.to_string(),
        }
    }

    /// Reads the subscription key from `EDINET_API_KEY`.
    ///
    /// # Errors
    /// Returns [`ExtractError::InvalidParameter`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(ExtractError::InvalidParameter(format!(
                "{API_KEY_ENV} is not set"
            ))),
        }
    }

    /// Sets the user agent sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the minimum interval between two requests.
    #[must_use]
    pub const fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Sets how long a downloaded code list stays valid.
    #[must_use]
    pub const fn with_code_list_ttl(mut self, ttl: Duration) -> Self {
        self.code_list_ttl = ttl;
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the code list archive URL.
    #[must_use]
    pub fn with_code_list_url(mut self, url: impl Into<String>) -> Self {
        self.code_list_url = url.into();
        self
    }

    /// Code list time-to-live.
    #[must_use]
    pub const fn code_list_ttl(&self) -> Duration {
        self.code_list_ttl
    }

    /// API base URL.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let config = EdinetConfig::new("secret-subscription-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-subscription-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = EdinetConfig::new("k")
            .with_api_base_url("http://127.0.0.1:8080/api/v2/")
            .with_min_interval(Duration::ZERO)
            .with_code_list_ttl(Duration::from_secs(60));
        assert_eq!(config.api_base_url(), "http://127.0.0.1:8080/api/v2");
        assert_eq!(config.code_list_ttl(), Duration::from_secs(60));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(EdinetConfig::new("k").code_list_url, DEFAULT_CODE_LIST_URL);
    }
}
