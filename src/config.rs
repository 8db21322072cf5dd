//! Harness configuration

use crate::executor::RetryPolicy;
use crate::waiting::WaitBudget;
use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Full configuration for one test run
///
/// Defaults target the Russian-language Wikipedia through a locally running
/// chromedriver. Every field can be overridden through `WIKI_E2E_*`
/// environment variables or CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the target Wikipedia instance
    pub base_url: String,

    /// WebDriver endpoint
    pub webdriver_url: String,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Substring expected in the landing page title
    pub landing_title_marker: String,

    /// Time budget for condition waits
    pub waits: WaitBudget,

    /// Stale-reference retry ceiling
    pub retry: RetryPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ru.wikipedia.org".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            landing_title_marker: "Википедия".to_string(),
            waits: WaitBudget::default(),
            retry: RetryPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Defaults with `WIKI_E2E_*` environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = env::var("WIKI_E2E_BASE_URL") {
            config.base_url = value;
        }
        if let Ok(value) = env::var("WIKI_E2E_WEBDRIVER_URL") {
            config.webdriver_url = value;
        }
        if let Ok(value) = env::var("WIKI_E2E_HEADLESS") {
            config.headless = value != "0" && !value.eq_ignore_ascii_case("false");
        }
        if let Ok(value) = env::var("WIKI_E2E_TITLE_MARKER") {
            config.landing_title_marker = value;
        }
        if let Some(ms) = env_u64("WIKI_E2E_TIMEOUT_MS") {
            config.waits.timeout_ms = ms;
        }
        if let Some(ms) = env_u64("WIKI_E2E_POLL_MS") {
            config.waits.poll_interval_ms = ms;
        }
        if let Some(ms) = env_u64("WIKI_E2E_SETTLE_MS") {
            config.waits.settle_ms = ms;
        }
        if let Some(n) = env_u64("WIKI_E2E_MAX_ATTEMPTS") {
            config.retry.max_attempts = n as u32;
        }
        config
    }

    /// Reject configurations the run could not start with
    pub fn validate(&self) -> Result<(), HarnessError> {
        Url::parse(&self.base_url)
            .map_err(|err| HarnessError::Init(format!("invalid base URL {}: {}", self.base_url, err)))?;
        Url::parse(&self.webdriver_url).map_err(|err| {
            HarnessError::Init(format!("invalid WebDriver URL {}: {}", self.webdriver_url, err))
        })?;
        if self.retry.max_attempts == 0 {
            return Err(HarnessError::Init("max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_match_the_reference_constants() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "https://ru.wikipedia.org");
        assert_eq!(config.waits.timeout_ms, 10_000);
        assert_eq!(config.waits.settle_ms, 1500);
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn env_overrides_apply() {
        env::set_var("WIKI_E2E_BASE_URL", "https://en.wikipedia.org");
        env::set_var("WIKI_E2E_MAX_ATTEMPTS", "5");
        env::set_var("WIKI_E2E_HEADLESS", "false");
        let config = HarnessConfig::from_env();
        env::remove_var("WIKI_E2E_BASE_URL");
        env::remove_var("WIKI_E2E_MAX_ATTEMPTS");
        env::remove_var("WIKI_E2E_HEADLESS");

        assert_eq!(config.base_url, "https://en.wikipedia.org");
        assert_eq!(config.retry.max_attempts, 5);
        assert!(!config.headless);
    }

    #[test]
    fn invalid_base_url_fails_validation() {
        let config = HarnessConfig {
            base_url: "not a url".into(),
            ..HarnessConfig::default()
        };
        assert!(matches!(config.validate(), Err(HarnessError::Init(_))));
    }

    #[test]
    fn zero_attempts_fails_validation() {
        let mut config = HarnessConfig::default();
        config.retry.max_attempts = 0;
        assert!(matches!(config.validate(), Err(HarnessError::Init(_))));
    }
}
