//! Browser session lifecycle
//!
//! Exactly one session per test run. The run owns it exclusively and must
//! release it once, on teardown, regardless of scenario outcomes.

use crate::config::HarnessConfig;
use crate::driver::Browser;
use crate::errors::HarnessError;
use crate::webdriver::WdBrowser;
use std::sync::Arc;
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{info, warn};

/// A live connection to one browser instance
pub struct Session {
    driver: WebDriver,
    browser: Arc<dyn Browser>,
    closed: bool,
}

impl Session {
    /// Establish the automation session
    ///
    /// Failure here is fatal to the run; there is no retry.
    pub async fn start(config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;

        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()
                .map_err(|err| HarnessError::Init(err.to_string()))?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .map_err(|err| {
                HarnessError::Init(format!(
                    "could not connect to WebDriver at {}: {}",
                    config.webdriver_url, err
                ))
            })?;

        info!(webdriver = %config.webdriver_url, "browser session established");
        let browser: Arc<dyn Browser> = Arc::new(WdBrowser::new(driver.clone()));
        Ok(Self {
            driver,
            browser,
            closed: false,
        })
    }

    /// Shared handle to the browser capability
    pub fn browser(&self) -> Arc<dyn Browser> {
        Arc::clone(&self.browser)
    }

    /// Release the session; must be called exactly once on teardown
    pub async fn close(mut self) -> Result<(), HarnessError> {
        self.closed = true;
        self.driver.clone().quit().await?;
        info!("browser session closed");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.closed {
            // quit() is async and cannot run here; the remote session leaks
            warn!("session dropped without close(); browser may be left running");
        }
    }
}
