//! Error types for the harness

use thiserror::Error;
use thirtyfour::error::WebDriverError;

/// Failure taxonomy for harness operations
///
/// Only `Stale` is recoverable; the resilient executor retries it with fresh
/// page handles. Everything else propagates unchanged to the scenario
/// boundary.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Element reference invalidated by a document replacement
    #[error("stale element reference: {0}")]
    Stale(String),

    /// The awaited condition never became true within budget
    #[error("wait timed out: {0}")]
    WaitTimeout(String),

    /// Observed state does not match the expected invariant
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The automation session could not be established
    #[error("session initialization failed: {0}")]
    Init(String),

    /// Any other automation failure (missing element, protocol error)
    #[error("driver error: {0}")]
    Driver(String),
}

impl HarnessError {
    /// Check whether this failure is recoverable by the retry policy
    pub fn is_stale(&self) -> bool {
        matches!(self, HarnessError::Stale(_))
    }

    /// Check whether this is a wait timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, HarnessError::WaitTimeout(_))
    }

    pub fn assertion(context: impl Into<String>) -> Self {
        HarnessError::Assertion(context.into())
    }
}

impl From<WebDriverError> for HarnessError {
    fn from(err: WebDriverError) -> Self {
        match &err {
            WebDriverError::StaleElementReference(_) => HarnessError::Stale(err.to_string()),
            _ => HarnessError::Driver(err.to_string()),
        }
    }
}
