//! Resilient action execution
//!
//! A staleness failure means the remote document was replaced between the
//! moment an element reference was obtained and the moment it was used. That
//! race is inherent to driving a live, independently-mutating UI, so it is
//! retried with freshly built page handles. Every other failure class
//! (assertion, missing element, timeout) would be masked by a retry and is
//! propagated after a single attempt.

use crate::driver::Browser;
use crate::errors::HarnessError;
use crate::waiting::{settle_document, WaitBudget};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Retry ceiling for stale-reference recovery
///
/// Deliberately single-digit: staleness that persists past a few attempts
/// indicates a structural problem (wrong page, broken selector), not a
/// timing race.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

/// Run an action with stale-reference recovery
///
/// `attempt_fn` receives the 1-based attempt number and must construct a
/// fresh page model (fresh handle bundle) on every invocation; the executor
/// never reuses handles across attempts. Between attempts the document is
/// given a chance to stabilize before the next handle bundle is resolved.
pub async fn execute_with_retry<T, F, Fut>(
    browser: &Arc<dyn Browser>,
    waits: &WaitBudget,
    policy: &RetryPolicy,
    mut attempt_fn: F,
) -> Result<T, HarnessError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, HarnessError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        debug!(attempt, max_attempts, "executing action attempt");
        match attempt_fn(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_stale() && attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    %err,
                    "stale element during action; rebuilding page handles"
                );
                settle_document(browser.as_ref(), waits).await?;
                attempt += 1;
            }
            Err(err) => {
                if err.is_stale() {
                    warn!(max_attempts, "stale-reference retries exhausted");
                }
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_three_attempts() {
        assert_eq!(RetryPolicy::default().max_attempts, 3);
    }
}
