//! Bounded condition waiting
//!
//! Remote rendering is asynchronous and unsynchronized with the harness, so
//! the only portable way to bound a wait is to poll observable state with a
//! ceiling. A raw "DOM ready" signal proves the initial parse finished, not
//! that script-driven content has rendered, hence the fixed settling delay
//! applied once before polling begins.

use crate::driver::Browser;
use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

const READY_STATE_SCRIPT: &str = "return document.readyState";

/// Time budget for one bounded wait
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitBudget {
    /// Ceiling for the whole wait (milliseconds)
    pub timeout_ms: u64,

    /// Interval between predicate evaluations (milliseconds)
    pub poll_interval_ms: u64,

    /// Settling delay applied once before polling starts (milliseconds)
    pub settle_ms: u64,
}

impl Default for WaitBudget {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,     // 10 seconds, matching the driver-side wait
            poll_interval_ms: 250,  // 4 polls per second
            settle_ms: 1500,        // absorb script-driven rendering startup
        }
    }
}

/// Poll `predicate` until it returns true or the budget's timeout elapses
///
/// The predicate is always evaluated at least once. Predicate errors
/// propagate unchanged; a timeout yields [`HarnessError::WaitTimeout`], which
/// the caller decides how to interpret.
pub async fn await_condition<F, Fut>(
    budget: &WaitBudget,
    mut predicate: F,
) -> Result<(), HarnessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, HarnessError>>,
{
    if budget.settle_ms > 0 {
        sleep(Duration::from_millis(budget.settle_ms)).await;
    }

    let deadline = Instant::now() + Duration::from_millis(budget.timeout_ms);
    let mut polls = 0u32;
    loop {
        polls += 1;
        if predicate().await? {
            debug!(polls, "condition met");
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(HarnessError::WaitTimeout(format!(
                "condition not met within {}ms ({} polls)",
                budget.timeout_ms, polls
            )));
        }
        sleep(Duration::from_millis(budget.poll_interval_ms)).await;
    }
}

/// Wait until the document reports `readyState === "complete"`
pub async fn wait_for_document_ready(
    browser: &dyn Browser,
    budget: &WaitBudget,
) -> Result<(), HarnessError> {
    await_condition(budget, move || async move {
        let state = browser.execute(READY_STATE_SCRIPT).await?;
        Ok(state.as_str() == Some("complete"))
    })
    .await
}

/// Document-ready wait with the timeout downgraded to a warning
///
/// A page that loaded slightly slower than the budget must not fail a
/// scenario on its own; the scenario's assertions are the arbiter. Driver
/// failures still propagate.
pub async fn settle_document(browser: &dyn Browser, budget: &WaitBudget) -> Result<(), HarnessError> {
    match wait_for_document_ready(browser, budget).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_timeout() => {
            warn!(%err, "document not reported complete within budget; proceeding");
            Ok(())
        }
        Err(err) => Err(err),
    }
}
