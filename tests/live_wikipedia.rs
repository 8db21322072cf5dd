//! Real-browser scenarios against a live Wikipedia instance
//!
//! Disabled by default: set `WIKI_E2E_LIVE=1` and have a WebDriver endpoint
//! running (chromedriver, default http://localhost:9515) to enable. The
//! standard `WIKI_E2E_*` overrides apply.

use anyhow::Result;
use serial_test::serial;
use std::env;
use wiki_e2e::{Harness, HarnessConfig, Session};

const TOGGLE: &str = "WIKI_E2E_LIVE";

fn live_enabled() -> bool {
    matches!(env::var(TOGGLE), Ok(value) if value == "1")
}

async fn with_harness<F, Fut>(run: F) -> Result<()>
where
    F: FnOnce(Harness) -> Fut,
    Fut: std::future::Future<Output = Result<(), wiki_e2e::HarnessError>>,
{
    let config = HarnessConfig::from_env();
    let session = Session::start(&config).await?;
    let harness = Harness::new(session.browser(), config);

    // capture the outcome first so the session is released on every path
    let outcome = run(harness).await;
    session.close().await?;
    outcome.map_err(Into::into)
}

#[tokio::test]
#[serial]
async fn selenium_query_yields_results_or_article() -> Result<()> {
    if !live_enabled() {
        eprintln!("skipping live test (set {TOGGLE}=1 to enable)");
        return Ok(());
    }
    with_harness(|harness| async move { harness.search_results_and_first_hit().await }).await
}

#[tokio::test]
#[serial]
async fn every_sample_query_finds_content() -> Result<()> {
    if !live_enabled() {
        eprintln!("skipping live test (set {TOGGLE}=1 to enable)");
        return Ok(());
    }
    with_harness(|harness| async move {
        for query in wiki_e2e::SAMPLE_QUERIES {
            harness.parameterized_search(query).await?;
        }
        Ok(())
    })
    .await
}

#[tokio::test]
#[serial]
async fn full_suite_passes() -> Result<()> {
    if !live_enabled() {
        eprintln!("skipping live test (set {TOGGLE}=1 to enable)");
        return Ok(());
    }
    let config = HarnessConfig::from_env();
    let session = Session::start(&config).await?;
    let harness = Harness::new(session.browser(), config);

    let summary = harness.run_all().await;
    session.close().await?;

    assert!(
        summary.all_passed(),
        "failed scenarios: {:?}",
        summary
            .failed
            .iter()
            .map(|(name, err)| format!("{name}: {err}"))
            .collect::<Vec<_>>()
    );
    Ok(())
}
