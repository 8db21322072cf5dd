//! Executor and waiting behavior against a scripted in-memory browser
//!
//! No real WebDriver is involved; the mock implements the capability traits
//! directly so the retry and synchronization contracts can be pinned down.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use wiki_e2e::pages::LandingPage;
use wiki_e2e::{
    execute_with_retry, Browser, Element, ElementHandle, Harness, HarnessConfig, HarnessError,
    RetryPolicy, Selector, WaitBudget,
};

struct MockElement {
    text: String,
}

#[async_trait]
impl Element for MockElement {
    async fn click(&self) -> Result<(), HarnessError> {
        Ok(())
    }

    async fn type_text(&self, _text: &str) -> Result<(), HarnessError> {
        Ok(())
    }

    async fn text(&self) -> Result<String, HarnessError> {
        Ok(self.text.clone())
    }

    async fn is_displayed(&self) -> Result<bool, HarnessError> {
        Ok(true)
    }
}

/// A browser whose observable state is fixed to "landing page, loaded"
struct MockBrowser {
    gotos: Mutex<Vec<String>>,
    on_main_page: AtomicBool,
}

impl MockBrowser {
    fn new() -> Self {
        Self {
            gotos: Mutex::new(Vec::new()),
            on_main_page: AtomicBool::new(true),
        }
    }

    fn goto_count(&self) -> usize {
        self.gotos.lock().unwrap().len()
    }
}

#[async_trait]
impl Browser for MockBrowser {
    async fn goto(&self, url: &str) -> Result<(), HarnessError> {
        self.gotos.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String, HarnessError> {
        Ok(self
            .gotos
            .lock()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn title(&self) -> Result<String, HarnessError> {
        Ok("Википедия — свободная энциклопедия".to_string())
    }

    async fn page_source(&self) -> Result<String, HarnessError> {
        Ok("<html><a>English</a></html>".to_string())
    }

    async fn execute(&self, script: &str) -> Result<Value, HarnessError> {
        if script.contains("readyState") {
            Ok(json!("complete"))
        } else if script.contains("wgNamespaceNumber") {
            Ok(json!(false))
        } else if script.contains("wgCanonicalSpecialPageName") {
            Ok(json!(false))
        } else if script.contains("wgIsMainPage") {
            Ok(json!(self.on_main_page.load(Ordering::SeqCst)))
        } else {
            Ok(Value::Null)
        }
    }

    async fn find(&self, _selector: &Selector) -> Result<ElementHandle, HarnessError> {
        Ok(Box::new(MockElement {
            text: "Заглавная страница".to_string(),
        }))
    }

    async fn find_all(&self, _selector: &Selector) -> Result<Vec<ElementHandle>, HarnessError> {
        Ok(vec![Box::new(MockElement {
            text: "Заглавная страница".to_string(),
        })])
    }
}

fn fast_waits() -> WaitBudget {
    WaitBudget {
        timeout_ms: 200,
        poll_interval_ms: 10,
        settle_ms: 0,
    }
}

fn fast_config(base_url: &str) -> HarnessConfig {
    HarnessConfig {
        base_url: base_url.to_string(),
        waits: fast_waits(),
        ..HarnessConfig::default()
    }
}

fn mock_browser() -> (Arc<MockBrowser>, Arc<dyn Browser>) {
    let mock = Arc::new(MockBrowser::new());
    let browser: Arc<dyn Browser> = mock.clone();
    (mock, browser)
}

#[tokio::test]
async fn retry_stops_after_exhausting_attempts() {
    let (_, browser) = mock_browser();
    let policy = RetryPolicy { max_attempts: 3 };
    let attempts = AtomicU32::new(0);

    let result: Result<(), _> = execute_with_retry(&browser, &fast_waits(), &policy, |_| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async { Err(HarnessError::Stale("always detached".into())) }
    })
    .await;

    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert!(matches!(result, Err(HarnessError::Stale(_))));
}

#[tokio::test]
async fn success_short_circuits_remaining_attempts() {
    let (_, browser) = mock_browser();
    let policy = RetryPolicy { max_attempts: 5 };
    let attempts = AtomicU32::new(0);

    let result = execute_with_retry(&browser, &fast_waits(), &policy, |attempt| {
        attempts.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < 2 {
                Err(HarnessError::Stale("detached once".into()))
            } else {
                Ok(attempt)
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn non_stale_failures_are_never_retried() {
    let (_, browser) = mock_browser();
    let policy = RetryPolicy { max_attempts: 3 };

    for failure in [
        HarnessError::Assertion("count was 0".into()),
        HarnessError::Driver("no such element".into()),
        HarnessError::WaitTimeout("condition not met".into()),
    ] {
        let attempts = AtomicU32::new(0);
        let failure = Mutex::new(Some(failure));
        let result: Result<(), _> = execute_with_retry(&browser, &fast_waits(), &policy, |_| {
            attempts.fetch_add(1, Ordering::SeqCst);
            let err = failure.lock().unwrap().take().unwrap();
            async move { Err(err) }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }
}

#[tokio::test]
async fn each_attempt_observes_a_fresh_handle_generation() {
    let (_, browser) = mock_browser();
    let policy = RetryPolicy { max_attempts: 3 };
    let generation = AtomicU32::new(0);
    let observed = Mutex::new(Vec::new());

    let _: Result<(), _> = execute_with_retry(&browser, &fast_waits(), &policy, |_| {
        // the factory builds a new handle bundle per attempt
        let this_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
        observed.lock().unwrap().push(this_generation);
        async { Err(HarnessError::Stale("detached".into())) }
    })
    .await;

    // strictly increasing: no attempt ever reused a previous bundle
    assert_eq!(*observed.lock().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn renavigation_to_landing_is_idempotent() {
    let (mock, browser) = mock_browser();
    let config = fast_config("https://ru.wikipedia.org");
    let harness = Harness::new(browser.clone(), config.clone());

    harness.open_landing().await.unwrap();
    let landing = LandingPage::attach(browser.clone(), config.waits.clone())
        .await
        .unwrap();
    assert!(landing.is_displayed().await.unwrap());

    // navigating again while already on the landing page changes nothing
    harness.open_landing().await.unwrap();
    assert!(landing.is_displayed().await.unwrap());

    let landing = LandingPage::attach(browser, config.waits).await.unwrap();
    assert!(landing.is_displayed().await.unwrap());
    assert_eq!(mock.goto_count(), 2);
}

#[tokio::test]
async fn landing_scenario_passes_against_scripted_state() {
    let (_, browser) = mock_browser();
    let harness = Harness::new(browser, fast_config("https://ru.wikipedia.org"));
    harness.landing_title_and_elements().await.unwrap();
}

#[tokio::test]
async fn landing_scenario_reports_title_mismatch_as_assertion() {
    let (_, browser) = mock_browser();
    let mut config = fast_config("https://ru.wikipedia.org");
    config.landing_title_marker = "Wikipedia in some other language".to_string();

    let err = Harness::new(browser, config)
        .landing_title_and_elements()
        .await
        .unwrap_err();
    assert!(matches!(err, HarnessError::Assertion(_)));
    assert!(err.to_string().contains("Wikipedia in some other language"));
}

#[tokio::test]
async fn language_switcher_scenario_reads_page_source() {
    let (_, browser) = mock_browser();
    let harness = Harness::new(browser, fast_config("https://ru.wikipedia.org"));
    harness.language_switcher_present().await.unwrap();
}
