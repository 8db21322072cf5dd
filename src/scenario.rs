//! Named test scenarios and the suite runner
//!
//! Each scenario is independently runnable: it re-establishes the landing
//! page rather than assuming prior scenario state, so ordering never affects
//! correctness. The order below mirrors the suite's priority order for
//! readable output.

use crate::config::HarnessConfig;
use crate::driver::Browser;
use crate::errors::HarnessError;
use crate::executor::execute_with_retry;
use crate::pages::{ArticlePage, LandingPage, SearchResultsPage};
use crate::waiting::settle_document;
use std::sync::Arc;
use tracing::{error, info};

/// Fixed provider of sample queries for the parametrized scenario
pub const SAMPLE_QUERIES: [&str; 5] = [
    "Автоматизация тестирования",
    "Selenium",
    "Тестирование",
    "Программирование",
    "Python",
];

const QUERY_SOFTWARE_TESTING: &str = "Тестирование программного обеспечения";
const QUERY_PROGRAMMING: &str = "Программирование";
const QUERY_SELENIUM: &str = "Selenium";
const ENGLISH_LINK_TEXT: &str = "English";

/// Fixed scenarios in priority order
pub const SCENARIO_NAMES: [&str; 7] = [
    "landing-title",
    "search-article",
    "navigation-flow",
    "search-results",
    "language-switcher",
    "return-via-nav",
    "parameterized-search",
];

fn ensure(condition: bool, context: impl Into<String>) -> Result<(), HarnessError> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::assertion(context))
    }
}

/// Outcome of one suite run
#[derive(Debug, Default)]
pub struct SuiteSummary {
    pub passed: Vec<String>,
    pub failed: Vec<(String, HarnessError)>,
}

impl SuiteSummary {
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, name: &str, outcome: Result<(), HarnessError>) {
        match outcome {
            Ok(()) => {
                info!(scenario = name, "scenario passed");
                self.passed.push(name.to_string());
            }
            Err(err) => {
                error!(scenario = name, %err, "scenario failed");
                self.failed.push((name.to_string(), err));
            }
        }
    }
}

/// Scenario orchestrator over one browser session
pub struct Harness {
    browser: Arc<dyn Browser>,
    config: HarnessConfig,
}

impl Harness {
    pub fn new(browser: Arc<dyn Browser>, config: HarnessConfig) -> Self {
        Self { browser, config }
    }

    /// Navigate to the landing page and let the document settle
    pub async fn open_landing(&self) -> Result<(), HarnessError> {
        self.browser.goto(&self.config.base_url).await?;
        settle_document(self.browser.as_ref(), &self.config.waits).await
    }

    async fn landing(&self) -> Result<LandingPage, HarnessError> {
        LandingPage::attach(Arc::clone(&self.browser), self.config.waits.clone()).await
    }

    async fn search_results(&self) -> Result<SearchResultsPage, HarnessError> {
        SearchResultsPage::attach(Arc::clone(&self.browser), self.config.waits.clone()).await
    }

    async fn article(&self) -> Result<ArticlePage, HarnessError> {
        ArticlePage::attach(Arc::clone(&self.browser)).await
    }

    /// Submit a search, rebuilding the landing handles on staleness
    pub async fn search_with_retry(&self, query: &str) -> Result<(), HarnessError> {
        execute_with_retry(&self.browser, &self.config.waits, &self.config.retry, |_| {
            let browser = Arc::clone(&self.browser);
            let waits = self.config.waits.clone();
            let query = query.to_owned();
            async move {
                let landing = LandingPage::attach(browser, waits).await?;
                landing.search_for(&query).await
            }
        })
        .await
    }

    async fn article_heading_with_retry(&self) -> Result<String, HarnessError> {
        execute_with_retry(&self.browser, &self.config.waits, &self.config.retry, |_| {
            let browser = Arc::clone(&self.browser);
            async move { ArticlePage::attach(browser).await?.heading_text().await }
        })
        .await
    }

    async fn result_count_with_retry(&self) -> Result<usize, HarnessError> {
        execute_with_retry(&self.browser, &self.config.waits, &self.config.retry, |_| {
            let browser = Arc::clone(&self.browser);
            let waits = self.config.waits.clone();
            async move {
                let results = SearchResultsPage::attach(browser, waits).await?;
                results.result_count().await
            }
        })
        .await
    }

    async fn click_first_result_with_retry(&self) -> Result<(), HarnessError> {
        execute_with_retry(&self.browser, &self.config.waits, &self.config.retry, |_| {
            let browser = Arc::clone(&self.browser);
            let waits = self.config.waits.clone();
            async move {
                let results = SearchResultsPage::attach(browser, waits).await?;
                results.click_first_result().await
            }
        })
        .await
    }

    async fn go_to_main_page_with_retry(&self) -> Result<(), HarnessError> {
        execute_with_retry(&self.browser, &self.config.waits, &self.config.retry, |_| {
            let browser = Arc::clone(&self.browser);
            let waits = self.config.waits.clone();
            async move {
                let landing = LandingPage::attach(browser, waits).await?;
                landing.go_to_main_page().await
            }
        })
        .await
    }

    /// Landing page title contains the expected marker and the page renders
    pub async fn landing_title_and_elements(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        let landing = self.landing().await?;

        let title = landing.page_title().await?;
        info!(%title, "landing page title");
        ensure(
            title.contains(&self.config.landing_title_marker),
            format!(
                "title should contain '{}', got '{}'",
                self.config.landing_title_marker, title
            ),
        )?;
        ensure(
            landing.is_displayed().await?,
            "landing page is not displayed correctly",
        )
    }

    /// Searching a known topic yields an article (or the search page for it)
    pub async fn search_finds_article(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        self.search_with_retry(QUERY_SOFTWARE_TESTING).await?;

        let heading = self.article_heading_with_retry().await?;
        info!(%heading, "page heading after search");
        ensure(!heading.is_empty(), "article heading must not be empty")?;

        let on_expected_page = heading.to_lowercase().contains("тестирование")
            || self.search_results().await?.is_displayed().await?;
        ensure(
            on_expected_page,
            format!(
                "query '{}' landed on an unexpected page, heading '{}'",
                QUERY_SOFTWARE_TESTING, heading
            ),
        )
    }

    /// Landing → article → landing round trip
    pub async fn navigation_flow(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        ensure(
            self.landing().await?.is_displayed().await?,
            "landing page not displayed at scenario start",
        )?;

        self.search_with_retry(QUERY_PROGRAMMING).await?;
        ensure(
            self.article().await?.is_displayed().await?,
            format!("article content not displayed after searching '{}'", QUERY_PROGRAMMING),
        )?;

        self.open_landing().await?;
        ensure(
            self.landing().await?.is_displayed().await?,
            "returning to the landing page failed",
        )
    }

    /// Query "Selenium": results page with a clickable first hit, or a
    /// direct article about Selenium — any third outcome fails
    pub async fn search_results_and_first_hit(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        self.search_with_retry(QUERY_SELENIUM).await?;

        let on_results = self.search_results().await?.is_displayed().await?;
        let on_article = self.article().await?.is_displayed().await?;

        if on_results {
            let count = self.result_count_with_retry().await?;
            info!(count, "search results found");
            ensure(
                count > 0,
                format!("query '{}' should find at least one result", QUERY_SELENIUM),
            )?;

            self.click_first_result_with_retry().await?;
            ensure(
                self.article().await?.is_displayed().await?,
                "article content not displayed after opening the first result",
            )?;
            let heading = self.article_heading_with_retry().await?;
            ensure(!heading.is_empty(), "article heading must not be empty")?;
            info!(%heading, "opened article from search results");
            Ok(())
        } else if on_article {
            let heading = self.article_heading_with_retry().await?;
            info!(%heading, "search went straight to an article");
            ensure(
                heading.to_lowercase().contains("selenium"),
                format!("heading should contain 'selenium', got '{}'", heading),
            )
        } else {
            Err(HarnessError::assertion(format!(
                "query '{}' produced neither a results page nor an article",
                QUERY_SELENIUM
            )))
        }
    }

    /// The interlanguage link to the English edition is present
    pub async fn language_switcher_present(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        let source = self.browser.page_source().await?;
        ensure(
            source.contains(ENGLISH_LINK_TEXT),
            format!("page source should contain the '{}' language link", ENGLISH_LINK_TEXT),
        )
    }

    /// Clicking the main-page navigation link returns to the landing page
    pub async fn return_to_landing_via_nav_link(&self) -> Result<(), HarnessError> {
        self.open_landing().await?;
        self.search_with_retry(QUERY_SOFTWARE_TESTING).await?;

        if self.landing().await?.is_displayed().await? {
            info!("already on the landing page; nothing to navigate");
            return Ok(());
        }

        let url_before = self.browser.current_url().await?;
        self.go_to_main_page_with_retry().await?;

        let url_after = self.browser.current_url().await?;
        ensure(
            url_before != url_after,
            format!("URL did not change after the main-page link click: {}", url_after),
        )?;
        ensure(
            self.landing().await?.is_displayed().await?,
            "landing page not displayed after the main-page link click",
        )?;

        let title = self.landing().await?.page_title().await?;
        ensure(
            title.contains("Заглавная страница")
                || title.contains(&self.config.landing_title_marker)
                || title.contains("Wikipedia"),
            format!("title does not match the landing page: '{}'", title),
        )
    }

    /// Weaker postcondition over a fixed query set: an article heading or a
    /// non-empty result list — never neither
    pub async fn parameterized_search(&self, query: &str) -> Result<(), HarnessError> {
        info!(query, "parametrized search");
        self.open_landing().await?;
        self.search_with_retry(query).await?;

        let on_article = self.article().await?.is_displayed().await?;
        let on_results = self.search_results().await?.is_displayed().await?;

        if on_article {
            let heading = self.article_heading_with_retry().await?;
            ensure(
                !heading.is_empty(),
                format!("query '{}' produced an empty article heading", query),
            )?;
            info!(query, %heading, "query resolved to an article");
            Ok(())
        } else if on_results {
            let count = self.result_count_with_retry().await?;
            ensure(
                count > 0,
                format!("query '{}' should find at least one result", query),
            )?;
            info!(query, count, "query resolved to a result list");
            Ok(())
        } else {
            Err(HarnessError::assertion(format!(
                "query '{}' found neither an article nor search results",
                query
            )))
        }
    }

    /// Run one named scenario; the parametrized scenario covers all queries
    pub async fn run_scenario(&self, name: &str) -> Result<(), HarnessError> {
        match name {
            "landing-title" => self.landing_title_and_elements().await,
            "search-article" => self.search_finds_article().await,
            "navigation-flow" => self.navigation_flow().await,
            "search-results" => self.search_results_and_first_hit().await,
            "language-switcher" => self.language_switcher_present().await,
            "return-via-nav" => self.return_to_landing_via_nav_link().await,
            "parameterized-search" => {
                for query in SAMPLE_QUERIES {
                    self.parameterized_search(query).await?;
                }
                Ok(())
            }
            other => Err(HarnessError::Driver(format!("unknown scenario '{}'", other))),
        }
    }

    /// Run the full suite in priority order, continuing past failures
    pub async fn run_all(&self) -> SuiteSummary {
        let mut summary = SuiteSummary::default();
        for name in SCENARIO_NAMES {
            if name == "parameterized-search" {
                for query in SAMPLE_QUERIES {
                    let label = format!("{}[{}]", name, query);
                    summary.record(&label, self.parameterized_search(query).await);
                }
            } else {
                summary.record(name, self.run_scenario(name).await);
            }
        }
        summary
    }
}
