//! Search-results page model

use super::page_flag;
use crate::driver::{Browser, ElementHandle, Selector};
use crate::errors::HarnessError;
use crate::waiting::{settle_document, WaitBudget};
use std::sync::Arc;
use tracing::{debug, info};

const IS_SEARCH_PAGE_SCRIPT: &str = "return (window.mw && mw.config) \
     ? mw.config.get('wgCanonicalSpecialPageName') === 'Search' : false";

fn page_heading() -> Selector {
    Selector::id("firstHeading")
}

fn result_items() -> Selector {
    Selector::css("li.mw-search-result")
}

fn first_result_link() -> Selector {
    Selector::css(".mw-search-result-heading a")
}

/// The search special page listing result hits
pub struct SearchResultsPage {
    browser: Arc<dyn Browser>,
    waits: WaitBudget,
    heading: ElementHandle,
}

impl SearchResultsPage {
    /// Resolve a fresh handle bundle against the live document
    pub async fn attach(
        browser: Arc<dyn Browser>,
        waits: WaitBudget,
    ) -> Result<Self, HarnessError> {
        let heading = browser.find(&page_heading()).await?;
        debug!("search page handles resolved");
        Ok(Self {
            browser,
            waits,
            heading,
        })
    }

    /// Whether the current document is the search special page
    pub async fn is_displayed(&self) -> Result<bool, HarnessError> {
        if page_flag(self.browser.as_ref(), IS_SEARCH_PAGE_SCRIPT).await? {
            return Ok(true);
        }
        // fallback for instances without the mw config surface
        let lists = self.browser.find_all(&Selector::css(".mw-search-results")).await?;
        Ok(!lists.is_empty())
    }

    /// Number of result hits on the current page
    pub async fn result_count(&self) -> Result<usize, HarnessError> {
        let items = self.browser.find_all(&result_items()).await?;
        Ok(items.len())
    }

    /// Open the first result hit
    pub async fn click_first_result(&self) -> Result<(), HarnessError> {
        info!("opening first search result");
        let link = self.browser.find(&first_result_link()).await?;
        link.click().await?;
        settle_document(self.browser.as_ref(), &self.waits).await
    }

    /// Heading text of the search page
    pub async fn heading_text(&self) -> Result<String, HarnessError> {
        self.heading.text().await
    }
}
