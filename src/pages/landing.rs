//! Landing (main) page model

use super::page_flag;
use crate::driver::{Browser, ElementHandle, Selector};
use crate::errors::HarnessError;
use crate::waiting::{settle_document, WaitBudget};
use std::sync::Arc;
use tracing::{debug, info};

const IS_MAIN_PAGE_SCRIPT: &str =
    "return (window.mw && mw.config) ? mw.config.get('wgIsMainPage') === true : false";

fn search_input() -> Selector {
    Selector::id("searchInput")
}

fn search_button() -> Selector {
    Selector::css("#searchform button, #searchButton")
}

fn main_page_link() -> Selector {
    Selector::css(".mw-logo, #n-mainpage-description a, #n-mainpage a")
}

/// The Wikipedia main page
pub struct LandingPage {
    browser: Arc<dyn Browser>,
    waits: WaitBudget,
    search_input: ElementHandle,
    search_button: ElementHandle,
    main_page_link: ElementHandle,
}

impl LandingPage {
    /// Resolve a fresh handle bundle against the live document
    pub async fn attach(
        browser: Arc<dyn Browser>,
        waits: WaitBudget,
    ) -> Result<Self, HarnessError> {
        let search_input = browser.find(&search_input()).await?;
        let search_button = browser.find(&search_button()).await?;
        let main_page_link = browser.find(&main_page_link()).await?;
        debug!("landing page handles resolved");
        Ok(Self {
            browser,
            waits,
            search_input,
            search_button,
            main_page_link,
        })
    }

    /// Whether the main page is the currently displayed document
    pub async fn is_displayed(&self) -> Result<bool, HarnessError> {
        if !page_flag(self.browser.as_ref(), IS_MAIN_PAGE_SCRIPT).await? {
            return Ok(false);
        }
        let inputs = self.browser.find_all(&search_input()).await?;
        match inputs.first() {
            Some(input) => input.is_displayed().await,
            None => Ok(false),
        }
    }

    /// Current document title
    pub async fn page_title(&self) -> Result<String, HarnessError> {
        self.browser.title().await
    }

    /// Type a query into the search box and submit it
    pub async fn search_for(&self, query: &str) -> Result<(), HarnessError> {
        info!(query, "submitting search");
        self.search_input.type_text(query).await?;
        self.search_button.click().await?;
        settle_document(self.browser.as_ref(), &self.waits).await
    }

    /// Follow the main-page navigation link
    pub async fn go_to_main_page(&self) -> Result<(), HarnessError> {
        self.main_page_link.click().await?;
        settle_document(self.browser.as_ref(), &self.waits).await
    }

    /// The navigation link used by [`Self::go_to_main_page`]
    pub fn main_page_link(&self) -> &ElementHandle {
        &self.main_page_link
    }
}
