//! Article page model

use super::page_flag;
use crate::driver::{Browser, ElementHandle, Selector};
use crate::errors::HarnessError;
use std::sync::Arc;
use tracing::debug;

const IS_ARTICLE_SCRIPT: &str = "return (window.mw && mw.config) \
     ? (mw.config.get('wgNamespaceNumber') === 0 && mw.config.get('wgIsMainPage') !== true) \
     : false";

fn heading() -> Selector {
    Selector::id("firstHeading")
}

fn content_body() -> Selector {
    Selector::id("mw-content-text")
}

/// An article in the main namespace
pub struct ArticlePage {
    browser: Arc<dyn Browser>,
    heading: ElementHandle,
    content: ElementHandle,
}

impl ArticlePage {
    /// Resolve a fresh handle bundle against the live document
    pub async fn attach(browser: Arc<dyn Browser>) -> Result<Self, HarnessError> {
        let heading = browser.find(&heading()).await?;
        let content = browser.find(&content_body()).await?;
        debug!("article page handles resolved");
        Ok(Self {
            browser,
            heading,
            content,
        })
    }

    /// Whether the current document is an article with visible content
    pub async fn is_displayed(&self) -> Result<bool, HarnessError> {
        if !page_flag(self.browser.as_ref(), IS_ARTICLE_SCRIPT).await? {
            return Ok(false);
        }
        let bodies = self.browser.find_all(&content_body()).await?;
        match bodies.first() {
            Some(body) => body.is_displayed().await,
            None => Ok(false),
        }
    }

    /// Article heading text
    pub async fn heading_text(&self) -> Result<String, HarnessError> {
        self.heading.text().await
    }
}
