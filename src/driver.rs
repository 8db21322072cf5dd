//! Browser capability traits
//!
//! The harness depends on this narrow capability set, not on any concrete
//! WebDriver client. Page models hold `ElementHandle`s resolved through a
//! [`Browser`]; a handle is valid only until the next navigation or DOM
//! replacement, after which any use may fail with a staleness error.

use crate::errors::HarnessError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Element location strategy, mapped by the backend to its own locator type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector
    Css(String),
    /// Element id attribute
    Id(String),
    /// Exact anchor text
    LinkText(String),
}

impl Selector {
    pub fn css(sel: impl Into<String>) -> Self {
        Selector::Css(sel.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Selector::Id(id.into())
    }

    pub fn link_text(text: impl Into<String>) -> Self {
        Selector::LinkText(text.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(sel) => write!(f, "css={}", sel),
            Selector::Id(id) => write!(f, "id={}", id),
            Selector::LinkText(text) => write!(f, "link={}", text),
        }
    }
}

/// One resolved reference into the live document
#[async_trait]
pub trait Element: Send + Sync {
    /// Click the element
    async fn click(&self) -> Result<(), HarnessError>;

    /// Type text into the element
    async fn type_text(&self, text: &str) -> Result<(), HarnessError>;

    /// Visible text content
    async fn text(&self) -> Result<String, HarnessError>;

    /// Whether the element is rendered and visible
    async fn is_displayed(&self) -> Result<bool, HarnessError>;
}

pub type ElementHandle = Box<dyn Element>;

/// The browser automation capability consumed by the harness
///
/// Implementations must surface a distinguishable staleness signal
/// ([`HarnessError::Stale`]) when an element reference no longer corresponds
/// to a live DOM node.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to an absolute URL
    async fn goto(&self, url: &str) -> Result<(), HarnessError>;

    /// Current document URL
    async fn current_url(&self) -> Result<String, HarnessError>;

    /// Current document title
    async fn title(&self) -> Result<String, HarnessError>;

    /// Full page source
    async fn page_source(&self) -> Result<String, HarnessError>;

    /// Execute a script in the page and return its value
    async fn execute(&self, script: &str) -> Result<Value, HarnessError>;

    /// Resolve the first element matching the selector
    async fn find(&self, selector: &Selector) -> Result<ElementHandle, HarnessError>;

    /// Resolve all elements matching the selector (empty when none match)
    async fn find_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>, HarnessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display_includes_strategy() {
        assert_eq!(Selector::css("#searchform button").to_string(), "css=#searchform button");
        assert_eq!(Selector::id("searchInput").to_string(), "id=searchInput");
        assert_eq!(Selector::link_text("English").to_string(), "link=English");
    }
}
