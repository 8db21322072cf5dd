//! Page models
//!
//! One model per logical page, each holding a bundle of element handles
//! resolved against one document version. `attach()` is the rebuild
//! operation: it binds a fresh bundle to the live document and is what the
//! resilient executor calls between retry attempts. Content accessors read
//! through the cached bundle and may surface staleness; state predicates
//! probe the live document instead, so conditional test logic does not trip
//! over handles from a replaced document.

mod article;
mod landing;
mod search;

pub use article::ArticlePage;
pub use landing::LandingPage;
pub use search::SearchResultsPage;

use crate::driver::Browser;
use crate::errors::HarnessError;

/// Evaluate a boolean page-state script, treating non-boolean results as false
pub(crate) async fn page_flag(browser: &dyn Browser, script: &str) -> Result<bool, HarnessError> {
    let value = browser.execute(script).await?;
    Ok(value.as_bool().unwrap_or(false))
}
