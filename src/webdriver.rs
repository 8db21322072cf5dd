//! thirtyfour-backed implementation of the browser capability traits

use crate::driver::{Browser, Element, ElementHandle, Selector};
use crate::errors::HarnessError;
use async_trait::async_trait;
use serde_json::Value;
use thirtyfour::{By, WebDriver, WebElement};

fn to_by(selector: &Selector) -> By {
    match selector {
        Selector::Css(sel) => By::Css(sel.as_str()),
        Selector::Id(id) => By::Id(id.as_str()),
        Selector::LinkText(text) => By::LinkText(text.as_str()),
    }
}

/// Browser capability backed by a live WebDriver session
#[derive(Clone)]
pub struct WdBrowser {
    driver: WebDriver,
}

impl WdBrowser {
    pub fn new(driver: WebDriver) -> Self {
        Self { driver }
    }
}

#[async_trait]
impl Browser for WdBrowser {
    async fn goto(&self, url: &str) -> Result<(), HarnessError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, HarnessError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn title(&self) -> Result<String, HarnessError> {
        Ok(self.driver.title().await?)
    }

    async fn page_source(&self) -> Result<String, HarnessError> {
        Ok(self.driver.source().await?)
    }

    async fn execute(&self, script: &str) -> Result<Value, HarnessError> {
        let ret = self.driver.execute(script, Vec::new()).await?;
        Ok(ret.json().clone())
    }

    async fn find(&self, selector: &Selector) -> Result<ElementHandle, HarnessError> {
        let element = self.driver.find(to_by(selector)).await?;
        Ok(Box::new(WdElement { inner: element }))
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<ElementHandle>, HarnessError> {
        let elements = self.driver.find_all(to_by(selector)).await?;
        Ok(elements
            .into_iter()
            .map(|inner| Box::new(WdElement { inner }) as ElementHandle)
            .collect())
    }
}

struct WdElement {
    inner: WebElement,
}

#[async_trait]
impl Element for WdElement {
    async fn click(&self) -> Result<(), HarnessError> {
        self.inner.click().await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), HarnessError> {
        self.inner.send_keys(text).await?;
        Ok(())
    }

    async fn text(&self) -> Result<String, HarnessError> {
        Ok(self.inner.text().await?)
    }

    async fn is_displayed(&self) -> Result<bool, HarnessError> {
        Ok(self.inner.is_displayed().await?)
    }
}
