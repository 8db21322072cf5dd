//! End-to-end test harness for a live Wikipedia instance
//!
//! The interesting part is the resilient interaction layer:
//! - bounded condition waiting with an explicit settling budget
//! - stale-reference recovery that rebuilds page handles per attempt
//! - page models that expose domain actions and hide element lookup
//!
//! Everything talks to the browser through the narrow capability traits in
//! [`driver`]; the thirtyfour backend in [`webdriver`] is the only module
//! aware of the WebDriver protocol.

pub mod config;
pub mod driver;
pub mod errors;
pub mod executor;
pub mod pages;
pub mod scenario;
pub mod session;
pub mod waiting;
pub mod webdriver;

pub use config::HarnessConfig;
pub use driver::{Browser, Element, ElementHandle, Selector};
pub use errors::HarnessError;
pub use executor::{execute_with_retry, RetryPolicy};
pub use scenario::{Harness, SuiteSummary, SAMPLE_QUERIES, SCENARIO_NAMES};
pub use session::Session;
pub use waiting::{await_condition, settle_document, wait_for_document_ready, WaitBudget};
