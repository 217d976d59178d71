// src/verify/automation.rs

use anyhow::Result;
use async_trait::async_trait;

use super::session::{FormValue, SessionState};
use crate::extract::HtmlDocument;

/// A browser-like page the verification flow can drive.
///
/// One implementation instance is one session; it is driven through
/// `&mut self` and is never shared between requests.
#[async_trait]
pub trait PageAutomation: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Type `value` into the input matching `selector`.
    async fn fill_field(&mut self, selector: &str, value: &str) -> Result<()>;

    /// Submit the form and wait for the resulting navigation.
    async fn submit(&mut self) -> Result<()>;

    async fn wait_for_selector(&mut self, selector: &str) -> Result<()>;

    /// HTML of the page as currently rendered.
    async fn current_html(&mut self) -> Result<String>;

    /// PNG screenshot of the element matching `selector`.
    async fn capture_element_image(&mut self, selector: &str) -> Result<Vec<u8>>;

    /// Every hidden `<input>` of the current form.
    async fn hidden_fields(&mut self) -> Result<Vec<FormValue>>;

    async fn cookies(&mut self) -> Result<Vec<FormValue>>;

    /// Put cookies and hidden inputs from an earlier session back in place.
    async fn restore_session(&mut self, session: &SessionState) -> Result<()>;

    /// Snapshot the current page as a queryable document.
    async fn current_document(&mut self, table_selector: &str) -> Result<HtmlDocument> {
        let html = self.current_html().await?;
        HtmlDocument::parse(&html, table_selector)
    }
}

/// Opens one fresh [`PageAutomation`] session per verification request.
#[async_trait]
pub trait AutomationFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageAutomation>>;
}
