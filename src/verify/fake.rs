// src/verify/fake.rs

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::automation::{AutomationFactory, PageAutomation};
use super::session::{FormValue, SessionState};

/// Scripted page that records every call it receives.
#[derive(Default)]
pub struct FakePage {
    pub calls: Vec<String>,
    pub html: String,
    pub restored: Option<SessionState>,
    pub fail_navigation: bool,
}

#[async_trait]
impl PageAutomation for FakePage {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.calls.push(format!("navigate {}", url));
        if self.fail_navigation {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }

    async fn fill_field(&mut self, selector: &str, value: &str) -> Result<()> {
        self.calls.push(format!("fill {}={}", selector, value));
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        self.calls.push("submit".to_string());
        Ok(())
    }

    async fn wait_for_selector(&mut self, selector: &str) -> Result<()> {
        self.calls.push(format!("wait {}", selector));
        if selector == "table.table" && !self.html.contains("<table") {
            return Err(anyhow!("timed out waiting for {}", selector));
        }
        Ok(())
    }

    async fn current_html(&mut self) -> Result<String> {
        Ok(self.html.clone())
    }

    async fn capture_element_image(&mut self, selector: &str) -> Result<Vec<u8>> {
        self.calls.push(format!("capture {}", selector));
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn hidden_fields(&mut self) -> Result<Vec<FormValue>> {
        Ok(vec![FormValue::new("__RequestVerificationToken", "tok-1")])
    }

    async fn cookies(&mut self) -> Result<Vec<FormValue>> {
        Ok(vec![FormValue::new("ASP.NET_SessionId", "sess-1")])
    }

    async fn restore_session(&mut self, session: &SessionState) -> Result<()> {
        self.calls.push("restore".to_string());
        self.restored = Some(session.clone());
        Ok(())
    }
}

/// Hands out a [`FakePage`] serving `html` for every request.
#[derive(Default)]
pub struct FakeAutomation {
    pub html: String,
    pub fail_navigation: bool,
}

#[async_trait]
impl AutomationFactory for FakeAutomation {
    async fn open(&self) -> Result<Box<dyn PageAutomation>> {
        Ok(Box::new(FakePage {
            html: self.html.clone(),
            fail_navigation: self.fail_navigation,
            ..FakePage::default()
        }))
    }
}
