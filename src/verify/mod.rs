// src/verify/mod.rs

//! Two-step verification against the registry's public lookup form.
//!
//! `begin` fills the lookup fields and hands back the captcha image together
//! with the session (hidden inputs and cookies). `complete` replays that
//! session, types the solved captcha, submits and extracts the result page.

pub mod automation;
pub mod request;
pub mod session;

#[cfg(test)]
pub(crate) mod fake;

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::time::Instant;
use tracing::{debug, info, warn};

pub use automation::{AutomationFactory, PageAutomation};
pub use request::{RequestError, VerifyRequest};
pub use session::{CaptchaAnswer, CaptchaChallenge, FormValue, SessionState};

use crate::extract::{Extraction, Extractor};

pub const DEFAULT_SITE_URL: &str = "https://everify.bdris.gov.bd";

/// URL and selectors of the lookup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub url: String,
    pub birth_date_field: String,
    pub ubrn_field: String,
    pub captcha_image: String,
    pub captcha_field: String,
    pub result_table: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            birth_date_field: "#BirthDate".to_string(),
            ubrn_field: "#ubrn".to_string(),
            captcha_image: "#CaptchaImage".to_string(),
            captcha_field: "#CaptchaInputText".to_string(),
            result_table: "table.table".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Verifier {
    site: SiteConfig,
    extractor: Extractor,
}

impl Verifier {
    pub fn new(site: SiteConfig, extractor: Extractor) -> Self {
        Self { site, extractor }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Open the form, fill the lookup fields and surface the captcha.
    pub async fn begin<A>(&self, page: &mut A, request: &VerifyRequest) -> Result<CaptchaChallenge>
    where
        A: PageAutomation + ?Sized,
    {
        request.validate()?;
        let start = Instant::now();
        info!(ubrn = %request.ubrn, "starting verification");

        page.navigate(&self.site.url)
            .await
            .with_context(|| format!("navigating to {}", self.site.url))?;
        self.fill_lookup(page, request).await?;

        page.wait_for_selector(&self.site.captcha_image)
            .await
            .context("waiting for captcha image")?;
        let png = page
            .capture_element_image(&self.site.captcha_image)
            .await
            .context("capturing captcha image")?;
        let session = SessionState {
            hidden_fields: page.hidden_fields().await.context("reading hidden fields")?,
            cookies: page.cookies().await.context("reading cookies")?,
        };

        info!(
            ubrn = %request.ubrn,
            captcha_bytes = png.len(),
            hidden_fields = session.hidden_fields.len(),
            cookies = session.cookies.len(),
            elapsed = ?start.elapsed(),
            "captcha ready"
        );
        Ok(CaptchaChallenge {
            captcha_image: STANDARD.encode(&png),
            session,
        })
    }

    /// Replay the session, submit the solved captcha and read the result.
    ///
    /// A page without result tables is not an error here; it comes back as
    /// an empty record with a structural anomaly (usually a wrong captcha).
    pub async fn complete<A>(&self, page: &mut A, answer: &CaptchaAnswer) -> Result<Extraction>
    where
        A: PageAutomation + ?Sized,
    {
        answer.request.validate()?;
        let captcha = answer.captcha.trim();
        if captcha.is_empty() {
            return Err(RequestError::EmptyCaptcha.into());
        }
        let start = Instant::now();
        let ubrn = &answer.request.ubrn;
        info!(ubrn = %ubrn, "submitting verification");

        page.navigate(&self.site.url)
            .await
            .with_context(|| format!("navigating to {}", self.site.url))?;
        page.restore_session(&answer.session)
            .await
            .context("restoring session")?;
        self.fill_lookup(page, &answer.request).await?;
        page.fill_field(&self.site.captcha_field, captcha)
            .await
            .context("filling captcha")?;
        page.submit().await.context("submitting lookup form")?;

        if let Err(e) = page.wait_for_selector(&self.site.result_table).await {
            // still extract: the page decides what the caller sees
            warn!(ubrn = %ubrn, "result table did not appear: {:#}", e);
        }
        let doc = page
            .current_document(&self.site.result_table)
            .await
            .context("reading result page")?;
        let extraction = self.extractor.extract(&doc);

        info!(
            ubrn = %ubrn,
            found = extraction.record.has_result(),
            anomalies = extraction.anomalies.len(),
            elapsed = ?start.elapsed(),
            "verification finished"
        );
        Ok(extraction)
    }

    async fn fill_lookup<A>(&self, page: &mut A, request: &VerifyRequest) -> Result<()>
    where
        A: PageAutomation + ?Sized,
    {
        debug!(field = %self.site.birth_date_field, "filling birth date");
        page.fill_field(&self.site.birth_date_field, &request.birth_date)
            .await
            .context("filling birth date")?;
        debug!(field = %self.site.ubrn_field, "filling UBRN");
        page.fill_field(&self.site.ubrn_field, &request.ubrn)
            .await
            .context("filling UBRN")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakePage;
    use super::*;
    use crate::extract::fixtures::RESULT_PAGE;
    use crate::extract::Anomaly;

    fn request() -> VerifyRequest {
        VerifyRequest::new("1990-05-05", "19902692512345678")
    }

    #[tokio::test]
    async fn test_begin_returns_captcha_and_session() {
        let mut page = FakePage::default();
        let challenge = Verifier::default().begin(&mut page, &request()).await.unwrap();

        assert_eq!(challenge.captcha_image, "iVBORw==");
        assert_eq!(
            challenge.session.hidden_fields,
            vec![FormValue::new("__RequestVerificationToken", "tok-1")]
        );
        assert_eq!(
            challenge.session.cookies,
            vec![FormValue::new("ASP.NET_SessionId", "sess-1")]
        );
        assert_eq!(
            page.calls,
            vec![
                "navigate https://everify.bdris.gov.bd",
                "fill #BirthDate=1990-05-05",
                "fill #ubrn=19902692512345678",
                "wait #CaptchaImage",
                "capture #CaptchaImage",
            ]
        );
    }

    #[tokio::test]
    async fn test_begin_rejects_bad_input_before_touching_the_page() {
        let mut page = FakePage::default();
        let err = Verifier::default()
            .begin(&mut page, &VerifyRequest::new("1990-05-05", "123"))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<RequestError>(),
            Some(&RequestError::InvalidUbrn("123".to_string()))
        );
        assert!(page.calls.is_empty());
    }

    #[tokio::test]
    async fn test_complete_replays_session_and_extracts() {
        let mut page = FakePage {
            html: RESULT_PAGE.to_string(),
            ..FakePage::default()
        };
        let session = SessionState {
            hidden_fields: vec![FormValue::new("__RequestVerificationToken", "tok-1")],
            cookies: vec![FormValue::new("ASP.NET_SessionId", "sess-1")],
        };
        let answer = CaptchaAnswer {
            request: request(),
            captcha: " k7Qx2 ".to_string(),
            session: session.clone(),
        };

        let extraction = Verifier::default().complete(&mut page, &answer).await.unwrap();

        assert!(extraction.is_clean());
        assert_eq!(
            extraction.record.birth_number.as_deref(),
            Some("19902692512345678")
        );
        assert_eq!(page.restored, Some(session));
        assert_eq!(
            page.calls,
            vec![
                "navigate https://everify.bdris.gov.bd",
                "restore",
                "fill #BirthDate=1990-05-05",
                "fill #ubrn=19902692512345678",
                "fill #CaptchaInputText=k7Qx2",
                "submit",
                "wait table.table",
            ]
        );
    }

    #[tokio::test]
    async fn test_wrong_captcha_page_gives_degraded_record() {
        let mut page = FakePage {
            html: "<html><body><p>Captcha mismatch</p></body></html>".to_string(),
            ..FakePage::default()
        };
        let answer = CaptchaAnswer {
            request: request(),
            captcha: "wrong".to_string(),
            session: SessionState::default(),
        };

        let extraction = Verifier::default().complete(&mut page, &answer).await.unwrap();
        assert!(extraction.record.is_empty());
        assert_eq!(
            extraction.anomalies,
            vec![Anomaly::StructuralMismatch { tables_found: 0 }]
        );
    }

    #[tokio::test]
    async fn test_empty_captcha_is_rejected() {
        let mut page = FakePage::default();
        let answer = CaptchaAnswer {
            request: request(),
            captcha: "   ".to_string(),
            session: SessionState::default(),
        };
        let err = Verifier::default().complete(&mut page, &answer).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<RequestError>(),
            Some(&RequestError::EmptyCaptcha)
        );
        assert!(page.calls.is_empty());
    }

    #[tokio::test]
    async fn test_navigation_failure_carries_context() {
        let mut page = FakePage {
            fail_navigation: true,
            ..FakePage::default()
        };
        let err = Verifier::default().begin(&mut page, &request()).await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("navigating to https://everify.bdris.gov.bd"), "{}", msg);
        assert!(msg.contains("connection refused"), "{}", msg);
    }
}
