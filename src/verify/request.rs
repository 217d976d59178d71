// src/verify/request.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static BIRTH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[012])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("birth date pattern should compile")
});
// ASCII digits only; `\d` would also accept Bengali numerals.
static UBRN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{17}$").expect("UBRN pattern should compile"));

/// Rejections that map to a client error rather than a failed lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid birth date '{0}'. Expected YYYY-MM-DD (e.g., 1990-05-05)")]
    InvalidBirthDate(String),

    #[error("Invalid UBRN '{0}'. Expected 17 digits")]
    InvalidUbrn(String),

    #[error("Captcha answer is empty")]
    EmptyCaptcha,
}

/// The lookup key the verification form asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(rename = "BirthDate")]
    pub birth_date: String,
    #[serde(rename = "UBRN")]
    pub ubrn: String,
}

impl VerifyRequest {
    pub fn new(birth_date: impl Into<String>, ubrn: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            ubrn: ubrn.into(),
        }
    }

    /// Check both fields before anything is typed into the form.
    ///
    /// The birth date must also be a real calendar day, so `2001-02-30`
    /// is rejected even though it matches the pattern.
    pub fn validate(&self) -> Result<(), RequestError> {
        let date_ok = BIRTH_DATE_RE.is_match(&self.birth_date)
            && NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d").is_ok();
        if !date_ok {
            return Err(RequestError::InvalidBirthDate(self.birth_date.clone()));
        }
        if !UBRN_RE.is_match(&self.ubrn) {
            return Err(RequestError::InvalidUbrn(self.ubrn.clone()));
        }
        Ok(())
    }
}
