// src/verify/session.rs

//! What the caller carries between the captcha step and the submit step.

use serde::{Deserialize, Serialize};

use super::request::VerifyRequest;

/// A `{name, value}` pair: a hidden form input or a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValue {
    pub name: String,
    pub value: String,
}

impl FormValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Opaque to the caller; must be sent back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub hidden_fields: Vec<FormValue>,
    #[serde(default)]
    pub cookies: Vec<FormValue>,
}

/// First-call response: the captcha to solve plus the session to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaChallenge {
    /// Base64-encoded PNG of the captcha element.
    pub captcha_image: String,
    pub session: SessionState,
}

/// Second-call request: the original lookup, the solved captcha and the
/// session returned by the first call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaAnswer {
    #[serde(flatten)]
    pub request: VerifyRequest,
    pub captcha: String,
    #[serde(default)]
    pub session: SessionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_wire_format() {
        let answer: CaptchaAnswer = serde_json::from_str(
            r#"{
                "BirthDate": "1990-05-05",
                "UBRN": "19902692512345678",
                "captcha": "k7Qx2",
                "session": {
                    "hiddenFields": [{"name": "__RequestVerificationToken", "value": "tok"}],
                    "cookies": [{"name": "ASP.NET_SessionId", "value": "abc"}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(answer.request.ubrn, "19902692512345678");
        assert_eq!(answer.captcha, "k7Qx2");
        assert_eq!(
            answer.session.hidden_fields,
            vec![FormValue::new("__RequestVerificationToken", "tok")]
        );
        assert_eq!(answer.session.cookies.len(), 1);
    }

    #[test]
    fn test_session_defaults_when_missing() {
        let answer: CaptchaAnswer = serde_json::from_str(
            r#"{"BirthDate": "1990-05-05", "UBRN": "19902692512345678", "captcha": "x"}"#,
        )
        .unwrap();
        assert_eq!(answer.session, SessionState::default());
    }
}
