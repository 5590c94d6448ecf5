// @zen-component: MAKE-ErrorNormalizer
//
//! Uniform error value for every failure surfaced by the Make API.
//!
//! Transport failures, non-2xx responses and undecodable bodies all collapse
//! into a [`MakeError`]. Building one never fails: a malformed error body
//! degrades to the status text and raw body, and an unreadable body degrades
//! to the status text alone.

pub use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Error returned by every Make API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render(.message, .status_code, .detail))]
pub struct MakeError {
    pub message: String,
    pub status_code: Option<u16>,
    pub detail: Option<String>,
}

fn render(message: &str, status_code: &Option<u16>, detail: &Option<String>) -> String {
    let mut out = String::from("HTTPError");
    if let Some(code) = status_code {
        out.push_str(&format!(" ({code})"));
    }
    out.push_str(": ");
    out.push_str(message);
    if let Some(detail) = detail.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(": ");
        out.push_str(detail);
    }
    out
}

/// Structured error body returned by Make for most failures.
///
/// `detail` is kept only when it is a string; any other shape is dropped
/// without losing `message`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl MakeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            detail: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status.as_u16());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Normalize a failed response from its status and the outcome of reading
    /// its body.
    ///
    /// 1. body parses as `{message, detail?}` → use it;
    /// 2. body was read but is not such an object → status text + raw body;
    /// 3. body could not be read → status text only.
    pub fn normalize<E>(status: StatusCode, body: Result<&[u8], E>) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());

        let bytes = match body {
            Ok(bytes) => bytes,
            Err(_) => return Self::new(status_text).with_status(status),
        };

        match serde_json::from_slice::<ErrorBody>(bytes) {
            Ok(ErrorBody { message, detail }) => Self {
                message,
                status_code: Some(status.as_u16()),
                detail: match detail {
                    Some(serde_json::Value::String(detail)) => Some(detail),
                    _ => None,
                },
            },
            Err(_) => Self::new(status_text)
                .with_status(status)
                .with_detail(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    /// Normalize a failed response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.bytes().await;
        Self::normalize(status, body.as_deref())
    }
}

impl From<reqwest::Error> for MakeError {
    fn from(err: reqwest::Error) -> Self {
        let error = if err.is_decode() {
            Self::new(format!("Failed to decode response: {err}"))
        } else {
            Self::new(err.to_string())
        };
        match err.status() {
            Some(status) => error.with_status(status),
            None => error,
        }
    }
}

impl From<serde_json::Error> for MakeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Failed to decode response: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_string_detail_keeps_message() {
        let body = br#"{"message":"Validation failed","detail":{"field":"name"}}"#;
        let err = MakeError::normalize::<()>(StatusCode::BAD_REQUEST, Ok(&body[..]));
        assert_eq!(err.message, "Validation failed");
        assert_eq!(err.status_code, Some(400));
        assert_eq!(err.detail, None);
        assert_eq!(err.to_string(), "HTTPError (400): Validation failed");
    }

    #[test]
    fn uses_structured_body_message_and_detail() {
        let body = br#"{"message":"Scenario not found","detail":"id 42","code":"IM005"}"#;
        let err = MakeError::normalize::<()>(StatusCode::NOT_FOUND, Ok(&body[..]));
        assert_eq!(err.message, "Scenario not found");
        assert_eq!(err.detail.as_deref(), Some("id 42"));
        assert_eq!(err.status_code, Some(404));
    }

    #[test]
    fn structured_body_without_detail() {
        let body = br#"{"message":"Access denied"}"#;
        let err = MakeError::normalize::<()>(StatusCode::FORBIDDEN, Ok(&body[..]));
        assert_eq!(err.message, "Access denied");
        assert_eq!(err.detail, None);
        assert_eq!(err.status_code, Some(403));
    }

    #[test]
    fn non_json_body_falls_back_to_status_text_and_raw_body() {
        let err = MakeError::normalize::<()>(StatusCode::BAD_GATEWAY, Ok(&b"<html>upstream</html>"[..]));
        assert_eq!(err.message, "Bad Gateway");
        assert_eq!(err.detail.as_deref(), Some("<html>upstream</html>"));
        assert_eq!(err.status_code, Some(502));
    }

    #[test]
    fn json_without_string_message_is_treated_as_raw_body() {
        let body = br#"{"message":42}"#;
        let err = MakeError::normalize::<()>(StatusCode::BAD_REQUEST, Ok(&body[..]));
        assert_eq!(err.message, "Bad Request");
        assert_eq!(err.detail.as_deref(), Some(r#"{"message":42}"#));
    }

    #[test]
    fn unreadable_body_falls_back_to_status_text() {
        let err = MakeError::normalize(StatusCode::INTERNAL_SERVER_ERROR, Err("stream reset"));
        assert_eq!(err.message, "Internal Server Error");
        assert_eq!(err.detail, None);
        assert_eq!(err.status_code, Some(500));
    }

    #[test]
    fn unknown_status_uses_numeric_text() {
        let status = StatusCode::from_u16(599).unwrap();
        let err = MakeError::normalize(status, Err(()));
        assert_eq!(err.message, "599");
    }

    #[test]
    fn display_includes_status_and_detail() {
        let err = MakeError::new("Scenario not found")
            .with_status(StatusCode::NOT_FOUND)
            .with_detail("id 42");
        assert_eq!(err.to_string(), "HTTPError (404): Scenario not found: id 42");
        assert_eq!(MakeError::new("boom").to_string(), "HTTPError: boom");
    }
}
