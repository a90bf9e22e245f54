//! Problem body for rejected credentials.
//!
//! Only the bearer gate and `/auth/login` answer with this shape; every
//! other failure is the flat `"Error: ..."` string.

use serde::{Deserialize, Serialize};

/// Problem type used when no more specific URI applies.
pub const PROBLEM_TYPE_BLANK: &str = "about:blank";

/// RFC 7807 body returned with a 401 (or a 500 when hashing breaks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,

    pub title: String,

    pub status: u16,

    /// What the caller should fix, e.g. "log in again".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Copied from `X-Request-ID` so a rejected write can be found in the logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: PROBLEM_TYPE_BLANK.to_string(),
            title: title.into(),
            status,
            detail: None,
            request_id: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Wrong admin username or password.
    pub fn invalid_credentials() -> Self {
        Self::new(401, "Unauthorized").with_detail("Invalid username or password.")
    }

    /// The password hash could not be checked.
    pub fn login_unavailable() -> Self {
        Self::new(500, "Internal Server Error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_fields_are_omitted() {
        let json = serde_json::to_value(ErrorResponse::new(401, "Token Expired")).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["status"], 401);
        assert!(json.get("detail").is_none());
        assert!(json.get("request_id").is_none());
    }

    #[test]
    fn test_request_id_is_carried() {
        let body = ErrorResponse::invalid_credentials().with_request_id("req-7");
        let json = serde_json::to_value(body).unwrap();

        assert_eq!(json["request_id"], "req-7");
        assert_eq!(json["detail"], "Invalid username or password.");
    }
}
