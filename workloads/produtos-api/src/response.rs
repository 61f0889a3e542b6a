//! JSON responses with CORS headers.

use produtos_core::ApiError;
use serde::Serialize;
use serde_json::json;

/// Headers attached to every response, success or error.
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Methods",
        "GET, POST, PUT, DELETE, OPTIONS",
    ),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// A response ready to hand back to the trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in emission order.
    pub headers: Vec<(String, String)>,
    /// JSON text (empty for preflight).
    pub body: String,
}

impl ApiResponse {
    fn with_body(status: u16, body: String) -> Self {
        Self {
            status,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        }
    }

    /// Empty body.
    pub fn empty(status: u16) -> Self {
        Self::with_body(status, String::new())
    }

    /// Serialize `value` as the body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, ApiError> {
        Ok(Self::with_body(status, serde_json::to_string(value)?))
    }

    /// `{"mensagem": message}`.
    pub fn message(status: u16, message: &str) -> Self {
        Self::with_body(status, json!({ "mensagem": message }).to_string())
    }

    /// `{"erro": message}` with the status of the error kind.
    pub fn error(error: &ApiError) -> Self {
        Self::with_body(
            error.status_code(),
            json!({ "erro": error.to_string() }).to_string(),
        )
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn json_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
