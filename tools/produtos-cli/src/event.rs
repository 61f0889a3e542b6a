//! API Gateway event files.
//!
//! Accepts both REST (v1) and HTTP (v2) event shapes and normalizes them into
//! an `ApiRequest`. Where both shapes carry a value, the v2 field wins.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use produtos_core::{ApiRequest, RequestId};
use serde::Deserialize;
use thiserror::Error;

/// Event normalization errors.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event has no HTTP method (expected requestContext.http.method or httpMethod)")]
    MissingMethod,

    #[error("event body is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("failed to parse event: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A gateway event, either shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    /// v1 method.
    pub http_method: Option<String>,
    /// v1 path.
    pub path: Option<String>,
    /// v2 path.
    pub raw_path: Option<String>,
    pub request_context: Option<RequestContext>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub http: Option<HttpContext>,
}

/// v2 `requestContext.http`.
#[derive(Debug, Default, Deserialize)]
pub struct HttpContext {
    pub method: Option<String>,
    pub path: Option<String>,
}

impl GatewayEvent {
    /// Parse event JSON.
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(text)?)
    }

    fn http(&self) -> Option<&HttpContext> {
        self.request_context.as_ref().and_then(|c| c.http.as_ref())
    }

    /// HTTP method, v2 first.
    pub fn method(&self) -> Option<&str> {
        self.http()
            .and_then(|h| h.method.as_deref())
            .or(self.http_method.as_deref())
    }

    /// Request path, v2 first. Defaults to `/`.
    pub fn request_path(&self) -> &str {
        self.raw_path
            .as_deref()
            .or_else(|| self.http().and_then(|h| h.path.as_deref()))
            .or(self.path.as_deref())
            .unwrap_or("/")
    }

    /// Raw body bytes, decoding base64 when flagged.
    pub fn body_bytes(&self) -> Result<Vec<u8>, EventError> {
        match &self.body {
            None => Ok(Vec::new()),
            Some(body) if self.is_base64_encoded => Ok(STANDARD.decode(body)?),
            Some(body) => Ok(body.clone().into_bytes()),
        }
    }

    /// Convert into the handler's request type.
    pub fn into_request(self) -> Result<ApiRequest, EventError> {
        let method = self.method().ok_or(EventError::MissingMethod)?;
        let mut request =
            ApiRequest::new(method, self.request_path()).with_body(self.body_bytes()?);

        if let Some(id) = self
            .request_context
            .as_ref()
            .and_then(|c| c.request_id.as_deref())
        {
            request = request.with_request_id(RequestId::from_string(id));
        }

        Ok(request)
    }
}
