//! Normalized request passed to the handler.

use std::fmt;

use rand::Rng;

/// Unique request identifier for tracing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let entropy: u64 = rand::thread_rng().gen();
        Self(format!("{:x}-{:016x}", millis, entropy))
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    /// Anything else, kept verbatim for error messages.
    Other(String),
}

impl Method {
    /// Parse a method token (case-insensitive).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "PATCH" => Method::Patch,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            _ => Method::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Method {
    fn from(raw: &str) -> Self {
        Method::parse(raw)
    }
}

/// A request as seen by the handler, independent of the trigger that
/// delivered it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// HTTP method.
    pub method: Method,
    /// Request path without the query string.
    pub path: String,
    /// Raw request body.
    pub body: Vec<u8>,
}

impl ApiRequest {
    /// Create a request with an empty body and a fresh request ID.
    pub fn new(method: impl Into<Method>, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = match path.split_once('?') {
            Some((path, _query)) => path.to_string(),
            None => path,
        };
        Self {
            request_id: RequestId::generate(),
            method: method.into(),
            path,
            body: Vec::new(),
        }
    }

    /// Attach a body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Use an existing request ID (e.g. one assigned by the gateway).
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Body as text, `None` when it is absent or only whitespace.
    pub fn body_text(&self) -> Result<Option<&str>, std::str::Utf8Error> {
        let text = std::str::from_utf8(&self.body)?;
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}
