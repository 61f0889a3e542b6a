//! Product identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of random bytes behind a generated id (8 base64 characters).
const ID_BYTES: usize = 6;

/// A product identifier.
///
/// Generated server-side at creation and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an ID from an existing string (e.g. a path segment).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a short random token.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; ID_BYTES] = rand::thread_rng().gen();
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
