//! Handler error kinds.

use thiserror::Error;

/// Errors produced while handling a request.
///
/// Each kind maps to exactly one HTTP status code; the message becomes the
/// `erro` field of the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing, malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// Unknown record id.
    #[error("{0}")]
    NotFound(String),

    /// Method not handled by any route.
    #[error("Método {0} não permitido")]
    MethodNotAllowed(String),

    /// Everything else: store failures, unparseable bodies.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found() -> Self {
        ApiError::NotFound("Produto não encontrado".to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed(_) => 405,
            ApiError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<std::str::Utf8Error> for ApiError {
    fn from(e: std::str::Utf8Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::validation("x").status_code(), 400);
        assert_eq!(ApiError::not_found().status_code(), 404);
        assert_eq!(ApiError::MethodNotAllowed("PATCH".into()).status_code(), 405);
        assert_eq!(ApiError::internal("boom").status_code(), 500);
    }

    #[test]
    fn test_method_not_allowed_names_method() {
        let err = ApiError::MethodNotAllowed("PATCH".into());
        assert_eq!(err.to_string(), "Método PATCH não permitido");
    }

    #[test]
    fn test_json_error_is_internal() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), 500);
    }
}
