#![forbid(unsafe_code)]

//! Errors raised at the document boundary.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Failure to decode or encode a tutorial or index document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::DocumentError;

    #[test]
    fn json_error_is_wrapped_with_context() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = DocumentError::from(err);
        assert!(error.to_string().starts_with("JSON error:"));
    }
}
