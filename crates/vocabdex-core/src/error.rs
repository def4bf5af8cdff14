use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, VocabError>;

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("invalid locale: {0}")]
    InvalidLocale(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    pub retryable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl VocabError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLocale(_) => "INVALID_LOCALE",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Toml(_) => "TOML_ERROR",
            Self::Sqlite(_) => "SQLITE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True when repeating the same call later may succeed without caller changes.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }

    pub(crate) fn mutex_poisoned(what: &str) -> Self {
        Self::Internal(format!("{what} mutex poisoned"))
    }

    pub fn to_payload(&self, operation: impl Into<String>, target: Option<String>) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            retryable: self.is_retryable(),
            target,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_retryable_but_validation_is_not() {
        assert!(VocabError::NotFound("term 7".to_string()).is_retryable());
        assert!(!VocabError::Validation("bad".to_string()).is_retryable());
        assert!(!VocabError::Conflict("last name".to_string()).is_retryable());
    }

    #[test]
    fn payload_carries_code_and_omits_empty_fields() {
        let payload = VocabError::InvalidLocale("en_".to_string()).to_payload("search", None);
        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(value["code"], "INVALID_LOCALE");
        assert_eq!(value["operation"], "search");
        assert_eq!(value["retryable"], false);
        assert!(value.get("target").is_none());
        assert!(value.get("details").is_none());
        Uuid::parse_str(value["trace_id"].as_str().expect("trace id")).expect("uuid trace id");
    }

    #[test]
    fn busy_database_is_retryable() {
        let err = VocabError::Sqlite(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            None,
        ));
        assert!(err.is_retryable());
        assert_eq!(err.code(), "SQLITE_ERROR");
    }
}
