use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic error in {context}")]
    Arithmetic { context: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RefiError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RefiError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for rejections of caller-supplied parameters, as opposed to
    /// contract violations inside the engine.
    pub fn is_validation(&self) -> bool {
        matches!(self, RefiError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for RefiError {
    fn from(e: serde_json::Error) -> Self {
        RefiError::SerializationError(e.to_string())
    }
}
