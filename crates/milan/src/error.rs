use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// A required request field is missing or malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field, or `"body"` when the payload itself is unusable.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("Missing '{}'", field))
    }
}

/// Failure of a single match request. No partial results are produced.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("computation failure: {0}")]
    Computation(#[from] EphemerisError),
}

impl MatchError {
    /// Whether the caller is at fault (400-class) rather than the oracle (500-class).
    pub fn is_client_error(&self) -> bool {
        matches!(self, MatchError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = ValidationError::missing("dob1");
        assert_eq!(err.field, "dob1");
        assert_eq!(err.to_string(), "dob1: Missing 'dob1'");
    }

    #[test]
    fn test_classification() {
        let client: MatchError = ValidationError::missing("name1").into();
        assert!(client.is_client_error());

        let server: MatchError = EphemerisError::Unavailable {
            message: "lock poisoned".to_string(),
        }
        .into();
        assert!(!server.is_client_error());
    }
}
