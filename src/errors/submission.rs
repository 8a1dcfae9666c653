use thiserror::Error;

use crate::common::db_errors::DbErrorKind;

/// Errors raised while accepting a claim, pledge or new research record
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// A required form field was blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field was present but unusable
    #[error("{field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Claims must confirm the grant was canceled
    #[error("Please confirm that this research grant has been canceled")]
    CancellationNotConfirmed,

    /// The referenced research record does not exist
    #[error("Research {0} not found")]
    ResearchNotFound(i32),

    /// Another record already uses this award number
    #[error("A research record with award number '{0}' already exists")]
    DuplicateAwardNumber(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl SubmissionError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SubmissionError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SubmissionError::ResearchNotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        match self {
            SubmissionError::DuplicateAwardNumber(_) => true,
            SubmissionError::Database(err) => {
                DbErrorKind::from_db_err(err) == DbErrorKind::UniqueViolation
            }
            _ => false,
        }
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        match self {
            SubmissionError::Database(err) => DbErrorKind::from_db_err(err).is_client_error(),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = SubmissionError::MissingField("First name");
        assert_eq!(err.to_string(), "First name is required");
        assert!(err.is_client_error());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_invalid_field_message() {
        let err = SubmissionError::invalid("Amount", "must not be negative");
        assert_eq!(err.to_string(), "Amount: must not be negative");
    }

    #[test]
    fn test_classification() {
        assert!(SubmissionError::ResearchNotFound(7).is_not_found());
        assert!(SubmissionError::DuplicateAwardNumber("1".to_string()).is_conflict());
        let db = SubmissionError::Database(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(!db.is_client_error());
    }
}
