//! Database error categorization
//!
//! Classifies `sea_orm::DbErr` values so form submissions can tell a duplicate
//! award number or a dangling research reference apart from an outage.

use sea_orm::{DbErr, SqlErr};

/// Categories of database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Record not found (query returned no results)
    NotFound,

    /// Unique constraint violation
    UniqueViolation,

    /// Foreign key constraint violation
    ForeignKeyViolation,

    /// Database connection error
    ConnectionError,

    /// Unknown/other database error
    Unknown,
}

impl DbErrorKind {
    /// Categorize a sea_orm database error
    pub fn from_db_err(err: &DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => return Self::UniqueViolation,
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Self::ForeignKeyViolation,
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::ConnectionError,
            DbErr::Exec(_) | DbErr::Query(_) => {
                let msg_lower = err.to_string().to_lowercase();
                if msg_lower.contains("unique") || msg_lower.contains("duplicate") {
                    Self::UniqueViolation
                } else if msg_lower.contains("foreign key") {
                    Self::ForeignKeyViolation
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::UniqueViolation | Self::ForeignKeyViolation
        )
    }
}
