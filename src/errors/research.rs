use thiserror::Error;

/// Errors raised while querying research records
#[derive(Error, Debug)]
pub enum ResearchError {
    /// No record carries this award number
    #[error("Research with award number '{0}' not found")]
    NotFound(String),

    /// Page numbers start at 1
    #[error("Invalid page number {0}")]
    InvalidPage(u64),

    /// Page size outside the offered options
    #[error("Invalid page size {0}: choose 10, 25, 50 or 100")]
    InvalidPageSize(u64),

    /// Unknown amount range key
    #[error("Unknown amount range '{0}'")]
    UnknownAmountRange(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl ResearchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResearchError::NotFound(_))
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResearchError::NotFound(_)
                | ResearchError::InvalidPage(_)
                | ResearchError::InvalidPageSize(_)
                | ResearchError::UnknownAmountRange(_)
        )
    }
}
