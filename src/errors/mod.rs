//! Domain-specific error types
//!
//! Every failure a visitor can trigger reduces to one human-readable string: the
//! error's `Display`. The HTTP layer uses the classification helpers on each type
//! to pick a status code.
//!
//! - **ResearchError**: table queries and detail lookups
//! - **SubmissionError**: claim, pledge and add-research forms
//! - **ImportError**: bulk grant import from tab-delimited files

pub mod import;
pub mod research;
pub mod submission;

pub use import::ImportError;
pub use research::ResearchError;
pub use submission::SubmissionError;

/// Result type alias for research queries
pub type ResearchResult<T> = Result<T, ResearchError>;

/// Result type alias for form submissions
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Result type alias for grant imports
pub type ImportResult<T> = Result<T, ImportError>;
