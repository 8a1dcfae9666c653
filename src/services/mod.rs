pub mod forms;
pub mod grant_service;
pub mod import_service;
pub mod research_query;
pub mod research_service;
pub mod submission_service;
pub mod validation;

pub use forms::{ClaimForm, NewResearchForm, PledgeForm, Validate};
pub use grant_service::GrantService;
pub use import_service::{GrantRecord, ImportService};
pub use research_query::{AmountRange, Page, PageSize, ResearchQuery, ResearchQueryParams};
pub use research_service::{ResearchDetail, ResearchService};
pub use submission_service::SubmissionService;
pub use validation::ValidationService;
