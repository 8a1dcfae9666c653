pub mod grants;
pub mod pledges;
pub mod research;
pub mod research_claims;
