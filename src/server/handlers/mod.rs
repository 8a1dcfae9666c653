pub mod claims;
pub mod grants;
pub mod health;
pub mod pages;
pub mod pledges;
pub mod research;
