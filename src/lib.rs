pub mod common;
pub mod config;
pub mod database;
pub mod errors;
pub mod pages;
pub mod services;

#[cfg(feature = "server")]
pub mod server;
