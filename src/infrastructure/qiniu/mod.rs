pub mod auth;
pub mod client;
pub mod error;
pub mod region;
pub mod types;
