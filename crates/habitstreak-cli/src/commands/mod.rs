pub mod config;
pub mod milestone;
pub mod streak;
