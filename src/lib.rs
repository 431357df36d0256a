pub mod audit;
pub mod config;
pub mod error;
pub mod prompt;
pub mod scoring;
pub mod session;
pub mod standings;
pub mod store;
pub mod update;
// cmd and reports are binary modules (declared in main.rs).
