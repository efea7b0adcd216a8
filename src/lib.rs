pub mod config;
pub mod error;

// Outbound request guard
pub mod http;

// Data sources
pub mod github;
pub mod leetcode;

// Surfaces
pub mod api;
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
