// Utility functions
pub mod format;

pub use format::{format_date, format_number};
