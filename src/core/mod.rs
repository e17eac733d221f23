// Public modules
pub mod apply;
pub mod checklist;
pub mod config;
pub mod defaults;
pub mod error;
pub mod scan;
pub mod swap;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
