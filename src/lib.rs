// Public API exports
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod telemetry;

// Re-export key types for easy access
pub use application::submission_service::{SubmissionError, SubmissionService};
pub use domain::*;
pub use ports::row_appender::{RowAppender, RowAppenderError};
