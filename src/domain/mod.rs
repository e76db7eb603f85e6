pub mod normalize;
pub mod sheet_row;
pub mod spreadsheet_targets;
pub mod submission;
pub mod user_type;

// Re-export commonly used types
pub use sheet_row::SheetRow;
pub use spreadsheet_targets::SpreadsheetTargets;
pub use submission::FormSubmission;
pub use user_type::UserType;
