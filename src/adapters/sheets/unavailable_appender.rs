use error_stack::report;
use serde_json::Value;

use crate::domain::SheetRow;
use crate::ports::row_appender::{RowAppender, RowAppenderError};

/// Stands in for the Sheets client when no credentials were loaded at startup. Every
/// append fails with the startup reason.
#[derive(Debug, Clone)]
pub struct UnavailableAppender {
    reason: String,
}

impl UnavailableAppender {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl RowAppender for UnavailableAppender {
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        _row: &SheetRow,
    ) -> error_stack::Result<Value, RowAppenderError> {
        Err(report!(RowAppenderError::NotInitialized {
            reason: self.reason.clone(),
        })
        .attach_printable(format!("Dropped append to spreadsheet {}", spreadsheet_id)))
    }
}
