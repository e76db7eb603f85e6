use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::domain::SheetRow;

#[derive(Error, Debug)]
pub enum RowAppenderError {
    #[error("Google Sheets client is not initialized: {reason}")]
    NotInitialized { reason: String },
    #[error("Failed to append row to spreadsheet {spreadsheet_id}: {details}")]
    AppendFailed {
        spreadsheet_id: String,
        details: String,
    },
}

#[async_trait::async_trait]
pub trait RowAppender: Send + Sync {
    /// Appends `row` after the existing data of the spreadsheet and returns the provider's
    /// response body.
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        row: &SheetRow,
    ) -> error_stack::Result<Value, RowAppenderError>;
}

/// Builds a ready [`RowAppender`], for clients that need authorization first.
#[async_trait::async_trait]
pub trait AppenderConnector: Send + Sync {
    async fn connect(&self) -> error_stack::Result<Arc<dyn RowAppender>, RowAppenderError>;
}
