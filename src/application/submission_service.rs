use std::sync::Arc;

use chrono::{DateTime, Utc};
use error_stack::{report, Report};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::submission::USER_TYPE_FIELD;
use crate::domain::{FormSubmission, SheetRow, SpreadsheetTargets};
use crate::ports::row_appender::{RowAppender, RowAppenderError};

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("Failed to parse request body: {details}")]
    InvalidPayload { details: String },
    #[error("Invalid or missing user type")]
    InvalidUserType,
    #[error("Google Sheets client is not initialized: {reason}")]
    ClientUnavailable { reason: String },
    #[error("Spreadsheet append failed: {details}")]
    AppendFailed { details: String },
}

impl From<&RowAppenderError> for SubmissionError {
    fn from(error: &RowAppenderError) -> Self {
        match error {
            RowAppenderError::NotInitialized { reason } => SubmissionError::ClientUnavailable {
                reason: reason.clone(),
            },
            RowAppenderError::AppendFailed { details, .. } => SubmissionError::AppendFailed {
                details: details.clone(),
            },
        }
    }
}

/// Turns a raw form body into a row on the spreadsheet selected by its `userType`.
pub struct SubmissionService {
    appender: Arc<dyn RowAppender>,
    spreadsheets: SpreadsheetTargets,
}

impl std::fmt::Debug for SubmissionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubmissionService {{ spreadsheets: {:?} }}", self.spreadsheets)
    }
}

impl SubmissionService {
    pub fn new(appender: Arc<dyn RowAppender>, spreadsheets: SpreadsheetTargets) -> Self {
        Self {
            appender,
            spreadsheets,
        }
    }

    pub async fn submit(&self, body: &[u8]) -> error_stack::Result<Value, SubmissionError> {
        self.submit_at(body, Utc::now()).await
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn submit_at(
        &self,
        body: &[u8],
        received_at: DateTime<Utc>,
    ) -> error_stack::Result<Value, SubmissionError> {
        let submission = FormSubmission::from_json(body).map_err(|e| {
            report!(SubmissionError::InvalidPayload {
                details: e.to_string(),
            })
        })?;

        let user_type = submission.user_type().ok_or_else(|| {
            report!(SubmissionError::InvalidUserType).attach_printable(format!(
                "Received userType: {:?}",
                submission.get(USER_TYPE_FIELD)
            ))
        })?;

        let row = SheetRow::from_submission(&submission, received_at);
        let spreadsheet_id = self.spreadsheets.spreadsheet_id(user_type);

        info!(
            "Appending {} cells for a {} submission to spreadsheet {}",
            row.len(),
            user_type,
            spreadsheet_id
        );

        self.appender
            .append_row(spreadsheet_id, &row)
            .await
            .map_err(|report: Report<RowAppenderError>| {
                let context = SubmissionError::from(report.current_context());
                report.change_context(context)
            })
    }
}
