use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{AppendValuesResponse, ValueRange},
    oauth2::ServiceAccountKey,
    Sheets,
};
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use super::{
    auth::{self},
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::domain::SheetRow;
use crate::ports::row_appender::{AppenderConnector, RowAppender, RowAppenderError};

/// Values are parsed as if typed into the sheet, so formulas and number formats apply.
pub const VALUE_INPUT_OPTION: &str = "USER_ENTERED";
/// New rows are inserted after the table instead of overwriting what follows it.
pub const INSERT_DATA_OPTION: &str = "INSERT_ROWS";

pub struct SpreadsheetManager {
    append_range: String,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ append_range: {:?} }}",
            self.append_range
        )
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to build the HTTPS client")]
    FailedToBuildHttpClient,
    #[error("Failed to authorize the service account")]
    AuthorizationFailed,
    #[error("Failed to append values")]
    FailedToAppend,
    #[error("Failed to serialize the append response")]
    FailedToSerializeResponse,
}

impl SpreadsheetManager {
    /// Authorizes `secret` and builds the hub.
    #[instrument(name = "SpreadsheetManager::connect", skip(secret))]
    pub async fn connect(
        secret: ServiceAccountKey,
        append_range: String,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client()
            .change_context(SpreadsheetManagerError::FailedToBuildHttpClient)
            .attach_printable("Could not load the native root certificates")?;
        let auth = auth::auth(secret, client.clone()).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        Ok(SpreadsheetManager { append_range, hub })
    }

    #[instrument(skip(value_range))]
    pub async fn append_values(
        &self,
        spreadsheet_id: &str,
        value_range: ValueRange,
    ) -> error_stack::Result<AppendValuesResponse, SpreadsheetManagerError> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_append(value_range, spreadsheet_id, &self.append_range)
            .value_input_option(VALUE_INPUT_OPTION)
            .insert_data_option(INSERT_DATA_OPTION)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToAppend)
            .attach_printable_lazy(|| {
                format!(
                    "Failed to append to range {} of spreadsheet {}",
                    self.append_range, spreadsheet_id
                )
            })?;

        info!(
            "✅ Appended to {}",
            response
                .updates
                .as_ref()
                .and_then(|updates| updates.updated_range.as_deref())
                .unwrap_or("<unknown range>")
        );

        Ok(response)
    }
}

#[async_trait::async_trait]
impl RowAppender for SpreadsheetManager {
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        row: &SheetRow,
    ) -> error_stack::Result<Value, RowAppenderError> {
        let append_failed = |details: String| RowAppenderError::AppendFailed {
            spreadsheet_id: spreadsheet_id.to_string(),
            details,
        };

        let response = self
            .append_values(spreadsheet_id, ValueRange::from_sheet_row(row))
            .await
            .map_err(|report| {
                let details = report
                    .frames()
                    .filter_map(|frame| frame.downcast_ref::<google_sheets4::Error>())
                    .map(ToString::to_string)
                    .next()
                    .unwrap_or_else(|| report.current_context().to_string());
                report.change_context(append_failed(details))
            })?;

        serde_json::to_value(response).map_err(|e| {
            report!(SpreadsheetManagerError::FailedToSerializeResponse)
                .attach_printable(e.to_string())
                .change_context(append_failed(e.to_string()))
        })
    }
}

/// Credentials and settings needed to build a [`SpreadsheetManager`] on demand.
#[derive(Clone)]
pub struct SpreadsheetConnector {
    secret: ServiceAccountKey,
    append_range: String,
}

impl Debug for SpreadsheetConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetConnector {{ client_email: {:?}, append_range: {:?} }}",
            self.secret.client_email, self.append_range
        )
    }
}

impl SpreadsheetConnector {
    pub fn new(secret: ServiceAccountKey, append_range: String) -> Self {
        Self {
            secret,
            append_range,
        }
    }
}

#[async_trait::async_trait]
impl AppenderConnector for SpreadsheetConnector {
    async fn connect(&self) -> error_stack::Result<Arc<dyn RowAppender>, RowAppenderError> {
        let manager = SpreadsheetManager::connect(self.secret.clone(), self.append_range.clone())
            .await
            .map_err(|report| {
                let reason = report.current_context().to_string();
                report.change_context(RowAppenderError::NotInitialized { reason })
            })?;

        info!("✅ Google Sheets client ready");
        Ok(Arc::new(manager))
    }
}
