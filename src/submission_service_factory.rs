use std::sync::Arc;

use lead_capture::adapters::config::sheets_config::SheetsConfig;
use lead_capture::adapters::sheets::credentials::load_service_account_key;
use lead_capture::adapters::sheets::reconnecting_appender::ReconnectingAppender;
use lead_capture::adapters::sheets::spreadsheet_manager::SpreadsheetConnector;
use lead_capture::adapters::sheets::unavailable_appender::UnavailableAppender;
use lead_capture::ports::row_appender::AppenderConnector;
use lead_capture::{RowAppender, SubmissionService};
use tracing::error;

pub struct SubmissionServiceFactory;

impl SubmissionServiceFactory {
    /// Connects the Sheets client at startup. When that fails the service still starts:
    /// missing credentials fail every submission, a failed authorization is retried on the
    /// next submission.
    pub async fn create(config: &SheetsConfig) -> SubmissionService {
        let appender = Self::create_appender(config).await;
        SubmissionService::new(appender, config.spreadsheets.clone())
    }

    async fn create_appender(config: &SheetsConfig) -> Arc<dyn RowAppender> {
        let Some(secret) = load_service_account_key(&config.credentials_env) else {
            return Arc::new(UnavailableAppender::new(format!(
                "service account credentials could not be loaded from {}",
                config.credentials_env
            )));
        };

        let connector = SpreadsheetConnector::new(secret, config.append_range.clone());
        match connector.connect().await {
            Ok(client) => Arc::new(ReconnectingAppender::with_client(connector, client)),
            Err(report) => {
                error!("❌ Google Sheets client initialization failed: {:?}", report);
                Arc::new(ReconnectingAppender::new(connector))
            }
        }
    }
}
