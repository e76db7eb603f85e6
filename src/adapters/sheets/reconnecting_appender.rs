use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{instrument, warn};

use crate::domain::SheetRow;
use crate::ports::row_appender::{AppenderConnector, RowAppender, RowAppenderError};

/// Connects on first use and keeps the client once a connection succeeds. A failed
/// connection fails only the append in progress; the next append tries again.
pub struct ReconnectingAppender<C> {
    connector: C,
    client: OnceCell<Arc<dyn RowAppender>>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for ReconnectingAppender<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ReconnectingAppender {{ connector: {:?}, connected: {} }}",
            self.connector,
            self.client.initialized()
        )
    }
}

impl<C: AppenderConnector> ReconnectingAppender<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            client: OnceCell::new(),
        }
    }

    /// Starts with a client that is already connected.
    pub fn with_client(connector: C, client: Arc<dyn RowAppender>) -> Self {
        Self {
            connector,
            client: OnceCell::new_with(Some(client)),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> error_stack::Result<&Arc<dyn RowAppender>, RowAppenderError> {
        self.client
            .get_or_try_init(|| async {
                let connected = self.connector.connect().await;
                if let Err(report) = &connected {
                    warn!("Google Sheets client is still unavailable: {:?}", report);
                }
                connected
            })
            .await
    }
}

#[async_trait::async_trait]
impl<C: AppenderConnector> RowAppender for ReconnectingAppender<C> {
    #[instrument(skip(self, row))]
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        row: &SheetRow,
    ) -> error_stack::Result<Value, RowAppenderError> {
        self.client().await?.append_row(spreadsheet_id, row).await
    }
}
