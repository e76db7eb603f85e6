use std::sync::Arc;

use lambda_http::{run, service_fn, Error, Request};
use lead_capture::adapters::config::app_config::AppConfig;
use lead_capture::adapters::http::lambda_adapter::LambdaHttpAdapter;
use lead_capture::telemetry::{setup_panic_hook, setup_tracing};
use tracing::{info, instrument};

mod submission_service_factory;

use submission_service_factory::SubmissionServiceFactory;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Error> {
    let config = AppConfig::load().map_err(|report| format!("{report:?}"))?;

    setup_tracing(&config.logging).map_err(|e| e.to_string())?;
    setup_panic_hook();

    info!("Starting lead-capture endpoint");

    let service = SubmissionServiceFactory::create(&config.sheets).await;
    let adapter = LambdaHttpAdapter::new(Arc::new(service));

    run(service_fn(move |request: Request| {
        let adapter = adapter.clone();
        async move { adapter.handle(request).await }
    }))
    .await
}
