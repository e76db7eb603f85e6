use std::sync::Arc;

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Request, Response};
use tracing::{error, info, instrument, warn};

use super::response::{json_response, ApiResponse};
use crate::application::submission_service::SubmissionService;

/// Serves the submission endpoint behind a Lambda function URL or API Gateway.
#[derive(Clone, Debug)]
pub struct LambdaHttpAdapter {
    service: Arc<SubmissionService>,
}

impl LambdaHttpAdapter {
    pub fn new(service: Arc<SubmissionService>) -> Self {
        Self { service }
    }

    #[instrument(
        skip(self, request),
        fields(method = %request.method(), path = %request.uri().path())
    )]
    pub async fn handle(&self, request: Request) -> Result<Response<Body>, lambda_http::Error> {
        if request.method() != Method::POST {
            warn!("Rejecting {} request", request.method());
            return json_response(
                StatusCode::METHOD_NOT_ALLOWED,
                &ApiResponse::method_not_allowed(),
            );
        }

        match self.service.submit(request.body()).await {
            Ok(data) => {
                info!("✅ Submission appended");
                json_response(StatusCode::OK, &ApiResponse::success(data))
            }
            Err(report) => {
                error!("❌ Submission failed: {:?}", report);
                json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ApiResponse::internal_error(report.current_context().to_string()),
                )
            }
        }
    }
}
