use lambda_http::http::{header::CONTENT_TYPE, StatusCode};
use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::Value;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// JSON body returned by the endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse {
    Success {
        success: bool,
        data: Value,
    },
    Failure {
        success: bool,
        error: &'static str,
        message: String,
    },
}

impl ApiResponse {
    pub fn success(data: Value) -> Self {
        ApiResponse::Success {
            success: true,
            data,
        }
    }

    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        ApiResponse::Failure {
            success: false,
            error: INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        ApiResponse::Failure {
            success: false,
            error: METHOD_NOT_ALLOWED,
            message: "Only POST requests are accepted".to_string(),
        }
    }
}

pub fn json_response(
    status: StatusCode,
    payload: &ApiResponse,
) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string(payload)?;

    let response = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .map_err(Box::new)?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let payload = ApiResponse::success(json!({ "spreadsheetId": "abc" }));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "success": true, "data": { "spreadsheetId": "abc" } })
        );
    }

    #[test]
    fn test_internal_error_shape() {
        let payload = ApiResponse::internal_error("Invalid or missing user type");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "success": false,
                "error": "Internal Server Error",
                "message": "Invalid or missing user type"
            })
        );
    }

    #[test]
    fn test_json_response_sets_status_and_content_type() {
        let response = json_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ApiResponse::method_not_allowed(),
        )
        .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
