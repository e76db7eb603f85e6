use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use lambda_http::http::{self, StatusCode};
use lambda_http::{Body, Request, Response};
use lead_capture::adapters::http::lambda_adapter::LambdaHttpAdapter;
use lead_capture::adapters::sheets::reconnecting_appender::ReconnectingAppender;
use lead_capture::adapters::sheets::unavailable_appender::UnavailableAppender;
use lead_capture::ports::row_appender::AppenderConnector;
use lead_capture::{
    RowAppender, RowAppenderError, SheetRow, SpreadsheetTargets, SubmissionService,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

#[derive(Default)]
struct InMemorySheets {
    rows: Mutex<Vec<(String, Vec<String>)>>,
}

#[async_trait::async_trait]
impl RowAppender for InMemorySheets {
    async fn append_row(
        &self,
        spreadsheet_id: &str,
        row: &SheetRow,
    ) -> error_stack::Result<Value, RowAppenderError> {
        let mut rows = self.rows.lock().unwrap();
        rows.push((spreadsheet_id.to_string(), row.cells().to_vec()));
        Ok(json!({
            "spreadsheetId": spreadsheet_id,
            "tableRange": "Sheet1!A1:I1",
            "updates": { "updatedRows": 1, "updatedCells": row.len() }
        }))
    }
}

/// Refuses the first connection, as a token endpoint hiccup at cold start would.
struct ColdStartConnector {
    sheets: Arc<InMemorySheets>,
    refused: AtomicBool,
}

#[async_trait::async_trait]
impl AppenderConnector for ColdStartConnector {
    async fn connect(&self) -> error_stack::Result<Arc<dyn RowAppender>, RowAppenderError> {
        if !self.refused.swap(true, Ordering::SeqCst) {
            return Err(error_stack::report!(RowAppenderError::NotInitialized {
                reason: "Failed to authorize the service account".to_string(),
            }));
        }
        Ok(self.sheets.clone())
    }
}

fn targets() -> SpreadsheetTargets {
    SpreadsheetTargets {
        buy: "buy-sheet".to_string(),
        sell: "sell-sheet".to_string(),
        rent: "rent-sheet".to_string(),
    }
}

fn adapter_with(appender: Arc<dyn RowAppender>) -> LambdaHttpAdapter {
    LambdaHttpAdapter::new(Arc::new(SubmissionService::new(appender, targets())))
}

fn post(body: &str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri("/api/submit-form")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_body(response: &Response<Body>) -> Value {
    match response.body() {
        Body::Text(text) => serde_json::from_str(text).unwrap(),
        Body::Binary(bytes) => serde_json::from_slice(bytes).unwrap(),
        Body::Empty => Value::Null,
    }
}

#[tokio::test]
async fn test_rent_submission_is_appended_with_normalized_budget() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    let response = adapter
        .handle(post(
            r#"{"userType":"rent","name":"A. Lee","email":"a@x.com","phoneNumber":"555-1234","budget":"$1,200"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(&response);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["spreadsheetId"], json!("rent-sheet"));

    let rows = sheets.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    let (spreadsheet_id, cells) = &rows[0];
    assert_eq!(spreadsheet_id, "rent-sheet");
    assert_eq!(&cells[1..4], &["A. Lee", "a@x.com", "555-1234"]);
    assert_eq!(cells.last().map(String::as_str), Some("1200"));
    assert!(chrono::DateTime::parse_from_rfc3339(&cells[0]).is_ok());
}

#[tokio::test]
async fn test_each_user_type_reaches_its_own_spreadsheet() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    for user_type in ["buy", "sell", "rent"] {
        let body = json!({ "userType": user_type, "name": "Sam" }).to_string();
        let response = adapter.handle(post(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let ids = sheets
        .rows
        .lock()
        .unwrap()
        .iter()
        .map(|(id, _)| id.clone())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["buy-sheet", "sell-sheet", "rent-sheet"]);
}

#[tokio::test]
async fn test_extra_fields_are_appended_in_body_order() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    let response = adapter
        .handle(post(
            r#"{"userType":"sell","zip":"90210","name":"Kim","features":["Pool"," Garage "],"askingPrice":"$450,000"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let rows = sheets.rows.lock().unwrap();
    let cells = &rows[0].1;
    assert_eq!(&cells[cells.len() - 3..], &["90210", "Pool; Garage", "450000"]);
}

#[tokio::test]
async fn test_missing_user_type_is_rejected() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    let response = adapter
        .handle(post(r#"{"name":"A. Lee","email":"a@x.com"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&response);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Internal Server Error"));
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Invalid or missing user type"));
    assert!(sheets.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_user_type_is_rejected() {
    let adapter = adapter_with(Arc::new(InMemorySheets::default()));

    let response = adapter
        .handle(post(r#"{"userType":"Lease"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let adapter = adapter_with(Arc::new(InMemorySheets::default()));

    let response = adapter.handle(post("{\"userType\": ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(&response);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse request body"));
}

#[tokio::test]
async fn test_valid_json_that_is_not_an_object_is_a_missing_user_type() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    for body in ["[]", "null", "42", r#""buy""#] {
        let response = adapter.handle(post(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(&response)["message"],
            json!("Invalid or missing user type")
        );
    }
    assert!(sheets.rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_uninitialized_client_fails_every_submission() {
    let adapter = adapter_with(Arc::new(UnavailableAppender::new(
        "service account credentials could not be loaded from GOOGLE_SERVICE_ACCOUNT_KEY",
    )));

    let response = adapter
        .handle(post(r#"{"userType":"buy","name":"A"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(&response)["message"],
        json!("Google Sheets client is not initialized: service account credentials could not be loaded from GOOGLE_SERVICE_ACCOUNT_KEY")
    );
}

#[tokio::test]
async fn test_client_recovers_after_failed_authorization() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(Arc::new(ReconnectingAppender::new(ColdStartConnector {
        sheets: sheets.clone(),
        refused: AtomicBool::new(false),
    })));
    let body = r#"{"userType":"buy","name":"A"}"#;

    let first = adapter.handle(post(body)).await.unwrap();
    assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(&first)["message"],
        json!("Google Sheets client is not initialized: Failed to authorize the service account")
    );

    let second = adapter.handle(post(body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(sheets.rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_non_post_is_not_allowed() {
    let sheets = Arc::new(InMemorySheets::default());
    let adapter = adapter_with(sheets.clone());

    let request = http::Request::builder()
        .method("GET")
        .uri("/api/submit-form")
        .body(Body::Empty)
        .unwrap();
    let response = adapter.handle(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(&response)["error"], json!("Method Not Allowed"));
    assert!(sheets.rows.lock().unwrap().is_empty());
}
