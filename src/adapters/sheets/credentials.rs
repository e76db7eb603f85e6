use error_stack::{report, ResultExt};
use google_sheets4::oauth2::ServiceAccountKey;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{error, info};

pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Environment variable {0} is not set")]
    MissingVariable(String),
    #[error("Service account credentials are not a valid JSON object")]
    InvalidJson,
    #[error("Service account credentials are missing '{0}'")]
    MissingField(&'static str),
    #[error("Service account credentials could not be converted into a key")]
    InvalidKey,
}

/// Parses a service account JSON blob. Only `client_email` and `private_key` are required;
/// `token_uri` falls back to Google's endpoint.
pub fn parse_service_account_key(
    raw: &str,
) -> error_stack::Result<ServiceAccountKey, CredentialsError> {
    let mut fields = serde_json::from_str::<Map<String, Value>>(raw)
        .change_context(CredentialsError::InvalidJson)?;

    require_string(&fields, "client_email")?;
    let private_key = require_string(&fields, "private_key")?;

    // Keys pasted into a single-line variable carry literal "\n" sequences
    let private_key = private_key.replace("\\n", "\n");
    fields.insert("private_key".to_string(), Value::String(private_key));

    if !fields.get("token_uri").is_some_and(Value::is_string) {
        fields.insert(
            "token_uri".to_string(),
            Value::String(GOOGLE_TOKEN_URI.to_string()),
        );
    }

    serde_json::from_value(Value::Object(fields)).change_context(CredentialsError::InvalidKey)
}

fn require_string(
    fields: &Map<String, Value>,
    name: &'static str,
) -> error_stack::Result<String, CredentialsError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| report!(CredentialsError::MissingField(name)))
}

pub fn read_service_account_key(
    env_var: &str,
) -> error_stack::Result<ServiceAccountKey, CredentialsError> {
    let raw = std::env::var(env_var)
        .map_err(|_| report!(CredentialsError::MissingVariable(env_var.to_string())))?;

    parse_service_account_key(&raw)
        .attach_printable_lazy(|| format!("while reading credentials from {}", env_var))
}

/// Loads credentials once at startup. Failures are logged and reported as `None`; callers
/// surface the problem when the client is first needed.
pub fn load_service_account_key(env_var: &str) -> Option<ServiceAccountKey> {
    match read_service_account_key(env_var) {
        Ok(key) => {
            info!("Loaded service account credentials for {}", key.client_email);
            Some(key)
        }
        Err(report) => {
            error!("❌ Could not load service account credentials: {:?}", report);
            None
        }
    }
}
