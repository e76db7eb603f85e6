use serde::Deserialize;

use crate::domain::SpreadsheetTargets;

pub const DEFAULT_CREDENTIALS_ENV: &str = "GOOGLE_SERVICE_ACCOUNT_KEY";
pub const DEFAULT_APPEND_RANGE: &str = "A1";

#[derive(Deserialize, Debug, Clone)]
pub struct SheetsConfig {
    /// Name of the environment variable holding the service account JSON
    #[serde(default = "default_credentials_env")]
    pub credentials_env: String,
    /// Anchor cell the provider appends after
    #[serde(default = "default_append_range")]
    pub append_range: String,
    pub spreadsheets: SpreadsheetTargets,
}

fn default_credentials_env() -> String {
    DEFAULT_CREDENTIALS_ENV.to_string()
}

fn default_append_range() -> String {
    DEFAULT_APPEND_RANGE.to_string()
}
