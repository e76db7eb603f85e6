use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::{info, instrument};

use super::http_client::{HttpClient, HttpsConnector};
use super::spreadsheet_manager::SpreadsheetManagerError;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Builds the service account authenticator and fetches a first token, so bad credentials
/// are reported at startup instead of on the first append.
#[instrument(skip(secret, client), fields(client_email = %secret.client_email))]
pub async fn auth(
    secret: oauth2::ServiceAccountKey,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetManagerError> {
    let authenticator = oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::AuthorizationFailed)
        .attach_printable("could not create an authenticator")?;

    authenticator
        .token(&[SPREADSHEETS_SCOPE])
        .await
        .change_context(SpreadsheetManagerError::AuthorizationFailed)
        .attach_printable("could not obtain an access token for the spreadsheets scope")?;

    info!("✅ Service account authorized");
    Ok(authenticator)
}
