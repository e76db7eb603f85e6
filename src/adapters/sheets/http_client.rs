use google_sheets4::{hyper, hyper_rustls};

pub type HttpsConnector = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;
pub type HttpClient = hyper::Client<HttpsConnector>;

/// Shared by the authenticator and the Sheets hub. Fails when the platform
/// certificate store cannot be read.
pub fn http_client() -> std::io::Result<HttpClient> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_only()
        .enable_http1()
        .build();

    Ok(hyper::Client::builder().build(connector))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_does_not_panic_without_root_store() {
        // Hosts without a certificate store get an error instead of a panic
        if let Err(e) = http_client() {
            assert!(!e.to_string().is_empty());
        }
    }
}
