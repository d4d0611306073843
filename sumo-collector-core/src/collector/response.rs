//! Raw API responses
//!
//! Mutating endpoints do not always answer with pure JSON, so responses are
//! kept as text and only decoded where a caller expects JSON.

use reqwest::header::ETAG;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A successful response, body unparsed
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Value of the `ETag` header, if sent
    pub etag: Option<String>,
    pub body: String,
}

impl ApiResponse {
    /// Read a response off the wire, turning non-2xx statuses into `Error::Api`
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(Self { status, etag, body })
    }

    /// Decode the body as JSON, logging the raw response if it is not JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::warn!("Sumo Logic sent something that does not appear to be JSON, here it is...");
            tracing::warn!(status = self.status.as_u16(), "status code: {}", self.status);
            tracing::warn!("{}", self.body);
            Error::Json(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn response(body: &str) -> ApiResponse {
        ApiResponse {
            status: StatusCode::OK,
            etag: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_json_decodes_body() {
        let value: Value = response(r#"{"collectors":[]}"#).json().unwrap();
        assert!(value["collectors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_rejects_html() {
        crate::logging::init_test();
        let err = response("<html>maintenance</html>").json::<Value>().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_json_failure_logs_status_and_body() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let bad_gateway = ApiResponse {
            status: StatusCode::BAD_GATEWAY,
            etag: None,
            body: "<html>upstream unavailable</html>".to_string(),
        };
        let err = tracing::subscriber::with_default(subscriber, || {
            bad_gateway.json::<Value>().unwrap_err()
        });

        assert!(matches!(err, Error::Json(_)));
        let logged = captured.text();
        assert!(logged.contains("502"), "status missing from log: {logged}");
        assert!(
            logged.contains("<html>upstream unavailable</html>"),
            "body missing from log: {logged}"
        );
    }
}
