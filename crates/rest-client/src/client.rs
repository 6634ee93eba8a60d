//! JSON-over-HTTP client wrapper around reqwest.

use crate::error::RestError;
use http::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wait suggested on 429 when `Retry-After` is absent or unusable.
const DEFAULT_RETRY_AFTER_MS: u64 = 60_000;

/// A successful HTTP response, kept raw so the caller can verify it.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, RestError> {
        serde_json::from_str(&self.body).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse response body");
            RestError::Parse(e.to_string())
        })
    }
}

/// Generic REST client for making HTTP requests.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://gpay.ly/banking/api/onlinewallet/v1")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and return the raw response.
    ///
    /// # Arguments
    /// * `path` - Request path (e.g., "/info/balance")
    /// * `body` - Value serialized as the JSON request body
    /// * `headers` - Additional headers
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> Result<RawResponse, RestError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "POST request");

        let mut request = self.client.post(&url).json(body);
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-success status into an error, otherwise keep the response.
    async fn handle_response(&self, response: Response) -> Result<RawResponse, RestError> {
        let status = response.status();
        let headers = response.headers().clone();

        if status.is_success() {
            let body = response.text().await?;
            Ok(RawResponse {
                status,
                headers,
                body,
            })
        } else {
            let body = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_ms = headers
                    .get(http::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .and_then(|secs| secs.checked_mul(1000))
                    .unwrap_or(DEFAULT_RETRY_AFTER_MS);
                return Err(RestError::RateLimited { retry_after_ms });
            }

            Err(RestError::HttpError {
                status: status.as_u16(),
                message: body,
            })
        }
    }
}
