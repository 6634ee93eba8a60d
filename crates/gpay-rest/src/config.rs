//! Client configuration.

use crate::error::GPayRestError;
use auth::SignatureEncoding;
use common::GPayEnvironment;
use std::time::Duration;

/// Language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Request timeout for wallet API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`GPayRestClient`](crate::GPayRestClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: GPayEnvironment,
    /// Overrides the environment URL, e.g. for a local mock server.
    pub base_url: Option<String>,
    /// Sent as `Accept-Language`.
    pub language: String,
    pub timeout: Duration,
    /// Encoding of the signature this client sends.
    pub request_encoding: SignatureEncoding,
    /// Encoding of the signature the server sends back.
    pub response_encoding: SignatureEncoding,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: GPayEnvironment::default(),
            base_url: None,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: REQUEST_TIMEOUT,
            request_encoding: SignatureEncoding::Base64,
            response_encoding: SignatureEncoding::Hex,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Looks for:
    /// - `GPAY_ENVIRONMENT` - `staging` (default) or `production`
    /// - `GPAY_LANGUAGE` - response language, `en` when unset or empty
    /// - `GPAY_REQUEST_SIGNATURE_ENCODING` - `hex` or `base64` (default)
    /// - `GPAY_RESPONSE_SIGNATURE_ENCODING` - `hex` (default) or `base64`
    ///
    /// # Errors
    /// Returns `GPayRestError::Config` for an unrecognised encoding name.
    pub fn from_env() -> Result<Self, GPayRestError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let language = std::env::var("GPAY_LANGUAGE").ok();

        Ok(Self {
            environment: GPayEnvironment::from_env(),
            language: normalize_language(language.as_deref()),
            request_encoding: encoding_var(
                "GPAY_REQUEST_SIGNATURE_ENCODING",
                defaults.request_encoding,
            )?,
            response_encoding: encoding_var(
                "GPAY_RESPONSE_SIGNATURE_ENCODING",
                defaults.response_encoding,
            )?,
            ..defaults
        })
    }

    pub fn with_environment(mut self, environment: GPayEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the response language; empty falls back to `en`.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = normalize_language(Some(language));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.request_encoding = encoding;
        self
    }

    pub fn with_response_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.response_encoding = encoding;
        self
    }

    /// Base URL actually used for requests.
    pub fn rest_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.rest_base_url())
    }
}

pub(crate) fn normalize_language(language: Option<&str>) -> String {
    match language.map(str::trim) {
        Some(lang) if !lang.is_empty() => lang.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

fn encoding_var(
    name: &str,
    default: SignatureEncoding,
) -> Result<SignatureEncoding, GPayRestError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e| GPayRestError::Config(format!("{name}: {e}"))),
        _ => Ok(default),
    }
}
