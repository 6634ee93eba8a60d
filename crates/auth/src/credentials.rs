//! Secure API credential management.
//!
//! The shared secret and the password are wrapped in `SecretString` so they
//! never show up in `Debug` output and are zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Long-lived credentials for the wallet API.
///
/// - `api_key` identifies the caller and travels as a bearer token.
/// - `secret_key` keys the HMAC over every request and response.
/// - `password` is bound to each salt to form the per-call hash token.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
    password: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `GPAY_API_KEY` - The API key (public)
    /// - `GPAY_SECRET_KEY` - The HMAC secret (private)
    /// - `GPAY_PASSWORD` - The hash token password (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if any variable is unset or empty.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = required_var("GPAY_API_KEY")?;
        let secret_key = required_var("GPAY_SECRET_KEY")?;
        let password = required_var("GPAY_PASSWORD")?;

        Ok(Self::new(api_key, secret_key, password))
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: String, secret_key: String, password: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
            password: SecretString::from(password),
        }
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the HMAC secret.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    pub(crate) fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Expose the hash token password.
    pub(crate) fn expose_password(&self) -> &str {
        self.password.expose_secret()
    }
}

fn required_var(name: &str) -> Result<String, AuthError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AuthError::MissingEnvVar(name.into())),
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}
