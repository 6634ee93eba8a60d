//! GPay REST API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when calling the wallet API.
#[derive(Debug, Error)]
pub enum GPayRestError {
    /// REST client error (network, timeout, non-success status).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Signing or verification error.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The response verified but could not be turned into a record.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A call argument was rejected before anything was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Client configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GPayRestError {
    /// True when the response failed signature verification.
    ///
    /// Such a response may be forged or corrupted and must not be retried
    /// or partially trusted.
    pub fn is_verification_failure(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_verification_failure(),
            _ => false,
        }
    }

    /// True when the failure came from the HTTP exchange itself.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Rest(_))
    }
}
