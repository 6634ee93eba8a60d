use thiserror::Error;

/// Errors that can occur while signing requests or verifying responses.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing or empty.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The operating system random source could not produce a salt.
    #[error("Secure random source unavailable: {0}")]
    RandomnessUnavailable(String),

    /// A signature header is absent from the response.
    #[error("Missing response header: {0}")]
    MissingHeader(&'static str),

    /// A signature header is present but unusable.
    #[error("Malformed response header: {0}")]
    MalformedHeader(&'static str),

    /// A field that takes part in the response signature is absent.
    #[error("Missing signed field: {0}")]
    MissingField(String),

    /// The recomputed signature does not match the one the server sent.
    #[error("Response signature mismatch")]
    SignatureMismatch,

    /// An unrecognised signature encoding name.
    #[error("Unknown signature encoding '{0}', expected 'hex' or 'base64'")]
    UnknownEncoding(String),
}

impl AuthError {
    /// True for faults that mean the response cannot be trusted.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingHeader(_)
                | AuthError::MalformedHeader(_)
                | AuthError::MissingField(_)
                | AuthError::SignatureMismatch
        )
    }
}
