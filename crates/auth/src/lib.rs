//! Request signing and response verification for the GPay wallet API.
//!
//! Every request carries a fresh random salt and an HMAC-SHA256 signature
//! over `salt ∥ password ∥ k1=v1&...&kN=vN`, keyed by the shared secret.
//! Every response carries the same pair of headers, computed by the server
//! over a per-endpoint subset of the response payload.
//!
//! # Features
//!
//! - **Secure Credentials**: The secret and password are wrapped in
//!   `SecretString` and never appear in `Debug` output or logs.
//! - **Canonical Encoding**: Fields are sorted by byte order, so insertion
//!   order never affects a signature.
//! - **Constant-time Verification**: Signatures are compared with `subtle`
//!   after a length check.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner, ResponseVerifier, SignableFields};
//!
//! let credentials = ApiCredentials::from_env()?;
//!
//! let mut fields = SignableFields::new();
//! fields.insert("request_timestamp", now_ms.to_string());
//! let signed = RequestSigner::new(&credentials).sign(&fields)?;
//!
//! // ... send the request, receive `headers` and the response payload ...
//!
//! ResponseVerifier::new(&credentials).check(&headers, &response_fields)?;
//! ```

mod canonical;
mod credentials;
mod error;
mod salt;
mod signer;
mod verifier;

pub use canonical::SignableFields;
pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use salt::{HashToken, Salt, SALT_LEN};
pub use signer::{
    hmac_sha256, to_base64, to_hex, RequestSigner, SignatureEncoding, SignedRequest,
};
pub use verifier::ResponseVerifier;

/// Header carrying the Base64 salt, on requests and responses.
pub const SALT_HEADER: &str = "x-signature-salt";

/// Header carrying the signature, on requests and responses.
pub const SIGNATURE_HEADER: &str = "x-signature-hash";
