//! HMAC-SHA256 request signing for the wallet API.

use crate::canonical::SignableFields;
use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::salt::{HashToken, Salt};
use crate::{SALT_HEADER, SIGNATURE_HEADER};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Compute HMAC-SHA256 of `data` keyed by `secret`.
pub fn hmac_sha256(data: &[u8], secret: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(data);

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Lowercase hex, 64 characters for a SHA-256 MAC.
pub fn to_hex(mac: &[u8]) -> String {
    hex::encode(mac)
}

/// Standard padded Base64.
pub fn to_base64(mac: &[u8]) -> String {
    BASE64.encode(mac)
}

/// Text encoding of a signature on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    Hex,
    Base64,
}

impl SignatureEncoding {
    pub fn encode(&self, mac: &[u8]) -> String {
        match self {
            Self::Hex => to_hex(mac),
            Self::Base64 => to_base64(mac),
        }
    }
}

impl fmt::Display for SignatureEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex => write!(f, "hex"),
            Self::Base64 => write!(f, "base64"),
        }
    }
}

impl FromStr for SignatureEncoding {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "base64" | "b64" => Ok(Self::Base64),
            _ => Err(AuthError::UnknownEncoding(s.to_string())),
        }
    }
}

/// MAC over `hash_token ∥ canonical(fields)` keyed by the shared secret.
pub(crate) fn compute_mac(
    credentials: &ApiCredentials,
    salt: &Salt,
    fields: &SignableFields,
) -> [u8; 32] {
    let token = HashToken::derive(salt, credentials.expose_password());
    let mut message = String::from(token.expose());
    message.push_str(&fields.encode());
    hmac_sha256(message.as_bytes(), credentials.expose_secret().as_bytes())
}

/// Salt and signature to attach to one outbound request.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub salt: Salt,
    pub signature: String,
}

impl SignedRequest {
    /// The two signing headers as `(name, value)` pairs.
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            (SALT_HEADER, self.salt.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}

/// Request signer for authenticated wallet API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
    encoding: SignatureEncoding,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer that emits Base64 signatures.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self {
            credentials,
            encoding: SignatureEncoding::Base64,
        }
    }

    pub fn with_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sign a field set under a fresh salt.
    ///
    /// # Errors
    /// Returns `AuthError::RandomnessUnavailable` if no salt can be drawn.
    pub fn sign(&self, fields: &SignableFields) -> Result<SignedRequest, AuthError> {
        let salt = Salt::generate()?;
        let signature = self.sign_with_salt(&salt, fields);
        Ok(SignedRequest { salt, signature })
    }

    /// Sign a field set under a given salt. Pure: same inputs, same output.
    pub fn sign_with_salt(&self, salt: &Salt, fields: &SignableFields) -> String {
        self.encoding
            .encode(&compute_mac(self.credentials, salt, fields))
    }
}
