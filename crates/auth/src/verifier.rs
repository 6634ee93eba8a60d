//! Verification of signed responses.

use crate::canonical::SignableFields;
use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::salt::Salt;
use crate::signer::{compute_mac, SignatureEncoding};
use crate::{SALT_HEADER, SIGNATURE_HEADER};
use http::HeaderMap;
use subtle::ConstantTimeEq;

/// Checks the salt and signature headers a server attaches to its responses.
pub struct ResponseVerifier<'a> {
    credentials: &'a ApiCredentials,
    encoding: SignatureEncoding,
}

impl<'a> ResponseVerifier<'a> {
    /// Create a verifier expecting lowercase hex signatures.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self {
            credentials,
            encoding: SignatureEncoding::Hex,
        }
    }

    pub fn with_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Recompute the signature over `fields` and compare it with the headers.
    ///
    /// `fields` must be exactly the set the server signed for this endpoint.
    ///
    /// # Errors
    /// `MissingHeader` or `MalformedHeader` when the signing headers are
    /// unusable, `SignatureMismatch` when the signatures differ.
    pub fn check(&self, headers: &HeaderMap, fields: &SignableFields) -> Result<(), AuthError> {
        let salt = Salt::parse(header_str(headers, SALT_HEADER)?)?;
        let received = header_str(headers, SIGNATURE_HEADER)?.trim();
        if received.is_empty() {
            return Err(AuthError::MalformedHeader(SIGNATURE_HEADER));
        }

        let expected = self
            .encoding
            .encode(&compute_mac(self.credentials, &salt, fields));

        let received = match self.encoding {
            SignatureEncoding::Hex => received.to_ascii_lowercase(),
            SignatureEncoding::Base64 => received.to_string(),
        };

        if signatures_match(received.as_bytes(), expected.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::SignatureMismatch)
        }
    }

    /// Same as [`check`](Self::check), collapsed to a boolean.
    pub fn verify(&self, headers: &HeaderMap, fields: &SignableFields) -> bool {
        match self.check(headers, fields) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(reason = %e, "Response signature rejected");
                false
            }
        }
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &'static str) -> Result<&'h str, AuthError> {
    headers
        .get(name)
        .ok_or(AuthError::MissingHeader(name))?
        .to_str()
        .map_err(|_| AuthError::MalformedHeader(name))
}

fn signatures_match(received: &[u8], expected: &[u8]) -> bool {
    received.len() == expected.len() && bool::from(received.ct_eq(expected))
}
