//! Per-request salts and the hash tokens derived from them.

use crate::error::AuthError;
use crate::SALT_HEADER;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};

/// Number of random bytes in a freshly generated salt.
pub const SALT_LEN: usize = 32;

/// A single-use salt, carried as Base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Draw a new salt from the operating system CSPRNG.
    ///
    /// # Errors
    /// Returns `AuthError::RandomnessUnavailable` if the OS source fails.
    /// There is deliberately no fallback to a userspace generator.
    pub fn generate() -> Result<Self, AuthError> {
        let mut bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::RandomnessUnavailable(e.to_string()))?;
        Ok(Self(BASE64.encode(bytes)))
    }

    /// Accept a salt received from the server.
    ///
    /// # Errors
    /// Returns `AuthError::MalformedHeader` if the text is empty or not Base64.
    pub fn parse(encoded: &str) -> Result<Self, AuthError> {
        let encoded = encoded.trim();
        if encoded.is_empty() || BASE64.decode(encoded).is_err() {
            return Err(AuthError::MalformedHeader(SALT_HEADER));
        }
        Ok(Self(encoded.to_string()))
    }

    /// The Base64 text, as sent in the salt header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// `salt ∥ password`, alive only for one signing or verification call.
pub struct HashToken(SecretString);

impl HashToken {
    /// Bind a salt and the password into one token. No hashing happens here.
    pub fn derive(salt: &Salt, password: &str) -> Self {
        let mut token = String::with_capacity(salt.as_str().len() + password.len());
        token.push_str(salt.as_str());
        token.push_str(password);
        Self(SecretString::from(token))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for HashToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HashToken([REDACTED])")
    }
}
