//! Passwords are stored base64-encoded so they are not legible at a glance.
//! This is reversible and offers no protection whatsoever.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// A reversibly encoded password.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Encode a plain-text password
    pub fn encode(plain: &str) -> Self {
        Self(STANDARD.encode(plain.as_bytes()))
    }

    /// Wrap an already encoded value
    #[cfg(test)]
    pub(crate) fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Recover the plain-text password
    pub fn decode(&self) -> Result<String, DigestError> {
        let bytes = STANDARD.decode(&self.0)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Check a plain-text attempt against this digest
    pub fn verify(&self, attempt: &str) -> Result<bool, DigestError> {
        Ok(self.decode()? == attempt)
    }

    /// The encoded form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Decoding a stored digest failed.
#[derive(thiserror::Error, Debug)]
pub enum DigestError {
    /// The digest is not base64
    #[error("password digest is not valid base64")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes are not text
    #[error("password digest does not decode to UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
