//! Error types for token construction and inspection
//!
//! None of these messages carry key material or plaintext.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid secret key: {reason}")]
    InvalidKey { reason: &'static str },

    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    #[error("AES-256-GCM encryption failed")]
    Encryption,

    #[error("Metadata serialization failed: {0}")]
    Metadata(String),

    #[error("Token is not valid base64url")]
    Encoding,

    #[error("Token too short: {len} bytes, need at least {min}")]
    Truncated { len: usize, min: usize },

    #[error("Token failed authentication")]
    Decryption,

    #[error("Malformed token plaintext: {0}")]
    MalformedPlaintext(String),
}

impl TokenError {
    /// Whether the error comes from building a token (as opposed to reading one).
    ///
    /// Build-side errors are fatal for a render: proceeding would emit an
    /// unprotected or undecryptable URL.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TokenError::InvalidKey { .. }
                | TokenError::RandomSource(_)
                | TokenError::Encryption
                | TokenError::Metadata(_)
        )
    }
}
