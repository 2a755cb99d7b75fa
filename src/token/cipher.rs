//! AES-256-GCM sealing and base64url framing of tokens
//!
//! Token bytes are `IV(12) || CIPHERTEXT || TAG(16)`, encoded as base64url
//! without padding.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::{IV_LEN, TAG_LEN};

use super::error::TokenError;
use super::key::SecretKey;

/// Encrypt `plaintext` under a fresh random IV.
///
/// Fails rather than falling back to a weaker IV when the OS random source
/// is unavailable.
pub fn seal(key: &SecretKey, plaintext: &[u8]) -> Result<Vec<u8>, TokenError> {
    let mut iv = [0u8; IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| TokenError::RandomSource(e.to_string()))?;

    seal_with_iv(key, &iv, plaintext)
}

pub(crate) fn seal_with_iv(
    key: &SecretKey,
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, TokenError> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| TokenError::InvalidKey {
        reason: "expected 32 bytes",
    })?;

    // aes-gcm appends the 16-byte tag to the ciphertext
    let sealed = cipher
        .encrypt(
            Nonce::from_slice(iv),
            Payload {
                msg: plaintext,
                aad: &[],
            },
        )
        .map_err(|_| TokenError::Encryption)?;

    let mut token = Vec::with_capacity(IV_LEN + sealed.len());
    token.extend_from_slice(iv);
    token.extend_from_slice(&sealed);
    Ok(token)
}

/// Decrypt and authenticate token bytes produced by [`seal`].
pub fn open(key: &SecretKey, token: &[u8]) -> Result<Vec<u8>, TokenError> {
    let min = IV_LEN + TAG_LEN;
    if token.len() < min {
        return Err(TokenError::Truncated {
            len: token.len(),
            min,
        });
    }

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| TokenError::InvalidKey {
        reason: "expected 32 bytes",
    })?;

    let (iv, sealed) = token.split_at(IV_LEN);
    cipher
        .decrypt(
            Nonce::from_slice(iv),
            Payload {
                msg: sealed,
                aad: &[],
            },
        )
        .map_err(|_| TokenError::Decryption)
}

/// Base64url encode (URL-safe, no padding)
pub fn encode(token: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(token)
}

pub fn decode(encoded: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| TokenError::Encoding)
}
