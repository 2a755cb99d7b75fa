//! AES-256 key material

use std::fmt;

use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::constants::{KEY_HEX_LEN, KEY_LEN};

use super::error::TokenError;

/// 32-byte AES-256 key.
///
/// `Debug` never prints the bytes. The bytes are wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<[u8; KEY_LEN]>);

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Parse the 64-character hex form used in settings.
    pub fn from_hex(hex_key: &str) -> Result<Self, TokenError> {
        if hex_key.len() != KEY_HEX_LEN {
            return Err(TokenError::InvalidKey {
                reason: "expected 64 hex characters",
            });
        }

        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        hex::decode_to_slice(hex_key, bytes.as_mut_slice()).map_err(|_| {
            TokenError::InvalidKey {
                reason: "not a hex string",
            }
        })?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}
