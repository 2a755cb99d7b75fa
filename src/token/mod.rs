//! Proxy token construction
//!
//! A token hides an image's original URL from the client. Each token is the
//! AES-256-GCM encryption of
//!
//! ```text
//! {"maxWidth":W,"maxHeight":H,"quality":Q}|<original url>
//! ```
//!
//! framed as `IV || CIPHERTEXT || TAG`, base64url encoded without padding and
//! carried in the `u` query parameter of the edge proxy URL:
//!
//! ```text
//! https://img.example.com/imgproxy/?u=<token>
//! ```
//!
//! The separator is not escaped. The edge proxy splits on the first `|`
//! only, so the URL part may itself contain `|`.

pub mod cipher;
pub mod error;
pub mod key;
pub mod variant;

pub use error::TokenError;
pub use key::SecretKey;
pub use variant::{ImageVariant, TransformMetadata};

use crate::config::ProxyConfig;
use crate::constants::{PLAINTEXT_SEPARATOR, TOKEN_QUERY_PARAM};

/// Builds proxy URLs for one render pass.
///
/// The key is parsed once on construction; every build draws a fresh IV.
#[derive(Debug, Clone)]
pub struct TokenEncoder<'a> {
    config: &'a ProxyConfig,
    key: SecretKey,
}

impl<'a> TokenEncoder<'a> {
    /// Fails with [`TokenError::InvalidKey`] if the configured key is malformed.
    pub fn new(config: &'a ProxyConfig) -> Result<Self, TokenError> {
        let key = SecretKey::from_hex(&config.secret_key)?;
        Ok(Self { config, key })
    }

    pub fn config(&self) -> &ProxyConfig {
        self.config
    }

    /// Encrypt the variant's metadata and `original_url` into a token string
    pub fn build_token(
        &self,
        variant: ImageVariant,
        original_url: &str,
    ) -> Result<String, TokenError> {
        let metadata = TransformMetadata::for_variant(self.config, variant);
        let plaintext = format_plaintext(&metadata, original_url)?;
        let sealed = cipher::seal(&self.key, plaintext.as_bytes())?;
        Ok(cipher::encode(&sealed))
    }

    /// Worker URL with the variant's token attached as the `u` parameter
    pub fn build_proxy_url(
        &self,
        variant: ImageVariant,
        original_url: &str,
    ) -> Result<String, TokenError> {
        let token = self.build_token(variant, original_url)?;
        Ok(append_query_param(
            &self.config.worker_url,
            TOKEN_QUERY_PARAM,
            &token,
        ))
    }
}

/// One-shot form of [`TokenEncoder::build_proxy_url`].
pub fn build_proxy_url(
    config: &ProxyConfig,
    variant: ImageVariant,
    original_url: &str,
) -> Result<String, TokenError> {
    TokenEncoder::new(config)?.build_proxy_url(variant, original_url)
}

/// `metadata|url`
pub fn format_plaintext(
    metadata: &TransformMetadata,
    original_url: &str,
) -> Result<String, TokenError> {
    let text = metadata.to_text()?;
    Ok(format!("{}{}{}", text, PLAINTEXT_SEPARATOR, original_url))
}

/// Append `name=value`, keeping any `#fragment` at the end.
///
/// `value` must already be URL-safe.
pub fn append_query_param(base: &str, name: &str, value: &str) -> String {
    let (head, fragment) = match base.find('#') {
        Some(idx) => base.split_at(idx),
        None => (base, ""),
    };

    let separator = if head.ends_with('?') || head.ends_with('&') {
        ""
    } else if head.contains('?') {
        "&"
    } else {
        "?"
    };

    format!("{}{}{}={}{}", head, separator, name, value, fragment)
}

/// Contents of a decrypted token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken {
    pub metadata: TransformMetadata,
    pub metadata_text: String,
    pub original_url: String,
}

/// Reverse the wire contract: decode, authenticate, decrypt and split.
///
/// Accepts either a bare token or a full proxy URL carrying `u=<token>`.
pub fn open_token(key: &SecretKey, token: &str) -> Result<DecodedToken, TokenError> {
    let encoded = extract_token(token);
    let sealed = cipher::decode(encoded)?;
    let plaintext = cipher::open(key, &sealed)?;
    let plaintext = String::from_utf8(plaintext)
        .map_err(|_| TokenError::MalformedPlaintext("not UTF-8".to_string()))?;

    let (metadata_text, original_url) =
        plaintext.split_once(PLAINTEXT_SEPARATOR).ok_or_else(|| {
            TokenError::MalformedPlaintext("missing metadata separator".to_string())
        })?;

    Ok(DecodedToken {
        metadata: TransformMetadata::from_text(metadata_text)?,
        metadata_text: metadata_text.to_string(),
        original_url: original_url.to_string(),
    })
}

fn extract_token(input: &str) -> &str {
    let Some((_, query)) = input.split_once('?') else {
        return input;
    };
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value)
        .unwrap_or(input)
}
