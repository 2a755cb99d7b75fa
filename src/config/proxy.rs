// Proxy settings consumed by the token encoder and the HTML rewriter

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, DEFAULT_QUALITY, KEY_HEX_LEN, MAX_QUALITY, MIN_QUALITY,
};

/// Edge proxy settings, constructed once by the caller and read-only
/// for the duration of a render.
///
/// An empty `worker_url` or `secret_key` disables rewriting entirely:
/// content passes through untouched.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Absolute URL of the edge proxy
    #[serde(default)]
    pub worker_url: String,

    /// AES-256 key as 64 lowercase hex characters
    #[serde(default)]
    pub secret_key: String,

    /// Width bound for the standard variant (0 = unbounded)
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Height bound for the standard variant (0 = unbounded)
    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Encoder quality for the original variant
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Encoder quality for standard and retina variants
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_quality: Option<u8>,
}

fn default_max_width() -> u32 {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> u32 {
    DEFAULT_MAX_HEIGHT
}

fn default_quality() -> u8 {
    DEFAULT_QUALITY
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            worker_url: String::new(),
            secret_key: String::new(),
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            thumbnail_quality: None,
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.secret_key.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("ProxyConfig")
            .field("worker_url", &self.worker_url)
            .field("secret_key", &secret)
            .field("max_width", &self.max_width)
            .field("max_height", &self.max_height)
            .field("quality", &self.quality)
            .field("thumbnail_quality", &self.thumbnail_quality)
            .finish()
    }
}

impl ProxyConfig {
    /// Create a config with the given worker URL and hex key, defaults elsewhere
    pub fn new(worker_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            worker_url: worker_url.into(),
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Set the standard-variant bounds
    pub fn with_bounds(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Set the original and thumbnail qualities
    pub fn with_quality(mut self, quality: u8, thumbnail_quality: Option<u8>) -> Self {
        self.quality = quality;
        self.thumbnail_quality = thumbnail_quality;
        self
    }

    /// Whether rewriting is active (both worker URL and key are present)
    pub fn is_enabled(&self) -> bool {
        !self.worker_url.is_empty() && !self.secret_key.is_empty()
    }

    /// Quality used for the standard and retina variants
    pub fn effective_thumbnail_quality(&self) -> u8 {
        self.thumbnail_quality.unwrap_or(self.quality)
    }

    /// Validate settings the way the settings store does on entry.
    ///
    /// A disabled config (empty worker URL or key) is valid. Error messages
    /// never include key material.
    pub fn validate(&self) -> Result<(), String> {
        if !self.is_enabled() {
            return Ok(());
        }

        if !(self.worker_url.starts_with("http://") || self.worker_url.starts_with("https://")) {
            return Err(format!(
                "worker_url '{}' must be an absolute http(s) URL",
                self.worker_url
            ));
        }
        if self.worker_url.contains('"') || self.worker_url.chars().any(char::is_whitespace) {
            return Err(format!(
                "worker_url '{}' contains whitespace or quotes",
                self.worker_url
            ));
        }

        let key_re = Regex::new(&format!("^[0-9a-f]{{{}}}$", KEY_HEX_LEN))
            .map_err(|e| e.to_string())?;
        if !key_re.is_match(&self.secret_key) {
            return Err(format!(
                "secret_key must be {} lowercase hex characters",
                KEY_HEX_LEN
            ));
        }

        validate_quality("quality", self.quality)?;
        if let Some(thumbnail_quality) = self.thumbnail_quality {
            validate_quality("thumbnail_quality", thumbnail_quality)?;
        }

        Ok(())
    }
}

fn validate_quality(field: &str, value: u8) -> Result<(), String> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{} {} is out of range, must be {}-{}",
            field, value, MIN_QUALITY, MAX_QUALITY
        ))
    }
}
