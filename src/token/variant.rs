//! Image variants and the transform metadata carried in each token

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ProxyConfig;

use super::error::TokenError;

/// One of the three resize/quality profiles generated per image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    /// Full resolution, used by the viewer
    Original,
    /// Display size, bounded by the configured width/height
    Standard,
    /// Twice the display bounds, for high-density screens
    Retina,
}

impl ImageVariant {
    pub const ALL: [ImageVariant; 3] = [Self::Original, Self::Standard, Self::Retina];

    /// Multiplier applied to the configured bounds (0 = no resize)
    pub fn scale_factor(&self) -> u32 {
        match self {
            Self::Original => 0,
            Self::Standard => 1,
            Self::Retina => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Standard => "standard",
            Self::Retina => "retina",
        }
    }
}

impl FromStr for ImageVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "original" | "0" => Ok(Self::Original),
            "standard" | "1" | "1x" => Ok(Self::Standard),
            "retina" | "2" | "2x" => Ok(Self::Retina),
            _ => Err(format!("unknown variant: {}", s)),
        }
    }
}

/// Transform bounds and quality, serialized as the token's metadata segment.
///
/// Field order is the wire key order: `{"maxWidth":..,"maxHeight":..,"quality":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformMetadata {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl TransformMetadata {
    pub fn for_variant(config: &ProxyConfig, variant: ImageVariant) -> Self {
        let scale = variant.scale_factor();
        let quality = match variant {
            ImageVariant::Original => config.quality,
            ImageVariant::Standard | ImageVariant::Retina => config.effective_thumbnail_quality(),
        };

        Self {
            max_width: config.max_width.saturating_mul(scale),
            max_height: config.max_height.saturating_mul(scale),
            quality,
        }
    }

    pub fn to_text(&self) -> Result<String, TokenError> {
        serde_json::to_string(self).map_err(|e| TokenError::Metadata(e.to_string()))
    }

    pub fn from_text(text: &str) -> Result<Self, TokenError> {
        serde_json::from_str(text).map_err(|e| TokenError::MalformedPlaintext(e.to_string()))
    }
}
