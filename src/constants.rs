// Constants module - centralized default values and wire-format constants
//
// This module defines the defaults used for proxy settings and the fixed
// framing of the encrypted token consumed by the edge proxy.

// =============================================================================
// Proxy settings defaults
// =============================================================================

/// Default bound on the display width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

/// Default bound on the display height in pixels (0 = unbounded)
pub const DEFAULT_MAX_HEIGHT: u32 = 0;

/// Default encoder quality
pub const DEFAULT_QUALITY: u8 = 80;

/// Lowest accepted encoder quality
pub const MIN_QUALITY: u8 = 1;

/// Highest accepted encoder quality
pub const MAX_QUALITY: u8 = 100;

// =============================================================================
// Token wire format
// =============================================================================

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;

/// Length of the hex form of the key
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;

/// AES-GCM IV length in bytes
pub const IV_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// Separator between the metadata text and the original URL
pub const PLAINTEXT_SEPARATOR: char = '|';

/// Query parameter carrying the token on the worker URL
pub const TOKEN_QUERY_PARAM: &str = "u";

// =============================================================================
// Produced markup
// =============================================================================

/// Attribute holding the full-resolution proxy URL
pub const ORIGINAL_SRC_ATTR: &str = "data-original-src";

/// Marker attribute read by the viewer script
pub const PROXIED_MARKER_ATTR: &str = "data-cfimageproxy";

/// Density descriptor appended to the retina URL in `srcset`
pub const RETINA_DESCRIPTOR: &str = "2x";

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
