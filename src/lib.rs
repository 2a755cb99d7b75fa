// Imgveil library
//
// Rewrites <img> tags so the client only ever sees edge-proxy URLs carrying
// an encrypted token, never the image's original URL.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod rewriter;
pub mod token;

pub use config::{Config, ProxyConfig};
pub use error::ImgveilError;
pub use rewriter::{filter, filter_or_passthrough, HtmlRewriter};
pub use token::{build_proxy_url, open_token, ImageVariant, SecretKey, TokenEncoder, TokenError};
