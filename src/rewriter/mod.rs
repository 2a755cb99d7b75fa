//! `<img>` rewriting
//!
//! Every matched image gets three proxy URLs, one per [`ImageVariant`]:
//!
//! ```text
//! <img class="x" src="a.jpg">
//! =>
//! <img class="x" src="<standard>" srcset="<retina> 2x"
//!      data-original-src="<original>" data-cfimageproxy="true" loading="lazy">
//! ```
//!
//! Everything outside matched tags is copied through untouched.

pub mod scanner;

use tracing::{debug, error};

use crate::config::ProxyConfig;
use crate::constants::{ORIGINAL_SRC_ATTR, PROXIED_MARKER_ATTR, RETINA_DESCRIPTOR};
use crate::token::{ImageVariant, TokenEncoder, TokenError};

pub use scanner::{scan_img_tags, ImgTag, ImgTags};

/// Proxy URLs for the three variants of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantUrls {
    pub original: String,
    pub standard: String,
    pub retina: String,
}

impl VariantUrls {
    pub fn build(encoder: &TokenEncoder<'_>, original_url: &str) -> Result<Self, TokenError> {
        Ok(Self {
            original: encoder.build_proxy_url(ImageVariant::Original, original_url)?,
            standard: encoder.build_proxy_url(ImageVariant::Standard, original_url)?,
            retina: encoder.build_proxy_url(ImageVariant::Retina, original_url)?,
        })
    }
}

/// Rewrites content for one render pass
#[derive(Debug, Clone)]
pub struct HtmlRewriter<'a> {
    encoder: Option<TokenEncoder<'a>>,
}

impl<'a> HtmlRewriter<'a> {
    /// A config without worker URL or key yields a pass-through rewriter.
    /// A present but malformed key is an error.
    pub fn new(config: &'a ProxyConfig) -> Result<Self, TokenError> {
        if !config.is_enabled() {
            return Ok(Self { encoder: None });
        }

        Ok(Self {
            encoder: Some(TokenEncoder::new(config)?),
        })
    }

    pub fn is_active(&self) -> bool {
        self.encoder.is_some()
    }

    pub fn filter(&self, content: &str) -> Result<String, TokenError> {
        let Some(encoder) = &self.encoder else {
            return Ok(content.to_string());
        };

        let mut output = String::with_capacity(content.len());
        let mut last = 0;
        let mut rewritten = 0usize;

        for tag in scan_img_tags(content) {
            let urls = VariantUrls::build(encoder, tag.src)?;
            output.push_str(&content[last..tag.start]);
            splice_tag(&mut output, &tag, &urls);
            last = tag.end;
            rewritten += 1;

            debug!(original_url = tag.src, "Rewrote image tag");
        }

        output.push_str(&content[last..]);

        debug!(
            images = rewritten,
            content_len = content.len(),
            "Content filtered"
        );

        Ok(output)
    }
}

/// Write `tag` with its `src` replaced by the proxy attributes
pub fn splice_tag(output: &mut String, tag: &ImgTag<'_>, urls: &VariantUrls) {
    output.push_str(tag.before_src);
    output.push_str(&format!(
        r#"src="{}" srcset="{} {}" {}="{}" {}="true" loading="lazy""#,
        urls.standard,
        urls.retina,
        RETINA_DESCRIPTOR,
        ORIGINAL_SRC_ATTR,
        urls.original,
        PROXIED_MARKER_ATTR,
    ));
    output.push_str(tag.after_src);
}

/// Rewrite every `<img>` in `content`.
///
/// Returns `content` unchanged when the proxy is not configured. Fails if the
/// configured key is malformed or no secure IV can be generated.
pub fn filter(content: &str, config: &ProxyConfig) -> Result<String, TokenError> {
    HtmlRewriter::new(config)?.filter(content)
}

/// Like [`filter`], but logs a failure and returns `content` unchanged so
/// rendering can continue.
pub fn filter_or_passthrough(content: &str, config: &ProxyConfig) -> String {
    match filter(content, config) {
        Ok(rewritten) => rewritten,
        Err(e) => {
            error!(error = %e, "Image proxy rewrite failed, serving original content");
            content.to_string()
        }
    }
}
