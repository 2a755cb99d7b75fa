//! Minimal streaming scanner for `<img>` tags
//!
//! Walks raw markup and yields each `<img ...>` tag whose attribute list has
//! a quoted `src` attribute. The tag is split into three opaque slices so the
//! caller can splice a replacement for `src="..."` while keeping every other
//! attribute byte-for-byte:
//!
//! ```text
//! <img class="x" src="a.jpg" title="t">
//! |-before_src--|     |src|  |after_src-|
//! ```
//!
//! Tag and attribute names match case-insensitively. Quoted attribute values
//! may contain `>`. Only the first `src` attribute counts; if it is unquoted
//! the tag is skipped. A tag or quoted value left open at the end of the
//! input ends the scan, so each byte is examined a bounded number of times.

/// A matched `<img>` tag, borrowed from the scanned content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImgTag<'a> {
    /// Byte offset of the opening `<`
    pub start: usize,
    /// Byte offset one past the closing `>`
    pub end: usize,
    /// Markup from `<img` up to the `src` attribute name
    pub before_src: &'a str,
    /// The `src` value without quotes
    pub src: &'a str,
    /// Markup after the closing quote of `src`, including the final `>`
    pub after_src: &'a str,
}

/// Iterator over the `<img>` tags of `content`, in document order
pub fn scan_img_tags(content: &str) -> ImgTags<'_> {
    ImgTags {
        content,
        pos: 0,
        #[cfg(test)]
        visited: 0,
    }
}

pub struct ImgTags<'a> {
    content: &'a str,
    pos: usize,
    /// Bytes examined by tag parsing so far
    #[cfg(test)]
    visited: usize,
}

impl<'a> Iterator for ImgTags<'a> {
    type Item = ImgTag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.content.as_bytes();

        while self.pos < bytes.len() {
            let Some(rel) = bytes[self.pos..].iter().position(|&b| b == b'<') else {
                break;
            };
            let start = self.pos + rel;

            let parsed = parse_img_tag(self.content, start);
            let resume = match parsed {
                Ok(tag) => tag.end,
                Err(TagMiss::NotImg) => start + 1,
                Err(TagMiss::NoSrc { end }) => end,
                Err(TagMiss::Unclosed) => bytes.len(),
            };
            #[cfg(test)]
            {
                self.visited += resume - start;
            }
            self.pos = resume;

            if let Ok(tag) = parsed {
                return Some(tag);
            }
        }

        self.pos = bytes.len();
        None
    }
}

/// Why a `<` did not yield a tag, and so where scanning resumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagMiss {
    /// Not an `<img` tag; resume after the `<`
    NotImg,
    /// A complete tag without a usable `src`; resume after its `>`
    NoSrc { end: usize },
    /// The input ended inside the tag; nothing later can match
    Unclosed,
}

struct SrcSpan {
    name_start: usize,
    value_start: usize,
    value_end: usize,
}

fn parse_img_tag(content: &str, start: usize) -> Result<ImgTag<'_>, TagMiss> {
    let bytes = content.as_bytes();
    let len = bytes.len();

    let mut i = start + 1;
    let is_img = bytes
        .get(i..i + 3)
        .is_some_and(|name| name.eq_ignore_ascii_case(b"img"));
    if !is_img || !bytes.get(i + 3).is_some_and(u8::is_ascii_whitespace) {
        return Err(TagMiss::NotImg);
    }
    i += 3;

    let mut src: Option<SrcSpan> = None;
    let mut src_seen = false;

    loop {
        i = skip_whitespace(bytes, i);
        match *bytes.get(i).ok_or(TagMiss::Unclosed)? {
            b'>' => {
                i += 1;
                break;
            }
            b'/' => {
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < len && !is_name_terminator(bytes[i]) {
            i += 1;
        }
        let is_src = bytes[name_start..i].eq_ignore_ascii_case(b"src");

        let after_name = skip_whitespace(bytes, i);
        if bytes.get(after_name) != Some(&b'=') {
            // Boolean attribute
            if is_src {
                src_seen = true;
            }
            continue;
        }

        let value_pos = skip_whitespace(bytes, after_name + 1);
        let first = *bytes.get(value_pos).ok_or(TagMiss::Unclosed)?;
        if first == b'"' || first == b'\'' {
            let value_start = value_pos + 1;
            let rel = bytes[value_start..]
                .iter()
                .position(|&b| b == first)
                .ok_or(TagMiss::Unclosed)?;
            let value_end = value_start + rel;
            i = value_end + 1;

            if is_src && !src_seen {
                src = Some(SrcSpan {
                    name_start,
                    value_start,
                    value_end,
                });
            }
        } else {
            i = value_pos;
            while i < len && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
        }

        if is_src {
            src_seen = true;
        }
    }

    let span = src.ok_or(TagMiss::NoSrc { end: i })?;
    Ok(ImgTag {
        start,
        end: i,
        before_src: &content[start..span.name_start],
        src: &content[span.value_start..span.value_end],
        after_src: &content[span.value_end + 1..i],
    })
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn is_name_terminator(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/')
}
