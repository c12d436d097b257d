//! Plain-text cleanup for feed fields: tag stripping and entity decoding.

use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use regex::{Captures, Regex};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});").unwrap());
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove anything that looks like a markup tag.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Decode named (full HTML5 set) and numeric character references. Unknown
/// or invalid references are left untouched.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    ENTITY_RE
        .replace_all(input, |caps: &Captures| {
            let reference = match caps[1].strip_prefix("#X") {
                | Some(hex) => format!("&#x{};", hex),
                | None => caps[0].to_string(),
            };
            match unescape(&reference) {
                | Ok(decoded) => decoded.into_owned(),
                | Err(_) => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn collapse_whitespace(input: &str) -> String {
    SPACE_RE.replace_all(input.trim(), " ").into_owned()
}

/// Headline text: entities decoded, whitespace collapsed.
pub fn clean_title(raw: &str) -> String {
    collapse_whitespace(&decode_entities(raw))
}

/// Description text: tags stripped first, then entities decoded.
pub fn clean_description(raw: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(raw)))
}
