//! XML lexical validation
//!
//! Predicates checking strings against the XML grammar productions (Name, Char,
//! PubidChar) and the extra constraints serialization imposes on tag names,
//! attribute names, comments and processing instructions.
//!
//! Every predicate accepts `impl Into<Option<&str>>`: a missing value (`None`)
//! is never valid. None of them fail; callers turn `false` into an error.

use once_cell::sync::Lazy;
use regex::Regex;

// NameStartChar and NameChar from XML 1.0 (fifth edition), section 2.3
static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[:A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}",
        r"\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}",
        r"\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}]",
        r"[:A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}",
        r"\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}",
        r"\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}\-\.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}]*$",
    ))
    .unwrap()
});

static CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\t\n\r\u{20}-\u{D7FF}\u{E000}-\u{FFFD}\u{10000}-\u{10FFFF}]*$").unwrap()
});

static PUBID_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \r\na-zA-Z0-9\-'()+,./:=?;!*#@$_%]*$").unwrap());

/// Check if a string matches the XML Name production
pub fn is_name_production<'a>(value: impl Into<Option<&'a str>>) -> bool {
    value.into().map_or(false, |v| NAME.is_match(v))
}

/// Check if a string is usable as an element local name
///
/// A tag name is a Name that does not start with `xml` in any letter case.
pub fn is_tag_name<'a>(value: impl Into<Option<&'a str>>) -> bool {
    let value = value.into();
    is_name_production(value) && !value.map_or(false, starts_with_xml)
}

/// Check if a string is usable as an attribute local name
///
/// `xmlns` (in any letter case) is only accepted for attributes that carry a namespace.
pub fn is_attr_name<'a>(value: impl Into<Option<&'a str>>, attr_namespace: Option<&str>) -> bool {
    let value = value.into();
    is_name_production(value)
        && (attr_namespace.is_some() || !value.map_or(false, |v| v.eq_ignore_ascii_case("xmlns")))
}

/// Check that every character of a string matches the XML Char production
pub fn is_char<'a>(value: impl Into<Option<&'a str>>) -> bool {
    value.into().map_or(false, |v| CHARS.is_match(v))
}

/// Check if a string is valid comment data
pub fn is_comment<'a>(value: impl Into<Option<&'a str>>) -> bool {
    let value = value.into();
    is_char(value)
        && value.map_or(false, |v| !v.contains("--") && !v.ends_with('-'))
}

/// Check if a string only contains PubidChar characters
pub fn is_public_id<'a>(value: impl Into<Option<&'a str>>) -> bool {
    value.into().map_or(false, |v| PUBID_CHARS.is_match(v))
}

/// Check if a string is a valid doctype system identifier
pub fn is_system_id<'a>(value: impl Into<Option<&'a str>>) -> bool {
    is_char(value)
}

/// Check if a string is a valid processing instruction target
pub fn is_pi_target<'a>(value: impl Into<Option<&'a str>>) -> bool {
    let value = value.into();
    is_char(value)
        && value.map_or(false, |v| !v.contains(':') && !v.eq_ignore_ascii_case("xml"))
}

/// Check if a string is valid processing instruction data
pub fn is_pi_data<'a>(value: impl Into<Option<&'a str>>) -> bool {
    let value = value.into();
    is_char(value) && value.map_or(false, |v| !v.contains("?>"))
}

fn starts_with_xml(value: &str) -> bool {
    value
        .get(..3)
        .map_or(false, |head| head.eq_ignore_ascii_case("xml"))
}
