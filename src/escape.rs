//! Escaping of character data and attribute values
//!
//! Both escapers make one pass over the input, so the `&` of an entity they
//! emit is never escaped again. Inputs without special characters are
//! returned borrowed.

use std::borrow::Cow;

/// Escape text node data: `&`, `<` and `>`
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(input, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

/// Escape a double-quoted attribute value: `"`, `&`, `<` and `>`
pub fn escape_attr_value(input: &str) -> Cow<'_, str> {
    escape_with(input, |c| match c {
        '"' => Some("&quot;"),
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    })
}

fn escape_with(input: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let mut escaped = String::new();
    let mut p = 0;
    for (i, c) in input.char_indices() {
        if let Some(replacement) = entity(c) {
            if escaped.is_empty() {
                escaped.reserve(input.len() + 8);
            }
            escaped.push_str(&input[p..i]);
            escaped.push_str(replacement);
            p = i + c.len_utf8();
        }
    }
    if p == 0 {
        return Cow::Borrowed(input);
    }
    escaped.push_str(&input[p..]);
    Cow::Owned(escaped)
}
