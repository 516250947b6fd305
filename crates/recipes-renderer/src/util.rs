//! Text helpers shared by the layout.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unencoded in a path segment: A-Z a-z 0-9 - . _ ~
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Human-readable name for a topic or article identifier.
///
/// First character upper-cased, the rest lower-cased, underscores become
/// spaces: `"nested_ROUTES"` → `"Nested routes"`.
#[must_use]
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    first
        .to_uppercase()
        .chain(chars.flat_map(char::to_lowercase))
        .map(|c| if c == '_' { ' ' } else { c })
        .collect()
}

/// Percent-encode a single URL path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("routing"), "Routing");
        assert_eq!(display_name("nested_routes"), "Nested routes");
        assert_eq!(display_name("nested_ROUTES"), "Nested routes");
        assert_eq!(display_name("a_b_c"), "A b c");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("nested_routes"), "nested_routes");
        assert_eq!(encode_segment("with space"), "with%20space");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
    }
}
