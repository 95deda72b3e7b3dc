//! Escaping utilities for safe report generation.
//!
//! Class, member and annotation names come straight out of the compared
//! archives and may contain `<`, `>` and `$` (generic signatures, synthetic
//! names, `<init>`). Everything embedded in an HTML report goes through
//! [`escape_html`] first.

/// Escape a string for safe inclusion in HTML content.
///
/// Escapes the following characters:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
///
/// # Examples
///
/// ```
/// use abicmp::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<init>()V"), "&lt;init&gt;()V");
/// assert_eq!(escape_html("safe text"), "safe text");
/// ```
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

/// Escape an optional string, rendering `None` as `NULL`.
#[must_use]
pub fn escape_html_opt(s: Option<&str>) -> String {
    s.map_or_else(|| "NULL".to_string(), escape_html)
}

/// Wrap already-escaped content in a tag.
#[must_use]
pub fn tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_basic() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("<init>"), "&lt;init&gt;");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_escape_generic_signature() {
        assert_eq!(
            escape_html("<T:Ljava/lang/Object;>(TT;)V"),
            "&lt;T:Ljava/lang/Object;&gt;(TT;)V"
        );
    }

    #[test]
    fn test_escape_html_opt() {
        assert_eq!(escape_html_opt(None), "NULL");
        assert_eq!(escape_html_opt(Some("a<b")), "a&lt;b");
    }

    #[test]
    fn test_tag() {
        assert_eq!(tag("code", "x"), "<code>x</code>");
    }

    #[test]
    fn test_unicode_preservation() {
        assert_eq!(escape_html("Klasse$Ärger"), "Klasse$Ärger");
    }
}
