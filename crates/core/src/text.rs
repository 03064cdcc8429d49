//! Cleanup of HTML-flavoured text coming from the listing service.
//!
//! Vacancy descriptions arrive as HTML fragments. Records store them as plain
//! text so downstream analysis can match keywords without caring about markup.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strip HTML tags, decode the handful of entities the listing service emits
/// and collapse whitespace runs.
pub fn strip_html(raw: &str) -> String {
    let without_tags = TAG_RE.replace_all(raw, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");
    WHITESPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        let raw = "<p>We are looking for a <strong>Rust</strong> developer.</p>";
        assert_eq!(strip_html(raw), "We are looking for a Rust developer.");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(strip_html("C&amp;C, 3&nbsp;years"), "C&C, 3 years");
        assert_eq!(strip_html("a &lt;b&gt; c"), "a <b> c");
    }

    #[test]
    fn test_collapses_whitespace() {
        let raw = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>";
        assert_eq!(strip_html(raw), "one two");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(strip_html("already plain"), "already plain");
        assert_eq!(strip_html(""), "");
    }
}
