//! Whole-buffer regex substitutions.
//!
//! Each substitution pass is a [`RuleSet`]: an ordered list of [`Rule`]s
//! applied one after another over the entire buffer. A rule replaces all
//! non-overlapping matches left to right in a single scan and never sees its
//! own output again within the same pass.

use std::sync::LazyLock;

use regex::Regex;

/// Pre-existing markup, removed before any other rule runs.
pub(crate) static SANITIZE: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"\r\n?", "\n"), Rule::new(r"<.*?>", "")]));

/// Longest prefix first so `###` is not captured by the `#` rule.
pub(crate) static HEADERS: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(r"(?m)^###[ \t]*(.*)$", "<h3>${1}</h3>"),
        Rule::new(r"(?m)^##[ \t]*(.*)$", "<h2>${1}</h2>"),
        Rule::new(r"(?m)^#[ \t]*(.*)$", "<h1>${1}</h1>"),
    ])
});

pub(crate) static BOLD: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"\*\*(.*?)\*\*", "<b>${1}</b>")]));

pub(crate) static ITALIC: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"\*(.*?)\*", "<i>${1}</i>")]));

pub(crate) static STRIKETHROUGH: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"~~(.*?)~~", "<s>${1}</s>")]));

/// Sized images first; their label would otherwise become `alt`.
pub(crate) static IMAGES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(
            r"!\[(\d+)x(\d+)\]\((.*?)\)",
            r#"<img src="${3}" width="${1}" height="${2}" />"#,
        ),
        Rule::new(r"!\[(.*?)\]\((.*?)\)", r#"<img alt="${1}" src="${2}" />"#),
    ])
});

/// Explicit links, then bracketed URLs, then bare URLs.
///
/// The bare URL rule does not know about markup produced by earlier passes: a
/// URL preceded by whitespace inside an image `alt` attribute is linked too.
pub(crate) static LINKS: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::new(vec![
        Rule::new(r"\[(.*?)\]\((.*?)\)", r#"<a href="${2}">${1}</a>"#),
        Rule::new(r"\[(http[^\]\s]*)\]", r#"<a href="${1}">${1}</a>"#),
        Rule::new(
            r#"(^|\s)(https?://[^\s<>"]+)"#,
            r#"${1}<a href="${2}">${2}</a>"#,
        ),
    ])
});

/// May span lines.
pub(crate) static FENCED_CODE: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"(?s)```(.*?)```", "<pre>${1}</pre>")]));

pub(crate) static INLINE_CODE: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"`(.*?)`", "<code>${1}</code>")]));

pub(crate) static HORIZONTAL_RULE: LazyLock<RuleSet> =
    LazyLock::new(|| RuleSet::new(vec![Rule::new(r"(?m)^-{3,}[ \t]*$", "<hr>")]));

/// A single pattern-to-template substitution.
///
/// The replacement may reference capture groups as `${1}`, `${2}`, ...
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    /// Create a rule from a fixed pattern.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Rules are built from
    /// literals, so this is a programming error rather than a runtime
    /// condition; use [`Rule::try_new`] for patterns from elsewhere.
    #[must_use]
    pub fn new(pattern: &str, replacement: &'static str) -> Self {
        Self::try_new(pattern, replacement).unwrap()
    }

    /// Create a rule, reporting an invalid pattern as an error.
    pub fn try_new(pattern: &str, replacement: &'static str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    /// Replace every match in `text`.
    ///
    /// The buffer is returned untouched when nothing matches.
    #[must_use]
    pub fn apply(&self, text: String) -> String {
        if !self.pattern.is_match(&text) {
            return text;
        }
        self.pattern
            .replace_all(&text, self.replacement)
            .into_owned()
    }
}

/// Ordered list of substitutions making up one pass.
///
/// # Example
///
/// ```
/// use mdpipe_renderer::{Rule, RuleSet};
///
/// let rules = RuleSet::new(vec![
///     Rule::new(r"\+\+(.*?)\+\+", "<ins>${1}</ins>"),
///     Rule::new(r"==(.*?)==", "<mark>${1}</mark>"),
/// ]);
///
/// assert_eq!(rules.apply("++new++ ==hot==".to_owned()), "<ins>new</ins> <mark>hot</mark>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set. Rules run in the given order.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Run every rule over the buffer, in order.
    #[must_use]
    pub fn apply(&self, text: String) -> String {
        self.rules.iter().fold(text, |text, rule| rule.apply(text))
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(rules: &RuleSet, text: &str) -> String {
        rules.apply(text.to_owned())
    }

    #[test]
    fn test_sanitize_strips_tags() {
        assert_eq!(
            run(&SANITIZE, "<script>alert(1)</script>hello"),
            "alert(1)hello"
        );
    }

    #[test]
    fn test_sanitize_keeps_lone_angle_brackets() {
        assert_eq!(run(&SANITIZE, "a < b\n> quote"), "a < b\n> quote");
    }

    #[test]
    fn test_sanitize_normalizes_line_endings() {
        assert_eq!(run(&SANITIZE, "a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_headers_longest_prefix_first() {
        assert_eq!(
            run(&HEADERS, "# One\n## Two\n### Three"),
            "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>"
        );
    }

    #[test]
    fn test_header_without_space() {
        assert_eq!(run(&HEADERS, "#Title"), "<h1>Title</h1>");
    }

    #[test]
    fn test_header_only_at_line_start() {
        assert_eq!(run(&HEADERS, "issue #12"), "issue #12");
    }

    #[test]
    fn test_bold_then_italic() {
        let text = run(&BOLD, "**bold** and *italic*");
        assert_eq!(run(&ITALIC, &text), "<b>bold</b> and <i>italic</i>");
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        assert_eq!(run(&ITALIC, "* one\n* two"), "* one\n* two");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(run(&STRIKETHROUGH, "~~gone~~ here"), "<s>gone</s> here");
    }

    #[test]
    fn test_sized_image() {
        assert_eq!(
            run(&IMAGES, "![100x50](cat.jpg)"),
            r#"<img src="cat.jpg" width="100" height="50" />"#
        );
    }

    #[test]
    fn test_alt_image() {
        assert_eq!(
            run(&IMAGES, "![A cat](cat.jpg)"),
            r#"<img alt="A cat" src="cat.jpg" />"#
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            run(&LINKS, "see [Rust](https://rust-lang.org)"),
            r#"see <a href="https://rust-lang.org">Rust</a>"#
        );
    }

    #[test]
    fn test_bracketed_autolink() {
        assert_eq!(
            run(&LINKS, "[https://rust-lang.org]"),
            r#"<a href="https://rust-lang.org">https://rust-lang.org</a>"#
        );
    }

    #[test]
    fn test_bare_autolink_preserves_whitespace() {
        assert_eq!(
            run(&LINKS, "visit\thttps://rust-lang.org today"),
            "visit\t<a href=\"https://rust-lang.org\">https://rust-lang.org</a> today"
        );
    }

    #[test]
    fn test_bare_autolink_at_start_and_adjacent() {
        assert_eq!(
            run(&LINKS, "http://a.io http://b.io"),
            r#"<a href="http://a.io">http://a.io</a> <a href="http://b.io">http://b.io</a>"#
        );
    }

    #[test]
    fn test_bare_autolink_skips_explicit_link_target() {
        let once = run(&LINKS, "[home](http://example.com)");
        assert_eq!(once, r#"<a href="http://example.com">home</a>"#);
    }

    #[test]
    fn test_bare_autolink_inside_image_alt() {
        assert_eq!(
            run(&LINKS, r#"<img alt="see http://x.io" src="a.jpg" />"#),
            r#"<img alt="see <a href="http://x.io">http://x.io</a>" src="a.jpg" />"#
        );
    }

    #[test]
    fn test_fenced_code_spans_lines() {
        assert_eq!(
            run(&FENCED_CODE, "```\nlet a = 1;\n```"),
            "<pre>\nlet a = 1;\n</pre>"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(run(&INLINE_CODE, "call `f()` now"), "call <code>f()</code> now");
    }

    #[test]
    fn test_horizontal_rule_whole_line_only() {
        assert_eq!(
            run(&HORIZONTAL_RULE, "above\n---\nan -- b --- c\n-----"),
            "above\n<hr>\nan -- b --- c\n<hr>"
        );
    }

    #[test]
    fn test_unmatched_rule_is_noop() {
        assert_eq!(run(&BOLD, "no markers"), "no markers");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        let rules = RuleSet::new(vec![Rule::new("a", "aa")]);
        assert_eq!(run(&rules, "aa"), "aaaa");
    }

    #[test]
    fn test_try_new_invalid() {
        assert!(Rule::try_new("[", "").is_err());
    }

    #[test]
    fn test_len() {
        assert_eq!(IMAGES.len(), 2);
        assert_eq!(LINKS.len(), 3);
        assert!(RuleSet::default().is_empty());
    }
}
