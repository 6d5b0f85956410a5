//! Line-anchored marker patterns.
//!
//! A [`LinePattern`] recognises the leading marker of a block line (`* `,
//! `1.`, `>`, four spaces) and can strip it. Lines are evaluated one at a
//! time; there is no lookahead or lookbehind across lines.

use std::borrow::Cow;

use regex::Regex;

/// A leading-anchor pattern evaluated against a single line.
#[derive(Debug, Clone)]
pub struct LinePattern {
    regex: Regex,
}

impl LinePattern {
    /// Compile a marker pattern.
    ///
    /// The pattern is anchored at the start of the line; a leading `^` is
    /// added when the source lacks one.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdpipe_renderer::LinePattern;
    ///
    /// let bullet = LinePattern::new(r"\*\s+").unwrap();
    /// assert!(bullet.matches("* item"));
    /// assert!(!bullet.matches("an * in the middle"));
    /// assert_eq!(bullet.strip("* item"), "item");
    /// ```
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        let anchored = if source.starts_with('^') {
            Cow::Borrowed(source)
        } else {
            Cow::Owned(format!("^(?:{source})"))
        };
        Ok(Self {
            regex: Regex::new(&anchored)?,
        })
    }

    /// Check whether the line starts with the marker.
    ///
    /// An empty line never matches.
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        !line.is_empty() && self.regex.is_match(line)
    }

    /// Remove the first occurrence of the marker from the line.
    ///
    /// Returns the line unchanged (borrowed) when the marker is absent.
    #[must_use]
    pub fn strip<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if line.is_empty() {
            return Cow::Borrowed(line);
        }
        self.regex.replacen(line, 1, "")
    }

    /// The compiled pattern source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}
