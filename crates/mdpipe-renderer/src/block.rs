//! Block scanning for line-marked constructs.
//!
//! Lists, blockquotes and indented code are all recognised the same way: a
//! run of consecutive lines that start with the same marker. [`scan_block`]
//! is the single state machine behind all of them; each construct is a
//! [`BlockRule`] instance.

use std::sync::LazyLock;

use crate::pattern::LinePattern;

pub(crate) static UNORDERED_LIST: LazyLock<BlockRule> = LazyLock::new(|| {
    BlockRule::new(
        LinePattern::new(r"^\*").unwrap(),
        Wrap::new("<ul>", "</ul>"),
    )
    .with_line_wrap(Wrap::new("<li>", "</li>"))
});

pub(crate) static ORDERED_LIST: LazyLock<BlockRule> = LazyLock::new(|| {
    BlockRule::new(
        LinePattern::new(r"^\d+[.-]").unwrap(),
        Wrap::new("<ol>", "</ol>"),
    )
    .with_line_wrap(Wrap::new("<li>", "</li>"))
});

pub(crate) static BLOCKQUOTE: LazyLock<BlockRule> = LazyLock::new(|| {
    BlockRule::new(
        LinePattern::new("^>").unwrap(),
        Wrap::new("<blockquote>", "</blockquote>"),
    )
});

pub(crate) static BLOCKQUOTE_COLON: LazyLock<BlockRule> = LazyLock::new(|| {
    BlockRule::new(
        LinePattern::new("^:").unwrap(),
        Wrap::new("<blockquote>", "</blockquote>"),
    )
});

pub(crate) static INDENTED_CODE: LazyLock<BlockRule> = LazyLock::new(|| {
    BlockRule::new(
        LinePattern::new("^ {4}").unwrap(),
        Wrap::new("<pre>", "</pre>"),
    )
});

/// A pair of opening and closing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    /// Text emitted before the wrapped content.
    pub open: &'static str,
    /// Text emitted after the wrapped content.
    pub close: &'static str,
}

impl Wrap {
    /// Create a tag pair.
    #[must_use]
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    /// Push `content` enclosed in this tag pair onto `out`.
    pub fn enclose_into(&self, out: &mut String, content: &str) {
        out.push_str(self.open);
        out.push_str(content);
        out.push_str(self.close);
    }
}

/// Parameters for one block construct.
#[derive(Debug, Clone)]
pub struct BlockRule {
    /// Leading marker every line of the block starts with.
    pub marker: LinePattern,
    /// Tags around the whole run.
    pub block: Wrap,
    /// Tags around each line of the run, if any.
    pub line: Option<Wrap>,
}

impl BlockRule {
    /// Create a rule that wraps each run of marked lines in `block`.
    #[must_use]
    pub fn new(marker: LinePattern, block: Wrap) -> Self {
        Self {
            marker,
            block,
            line: None,
        }
    }

    /// Also wrap every line of the run individually.
    #[must_use]
    pub fn with_line_wrap(mut self, line: Wrap) -> Self {
        self.line = Some(line);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutOfBlock,
    InBlock,
}

/// Wrap every run of consecutive marker lines in the rule's block tags.
///
/// For each line that starts with the marker, the marker is stripped, the
/// rest is trimmed and, if the rule has a line wrap, enclosed in it. The
/// block's opening tag is prefixed to the first line of a run and its closing
/// tag appended to the last one. Any non-matching line, blank lines included,
/// ends the run; a run still open at end of input is closed there.
///
/// # Examples
///
/// ```
/// use mdpipe_renderer::{BlockRule, LinePattern, Wrap, scan_block};
///
/// let rule = BlockRule::new(LinePattern::new("^>").unwrap(), Wrap::new("<q>", "</q>"));
/// let out = scan_block("> a\n> b\nafter".to_owned(), &rule);
///
/// assert_eq!(out, "<q>a\nb</q>\nafter");
/// ```
#[must_use]
pub fn scan_block(text: String, rule: &BlockRule) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut state = ScanState::OutOfBlock;

    for line in text.split('\n') {
        if rule.marker.matches(line) {
            let stripped = rule.marker.strip(line);
            let content = stripped.trim();

            let mut emitted = String::with_capacity(line.len() + rule.block.open.len());
            if state == ScanState::OutOfBlock {
                emitted.push_str(rule.block.open);
                state = ScanState::InBlock;
            }
            match rule.line {
                Some(wrap) => wrap.enclose_into(&mut emitted, content),
                None => emitted.push_str(content),
            }
            out.push(emitted);
        } else {
            if state == ScanState::InBlock {
                close_run(&mut out, rule.block.close);
                state = ScanState::OutOfBlock;
            }
            out.push(line.to_owned());
        }
    }

    if state == ScanState::InBlock {
        close_run(&mut out, rule.block.close);
    }

    out.join("\n")
}

/// Append the closing tag to the last emitted line of a run.
fn close_run(out: &mut [String], close: &str) {
    if let Some(last) = out.last_mut() {
        last.push_str(close);
    }
}
