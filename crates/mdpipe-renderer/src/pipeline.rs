//! Pass ordering and the conversion entry point.

use crate::block::{
    BLOCKQUOTE, BLOCKQUOTE_COLON, INDENTED_CODE, ORDERED_LIST, UNORDERED_LIST, scan_block,
};
use crate::paragraph::wrap_paragraphs;
use crate::rules::{
    BOLD, FENCED_CODE, HEADERS, HORIZONTAL_RULE, IMAGES, INLINE_CODE, ITALIC, LINKS, SANITIZE,
    STRIKETHROUGH,
};

/// One whole-buffer transformation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Strip pre-existing tags and normalise line endings.
    Sanitize,
    /// `#`, `##`, `###` lines.
    Headers,
    /// `**text**`.
    Bold,
    /// `*text*`.
    Italic,
    /// `~~text~~`.
    Strikethrough,
    /// `![WxH](url)` and `![alt](url)`.
    Images,
    /// `[text](url)`, `[http…]` and bare URLs.
    Links,
    /// Runs of `* ` lines.
    UnorderedList,
    /// Runs of `1.` / `1-` lines.
    OrderedList,
    /// Runs of `>` lines, then runs of `:` lines.
    Blockquote,
    /// Triple-backtick spans.
    FencedCode,
    /// Runs of lines indented by four spaces.
    IndentedCode,
    /// Single-backtick spans.
    InlineCode,
    /// `---` lines.
    HorizontalRule,
    /// Remaining bare text lines.
    Paragraph,
}

/// The canonical pass order.
///
/// Order encodes precedence between constructs sharing delimiters; do not
/// reorder without checking the adjacency notes below.
pub const PASSES: [Pass; 15] = [
    // Must be first: later rules only ever see markdown source, not markup.
    Pass::Sanitize,
    Pass::Headers,
    // Bold before italic: both use `*`, the longer delimiter must win.
    Pass::Bold,
    Pass::Italic,
    Pass::Strikethrough,
    // Images before links: `![..](..)` contains `[..](..)`, the `!` would be
    // left behind if the link rule ran first.
    Pass::Images,
    Pass::Links,
    // Block passes before paragraphs so their lines start with a tag.
    Pass::UnorderedList,
    Pass::OrderedList,
    Pass::Blockquote,
    // Code blocks before inline code and rules, so that backticks and `---`
    // inside a block are consumed by the block first.
    Pass::FencedCode,
    Pass::IndentedCode,
    Pass::InlineCode,
    Pass::HorizontalRule,
    // Must be last: wraps only lines no earlier pass claimed.
    Pass::Paragraph,
];

impl Pass {
    /// Short name of the pass, for logging and inspection.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sanitize => "sanitize",
            Self::Headers => "headers",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Images => "images",
            Self::Links => "links",
            Self::UnorderedList => "unordered-list",
            Self::OrderedList => "ordered-list",
            Self::Blockquote => "blockquote",
            Self::FencedCode => "fenced-code",
            Self::IndentedCode => "indented-code",
            Self::InlineCode => "inline-code",
            Self::HorizontalRule => "horizontal-rule",
            Self::Paragraph => "paragraph",
        }
    }

    /// Run this pass over the whole buffer.
    #[must_use]
    pub fn apply(self, text: String) -> String {
        match self {
            Self::Sanitize => SANITIZE.apply(text),
            Self::Headers => HEADERS.apply(text),
            Self::Bold => BOLD.apply(text),
            Self::Italic => ITALIC.apply(text),
            Self::Strikethrough => STRIKETHROUGH.apply(text),
            Self::Images => IMAGES.apply(text),
            Self::Links => LINKS.apply(text),
            Self::UnorderedList => scan_block(text, &UNORDERED_LIST),
            Self::OrderedList => scan_block(text, &ORDERED_LIST),
            Self::Blockquote => scan_block(scan_block(text, &BLOCKQUOTE), &BLOCKQUOTE_COLON),
            Self::FencedCode => FENCED_CODE.apply(text),
            Self::IndentedCode => scan_block(text, &INDENTED_CODE),
            Self::InlineCode => INLINE_CODE.apply(text),
            Self::HorizontalRule => HORIZONTAL_RULE.apply(text),
            Self::Paragraph => wrap_paragraphs(text),
        }
    }
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Convert a markdown document to an HTML fragment.
///
/// Runs every pass in [`PASSES`] over the whole document. The result is not
/// meant to be fed back in: the sanitize pass would strip the tags just
/// produced.
///
/// # Examples
///
/// ```
/// let html = mdpipe_renderer::parse("Some **bold** and *italic*");
/// assert_eq!(html, "<p>Some <b>bold</b> and <i>italic</i></p>");
/// ```
#[must_use]
pub fn parse(text: &str) -> String {
    let html = PASSES.iter().fold(text.to_owned(), |buffer, pass| {
        let buffer = pass.apply(buffer);
        tracing::trace!(pass = pass.name(), len = buffer.len(), "Pass completed");
        buffer
    });
    tracing::debug!(
        input_len = text.len(),
        output_len = html.len(),
        "Converted document"
    );
    html
}
