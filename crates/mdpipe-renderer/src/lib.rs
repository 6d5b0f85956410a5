//! Pass-based markdown to HTML fragment converter.
//!
//! The converter runs a fixed, ordered list of whole-buffer passes over the
//! document text. Each pass takes the buffer by value and hands back the
//! rewritten buffer, so passes never alias and can be tested in isolation.
//!
//! # Architecture
//!
//! - [`LinePattern`]: line-anchored marker matching and stripping
//! - [`scan_block`]: generic state machine wrapping runs of marked lines
//!   (lists, blockquotes, indented code)
//! - [`RuleSet`]: ordered regex substitutions for inline and single-line
//!   constructs (headers, emphasis, images, links, code, rules)
//! - [`Pass`] / [`PASSES`]: the canonical pass order
//!
//! There is no AST and no nested inline parsing: emphasis inside a link label
//! is whatever the flat substitution order produces.
//!
//! # Example
//!
//! ```
//! let html = mdpipe_renderer::parse("# Hello\n\n* one\n* two");
//!
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<ul><li>one</li>\n<li>two</li></ul>"));
//! ```

mod block;
mod error;
mod paragraph;
mod pattern;
mod pipeline;
mod rules;

pub use block::{BlockRule, Wrap, scan_block};
pub use error::{ParseError, parse_bytes};
pub use paragraph::wrap_paragraphs;
pub use pattern::LinePattern;
pub use pipeline::{PASSES, Pass, parse};
pub use rules::{Rule, RuleSet};
