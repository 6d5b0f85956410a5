//! Paragraph wrapping.
//!
//! Runs last: anything an earlier pass turned into markup starts with `<` and
//! is left alone, every other non-blank line becomes a paragraph.

/// Containers whose inner lines must not be wrapped.
const CONTAINERS: [(&str, &str); 2] = [("<pre>", "</pre>"), ("<blockquote>", "</blockquote>")];

/// Tracks whether we're inside a multi-line container emitted by an earlier
/// pass (a code block or a blockquote spanning several lines).
#[derive(Debug, Default)]
struct ContainerTracker {
    depth: usize,
}

impl ContainerTracker {
    fn inside(&self) -> bool {
        self.depth > 0
    }

    /// Account for the container tags opened and closed on `line`.
    fn update(&mut self, line: &str) {
        for (open, close) in CONTAINERS {
            self.depth += line.matches(open).count();
            self.depth = self.depth.saturating_sub(line.matches(close).count());
        }
    }
}

/// Wrap every bare text line in `<p>…</p>`.
///
/// A line is wrapped when it is non-blank, does not start with `<`, is not
/// inside a `<pre>` or `<blockquote>` container left open by a previous line
/// and does not itself leave such a container open.
///
/// # Examples
///
/// ```
/// use mdpipe_renderer::wrap_paragraphs;
///
/// let out = wrap_paragraphs("<h1>Title</h1>\n\nSome text".to_owned());
/// assert_eq!(out, "<h1>Title</h1>\n\n<p>Some text</p>");
/// ```
#[must_use]
pub fn wrap_paragraphs(text: String) -> String {
    let mut tracker = ContainerTracker::default();
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let was_inside = tracker.inside();
        tracker.update(line);
        let eligible = !was_inside
            && !tracker.inside()
            && !line.trim().is_empty()
            && !line.starts_with('<');

        if eligible {
            out.push(format!("<p>{line}</p>"));
        } else {
            out.push(line.to_owned());
        }
    }

    out.join("\n")
}
