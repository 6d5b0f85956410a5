//! Standalone HTML document shell around a converted fragment.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

/// Wrap an HTML fragment in a complete HTML5 document.
///
/// `stylesheet` is inlined in a `<style>` element when present.
pub(crate) fn wrap_document(
    fragment: &str,
    title: &str,
    lang: &str,
    stylesheet: Option<&str>,
) -> String {
    let mut out = String::with_capacity(fragment.len() + 256);

    out.push_str("<!DOCTYPE html>\n");
    writeln!(out, r#"<html lang="{}">"#, encode_double_quoted_attribute(lang)).unwrap();
    out.push_str("<head>\n<meta charset=\"utf-8\">\n");
    writeln!(out, "<title>{}</title>", encode_text(title)).unwrap();
    if let Some(css) = stylesheet {
        writeln!(out, "<style>\n{}\n</style>", css.trim_end()).unwrap();
    }
    out.push_str("</head>\n<body>\n");
    out.push_str(fragment);
    if !fragment.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</body>\n</html>\n");

    out
}
