//! Conversion errors.

use crate::pipeline::parse;

/// Error returned when a document cannot be converted.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input is not valid UTF-8.
    #[error("input is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

/// Convert raw document bytes to an HTML fragment.
///
/// Fails without producing any output if `input` is not valid UTF-8.
///
/// # Examples
///
/// ```
/// use mdpipe_renderer::{ParseError, parse_bytes};
///
/// assert_eq!(parse_bytes(b"plain").unwrap(), "<p>plain</p>");
/// assert!(matches!(
///     parse_bytes(b"ok\xff"),
///     Err(ParseError::InvalidUtf8 { valid_up_to: 2 })
/// ));
/// ```
pub fn parse_bytes(input: &[u8]) -> Result<String, ParseError> {
    let text = std::str::from_utf8(input)?;
    Ok(parse(text))
}
