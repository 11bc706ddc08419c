//! JSONP envelope stripping
//!
//! The update center publishes its manifest wrapped in a JSONP call:
//!
//! ```text
//! updateCenter.post(
//! {"connectionCheckUrl": ..., "plugins": {...}}
//! );
//! ```
//!
//! The payload is the second line; the wrapper lines are discarded.

use crate::update_center::error::ExtractError;

/// Zero-based index of the payload line inside the envelope
const PAYLOAD_LINE: usize = 1;

/// Returns the JSON payload line of a JSONP document without validating it.
///
/// Lines end at `\r\n`, `\n` or a lone `\r`.
pub fn strip_jsonp_envelope(text: &str) -> Result<&str, ExtractError> {
    split_lines(text)
        .nth(PAYLOAD_LINE)
        .ok_or_else(|| ExtractError::MissingPayload {
            lines: split_lines(text).count(),
        })
}

/// Splits on any line terminator. A trailing terminator does not start an extra line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(end) => {
                let line = &rest[..end];
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut rest)),
        }
    })
}
