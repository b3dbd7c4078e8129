//! Line-delimited JSON codec
//!
//! One self-contained JSON record per newline-terminated line. Encoding goes
//! through serde_json, so arbitrary text content (quotes, control characters)
//! is escaped and an encoded line can never contain a raw newline. Blank
//! lines between records are a normal part of the stream and decode to
//! "no record" rather than an error.

use crate::error::{ProtocolError, Result};
use serde_json::Value;

/// Encode an outbound record as a single newline-terminated line
pub fn encode_line(record: &Value) -> Result<String> {
    let mut line = serde_json::to_string(record).map_err(ProtocolError::Encode)?;
    line.push('\n');
    Ok(line)
}

/// Decode one line received from the CLI
///
/// Trailing whitespace (including the line terminator) is stripped first.
/// Returns `Ok(None)` for blank lines, `Ok(Some(record))` for valid JSON, and
/// [`ProtocolError::Decode`] carrying the exact raw text otherwise.
pub fn decode_line(line: &str) -> Result<Option<Value>> {
    let trimmed = line.trim_end();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(record) => Ok(Some(record)),
        Err(source) => Err(ProtocolError::Decode {
            raw: trimmed.to_string(),
            source,
        }),
    }
}
