//! Round-trips a header + payload to/from a single string blob.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use flowlink_core::{Error, Header, Result, COMMENT_MARKER};

/// Column width the base64 body is hard-wrapped at. Every body line
/// except possibly the last is exactly this long.
pub const WRAP_COLUMNS: usize = 72;

/// A decoded message: the header block plus the raw payload bytes.
///
/// The payload is whatever the base64 body decoded to. For responses
/// that means still gzip-compressed; decompression is the command
/// layer's job because only it knows the message's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// The key/value preamble.
    pub header: Header,
    /// The decoded body, empty when the message had no body lines.
    pub payload: Vec<u8>,
}

/// Encode a header and payload into the wire string.
///
/// The header renders as its comment block. An empty payload produces no
/// body at all; a non-empty payload is base64-encoded (standard alphabet,
/// padded) and wrapped at [`WRAP_COLUMNS`], lines joined by `\n`.
pub fn encode(header: &Header, payload: &[u8]) -> String {
    let mut out = header.to_comment_block();
    if !payload.is_empty() {
        let encoded = BASE64.encode(payload);
        // Base64 output is pure ASCII, so byte-wise chunking is safe.
        let mut first = true;
        for chunk in encoded.as_bytes().chunks(WRAP_COLUMNS) {
            if !first {
                out.push('\n');
            }
            // Chunks of ASCII bytes are always valid UTF-8.
            out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
            first = false;
        }
    }
    out
}

/// Decode a wire string into header and payload bytes.
///
/// Leading lines that start with the comment marker form the header; the
/// first line that does not ends header consumption for good. Any later
/// line, even one that happens to start with the marker, belongs to the
/// payload. Payload lines are concatenated without separator and base64
/// decoded; zero payload lines decode to empty bytes.
pub fn decode(data: &str) -> Result<Envelope> {
    let mut header_lines = Vec::new();
    let mut body = String::new();
    let mut in_header = true;

    for line in data.lines() {
        if in_header && line.starts_with(COMMENT_MARKER) {
            header_lines.push(line);
        } else {
            in_header = false;
            body.push_str(line.trim_end());
        }
    }

    let header = Header::from_comment_lines(header_lines)?;
    let payload = if body.is_empty() {
        Vec::new()
    } else {
        BASE64
            .decode(body.as_bytes())
            .map_err(|e| Error::InvalidBase64 { reason: e.to_string() })?
    };

    Ok(Envelope { header, payload })
}
