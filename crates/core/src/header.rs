//! The key/value preamble of an encoded command.
//!
//! On the wire a header is a block of comment lines, one `#key=value`
//! per line, in insertion order:
//!
//! ```text
//! #Command=demo.Ping
//! #Type=Request
//! ```
//!
//! Two keys are reserved (`Command` and `Type`), but beyond those the
//! header is opaque key/value storage: the codec and individual command
//! variants are free to add extra keys.

use crate::error::{Error, Result};
use crate::kind::MessageKind;

/// The comment marker every header line starts with.
pub const COMMENT_MARKER: &str = "#";

/// Reserved key holding the command identifier plus its options.
pub const KEY_COMMAND: &str = "Command";

/// Reserved key holding the message kind (`Request` or `Response`).
pub const KEY_TYPE: &str = "Type";

/// An ordered string-to-string map with two reserved keys layered on top.
///
/// Insertion order is preserved so an encoded header renders
/// deterministically; decoding accepts keys in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    entries: Vec<(String, String)>,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Header {
        Header::default()
    }

    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a key, replacing an existing value in place (the key keeps its
    /// original position) or appending a new entry.
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the header has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ==================== Reserved keys ====================

    /// The `Command` value: the command identifier plus its options.
    pub fn command(&self) -> Option<&str> {
        self.get(KEY_COMMAND)
    }

    /// Set the `Command` value.
    pub fn set_command(&mut self, command_line: &str) {
        self.set(KEY_COMMAND, command_line);
    }

    /// The raw `Type` value, if present.
    pub fn message_type(&self) -> Option<&str> {
        self.get(KEY_TYPE)
    }

    /// Set the `Type` value from a [`MessageKind`].
    pub fn set_message_type(&mut self, kind: MessageKind) {
        self.set(KEY_TYPE, kind.as_str());
    }

    // ==================== Textual form ====================

    /// Render the header as its comment block: one `#key=value` line per
    /// entry, each terminated by a newline.
    pub fn to_comment_block(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(COMMENT_MARKER);
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Parse a header from the comment lines of a message.
    ///
    /// Each line must start with the comment marker and contain `key=value`
    /// after it. Which lines belong to the header is the codec's call; this
    /// only parses the lines it is given.
    pub fn from_comment_lines<'a, I>(lines: I) -> Result<Header>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut header = Header::new();
        for line in lines {
            let rest = line
                .strip_prefix(COMMENT_MARKER)
                .ok_or_else(|| Error::MalformedHeaderLine { line: line.to_string() })?;
            let (key, value) = rest
                .split_once('=')
                .ok_or_else(|| Error::MalformedHeaderLine { line: line.to_string() })?;
            header.set(key, value);
        }
        Ok(header)
    }
}
