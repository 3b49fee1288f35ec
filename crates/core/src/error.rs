//! Error types for the flowlink protocol.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations. Anything originating from untrusted wire data is
//! represented here and recovered at the codec boundary; local misuse of
//! the API (e.g. assembling a response for a command still in request
//! state) is not an `Error` variant; it panics at the offending call
//! site.

use std::io;

use thiserror::Error;

/// Result type alias for flowlink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the flowlink protocol.
#[derive(Debug, Error)]
pub enum Error {
    // ==================== Structural decode errors ====================
    /// A reserved header key is absent or empty.
    #[error("missing '{key}' header key")]
    MissingHeaderKey {
        /// The reserved key that was expected.
        key: String,
    },

    /// A header line did not follow the `#key=value` shape.
    #[error("malformed header line: {line}")]
    MalformedHeaderLine {
        /// The offending line, verbatim.
        line: String,
    },

    /// The payload body was not valid base64.
    #[error("invalid base64 payload: {reason}")]
    InvalidBase64 {
        /// Decoder diagnostic.
        reason: String,
    },

    /// A gzip-compressed response payload could not be decompressed.
    #[error("invalid compressed payload: {reason}")]
    InvalidCompression {
        /// Decompressor diagnostic.
        reason: String,
    },

    // ==================== Resolution errors ====================
    /// The command identifier named in the header is not registered.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The identifier as it appeared on the wire.
        name: String,
    },

    /// A command-line string had an unterminated quoted token.
    #[error("unbalanced quotes in options: {line}")]
    UnbalancedQuotes {
        /// The command line as given.
        line: String,
    },

    /// A command rejected its own command-line options.
    #[error("invalid option for {command}: {reason}")]
    InvalidOption {
        /// Identifier of the command that rejected the options.
        command: String,
        /// What was wrong with them.
        reason: String,
    },

    /// An unspecified flow id (-1) requires exactly one running flow.
    #[error("expected exactly one running flow, but found {count}")]
    FlowCountMismatch {
        /// The number of flows actually running.
        count: usize,
    },

    /// No running flow carries the requested id.
    #[error("no running flow with id {id}")]
    FlowNotFound {
        /// The id that failed to resolve.
        id: i64,
    },

    /// A reload was requested but the flow does not know its source file.
    #[error("flow has no '{variable}' variable, cannot reload from disk")]
    MissingFlowFile {
        /// The well-known variable that was expected on the flow.
        variable: String,
    },

    /// The flow's recorded source file no longer exists on disk.
    #[error("flow file does not exist: {path}")]
    FlowFileMissing {
        /// Path recorded on the flow.
        path: String,
    },

    /// The flow's source file exists but could not be parsed.
    #[error("failed to load flow from {path}: {reason}")]
    FlowLoad {
        /// Path that was read.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    // ==================== System errors ====================
    /// Payload serialization/deserialization error.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Serializer diagnostic.
        reason: String,
    },

    /// I/O error (disk access during reload, compression streams).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
