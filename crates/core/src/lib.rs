//! Core types for the flowlink remote command protocol.
//!
//! This crate holds the pieces everything else builds on:
//!
//! - [`Header`]: the ordered key/value preamble of an encoded command,
//!   with named accessors for the two reserved keys (`Command`, `Type`)
//! - [`MessageKind`]: whether a message travels as a request or a response
//! - [`Flow`] and the [`FlowRegistry`]/[`FlowLoader`] collaborator traits:
//!   the external workflow engine as seen by the protocol
//! - [`Error`]: the error taxonomy shared by all flowlink crates
//!
//! No wire encoding, command dispatch, or I/O lives here; those are the
//! concerns of `flowlink-wire`, `flowlink-commands` and `flowlink-engine`.

mod error;
mod flow;
mod header;
mod kind;

pub use error::{Error, Result};
pub use flow::{Flow, FlowLoader, FlowRegistry, VAR_FLOW_DIR, VAR_FLOW_FILE, VAR_FLOW_NAME};
pub use header::{Header, COMMENT_MARKER, KEY_COMMAND, KEY_TYPE};
pub use kind::MessageKind;
