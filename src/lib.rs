//! flowlink - Remote command protocol for workflow engines
//!
//! flowlink lets one process instruct another to inspect, stop, and
//! restart its running workflows. Messages are plain text: a `#key=value`
//! comment-block header followed by a base64 body, safe to ship over any
//! byte or line transport.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use flowlink::{
//!     assemble_request, BufferConnection, CommandRegistry, Dispatcher,
//!     FileFlowLoader, LoggingRequestHandler, MessageBuffer, Ping, RunningFlows,
//! };
//!
//! // The receiving side: a dispatcher over the running-flow registry.
//! let flows = Arc::new(RunningFlows::new());
//! let dispatcher = Dispatcher::new(
//!     Arc::new(CommandRegistry::default()),
//!     flows,
//!     Arc::new(FileFlowLoader::new()),
//! );
//!
//! // The sending side: assemble a request and hand the text to the
//! // dispatcher (in production the string crosses a transport first).
//! let raw = assemble_request(&mut Ping::new())?;
//! let replies = MessageBuffer::new();
//! dispatcher.dispatch_request(
//!     &raw,
//!     Box::new(BufferConnection::new(replies.clone())),
//!     &mut LoggingRequestHandler,
//! );
//! ```
//!
//! # Architecture
//!
//! The workspace splits along the protocol's seams: `flowlink-core`
//! holds the header model, flow abstractions, and errors;
//! `flowlink-wire` the envelope codec and compression; `flowlink-commands`
//! the command model with its built-in variants; `flowlink-engine` the
//! dispatcher, the running-flow registry, and the flow file loader.

pub use flowlink_commands::basic::{
    FlowSummary, GetFlow, ListFlows, Ping, RestartFlow, StopFlow, SystemInfo,
};
pub use flowlink_commands::{
    assemble_request, assemble_response, default_registry, join_options, parse_command,
    send_response_via_connection, split_options, BufferConnection, CommandContext, CommandFactory,
    CommandRegistry, CommandState, Connection, FlowAware, FlowTarget, LoggingRequestHandler,
    LoggingResponseHandler, MessageBuffer, RemoteCommand, RequestHandler, ResponseHandler,
    UNSPECIFIED_FLOW_ID,
};
pub use flowlink_core::{
    Error, Flow, FlowLoader, FlowRegistry, Header, MessageKind, Result, COMMENT_MARKER,
    KEY_COMMAND, KEY_TYPE, VAR_FLOW_DIR, VAR_FLOW_FILE, VAR_FLOW_NAME,
};
pub use flowlink_engine::{Dispatcher, FileFlowLoader, RunningFlows};
pub use flowlink_wire::{decode, encode, Envelope, WRAP_COLUMNS};
