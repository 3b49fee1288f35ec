//! Command model, registry and lifecycle for the flowlink protocol.
//!
//! A [`RemoteCommand`] is a self-describing request or response unit; one
//! concrete variant exists per supported operation. Variants are plain
//! structs embedding a [`CommandState`] for the shared lifecycle fields
//! (request/response role, payloads, error message, application context).
//!
//! The [`CommandRegistry`] maps the fully-qualified identifier carried in
//! the `Command` header key to a factory for the matching variant; the
//! closed set of built-in variants is registered explicitly at startup;
//! no reflection, no runtime discovery.
//!
//! Responses travel over a [`Connection`], which may be a different
//! transport than the one the request arrived on. The connection traits
//! use the template-method shape: `send_request`/`send_response` fire the
//! command's before/after hooks around the transmission attempt, while
//! implementations only provide `do_send_request`/`do_send_response`.

mod command;
mod connection;
mod handler;
mod options;
mod registry;
mod targeting;

pub mod basic;

pub use command::{
    assemble_request, assemble_response, parse_command, send_response_via_connection,
    CommandContext, CommandState, RemoteCommand,
};
pub use connection::{BufferConnection, Connection, MessageBuffer};
pub use handler::{
    LoggingRequestHandler, LoggingResponseHandler, RequestHandler, ResponseHandler,
};
pub use options::{join_options, split_options};
pub use registry::{default_registry, CommandFactory, CommandRegistry};
pub use targeting::{FlowAware, FlowTarget, UNSPECIFIED_FLOW_ID};
