//! The `RemoteCommand` trait and the request/response lifecycle.
//!
//! Lifecycle of a single exchange:
//!
//! 1. Sender builds a command and calls [`assemble_request`]; the string
//!    goes out over whatever transport the application uses.
//! 2. Receiver hands the raw text to [`parse_command`]; structural
//!    failures are logged and yield `None`; nothing from the wire ever
//!    panics.
//! 3. The dispatcher calls [`RemoteCommand::handle_request`]. Base
//!    commands act directly and return an error string or `None`;
//!    response-capable commands flip to response processing and delegate
//!    to their configured [`Connection`](crate::Connection) via
//!    [`send_response_via_connection`].
//! 4. The original sender decodes the returned bytes with
//!    [`parse_command`] again and reports through a
//!    [`ResponseHandler`](crate::ResponseHandler).
//!
//! Commands are discarded after the round trip; there is no persistence
//! beyond the single exchange.

use std::any::Any;
use std::sync::Arc;

use flowlink_core::{
    Error, Flow, FlowLoader, FlowRegistry, Header, MessageKind, Result, KEY_COMMAND, KEY_TYPE,
};

use crate::connection::Connection;
use crate::options;
use crate::registry::CommandRegistry;

/// Collaborators a command may need while handling a request.
#[derive(Clone)]
pub struct CommandContext {
    /// The registry of currently running flows.
    pub flows: Arc<dyn FlowRegistry>,
    /// Loader for the reload-from-disk step of flow targeting.
    pub loader: Arc<dyn FlowLoader>,
}

impl CommandContext {
    /// Bundle the collaborators into a context.
    pub fn new(flows: Arc<dyn FlowRegistry>, loader: Arc<dyn FlowLoader>) -> CommandContext {
        CommandContext { flows, loader }
    }
}

/// The lifecycle fields shared by every command variant.
///
/// Variants embed one of these and hand it out through
/// [`RemoteCommand::state`]/[`RemoteCommand::state_mut`]; the trait's
/// provided methods do the rest.
pub struct CommandState {
    is_request: bool,
    request_payload: Vec<u8>,
    response_payload: Vec<u8>,
    error_message: Option<String>,
    application_context: Option<Arc<dyn Any + Send + Sync>>,
    response_connection: Option<Box<dyn Connection>>,
}

impl Default for CommandState {
    fn default() -> CommandState {
        CommandState {
            // A command starts life as a request until explicitly flipped.
            is_request: true,
            request_payload: Vec::new(),
            response_payload: Vec::new(),
            error_message: None,
            application_context: None,
            response_connection: None,
        }
    }
}

impl CommandState {
    /// Fresh state: request role, empty payloads, no error.
    pub fn new() -> CommandState {
        CommandState::default()
    }

    /// Whether the command is still in request processing.
    pub fn is_request(&self) -> bool {
        self.is_request
    }

    /// Flip between request and response processing.
    pub fn set_request(&mut self, request: bool) {
        self.is_request = request;
    }

    /// The request-side payload bytes.
    pub fn request_payload(&self) -> &[u8] {
        &self.request_payload
    }

    /// Set the request-side payload bytes.
    pub fn set_request_payload(&mut self, bytes: Vec<u8>) {
        self.request_payload = bytes;
    }

    /// The response-side payload bytes.
    pub fn response_payload(&self) -> &[u8] {
        &self.response_payload
    }

    /// Set the response-side payload bytes.
    pub fn set_response_payload(&mut self, bytes: Vec<u8>) {
        self.response_payload = bytes;
    }

    /// The recorded failure, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Record a failure.
    pub fn set_error_message(&mut self, message: &str) {
        self.error_message = Some(message.to_string());
    }

    /// Clear any recorded failure.
    pub fn clear_error_message(&mut self) {
        self.error_message = None;
    }

    /// The opaque handle to the hosting application, if attached.
    pub fn application_context(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.application_context.as_ref()
    }

    /// Attach the opaque application handle. Never serialized.
    pub fn set_application_context(&mut self, ctx: Option<Arc<dyn Any + Send + Sync>>) {
        self.application_context = ctx;
    }

    /// Configure the connection responses travel back over.
    pub fn set_response_connection(&mut self, connection: Box<dyn Connection>) {
        self.response_connection = Some(connection);
    }

    /// Temporarily take ownership of the response connection.
    pub fn take_response_connection(&mut self) -> Option<Box<dyn Connection>> {
        self.response_connection.take()
    }
}

/// A self-describing request or response unit of the protocol.
///
/// Implementations provide `name`, the two `state` accessors, and
/// `handle_request`; everything else has a sensible provided default.
pub trait RemoteCommand: Send {
    /// The fully-qualified command identifier (e.g. `flowlink.basic.Ping`).
    fn name(&self) -> &'static str;

    /// Shared lifecycle state.
    fn state(&self) -> &CommandState;

    /// Shared lifecycle state, mutably.
    fn state_mut(&mut self) -> &mut CommandState;

    /// The variant's command-line flags, for re-serialization into the
    /// `Command` header value.
    fn options(&self) -> Vec<String> {
        Vec::new()
    }

    /// Parse the variant's command-line flags. The default accepts no
    /// flags at all.
    fn parse_options(&mut self, opts: &[String]) -> Result<()> {
        if opts.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidOption {
                command: self.name().to_string(),
                reason: format!("unexpected options: {}", opts.join(" ")),
            })
        }
    }

    /// The identifier plus re-serialized options, i.e. the `Command` header value.
    fn command_line(&self) -> String {
        let opts = self.options();
        if opts.is_empty() {
            self.name().to_string()
        } else {
            format!("{} {}", self.name(), options::join_options(&opts))
        }
    }

    /// Populate lifecycle fields from a decoded header.
    ///
    /// Reads the reserved `Type` key: the literal `Request` selects
    /// request processing, any other present value selects response
    /// processing, and a missing key is an error; the role is never
    /// silently defaulted.
    fn parse(&mut self, header: &Header) -> Result<()> {
        let kind = header
            .message_type()
            .ok_or_else(|| Error::MissingHeaderKey { key: KEY_TYPE.to_string() })?;
        let is_request = MessageKind::from_header_value(kind) == MessageKind::Request;
        self.state_mut().set_request(is_request);
        Ok(())
    }

    /// Add variant-specific keys to an outgoing header. Default: none.
    fn extend_header(&self, _header: &mut Header) {}

    /// Whether the command is still in request processing.
    fn is_request(&self) -> bool {
        self.state().is_request()
    }

    /// Attach decoded payload bytes; the role they land in depends on the
    /// current request/response flag.
    fn set_payload(&mut self, bytes: Vec<u8>) {
        if self.is_request() {
            self.state_mut().set_request_payload(bytes);
        } else {
            self.state_mut().set_response_payload(bytes);
        }
    }

    /// The payload for the current role.
    fn payload(&self) -> &[u8] {
        if self.is_request() {
            self.state().request_payload()
        } else {
            self.state().response_payload()
        }
    }

    /// Whether a failure has been recorded on this command.
    fn has_error_message(&self) -> bool {
        self.state().error_message().is_some()
    }

    /// The recorded failure, if any.
    fn error_message(&self) -> Option<&str> {
        self.state().error_message()
    }

    // ==================== Hooks (default no-ops) ====================

    /// Produce the request payload just before request assembly.
    fn prepare_request_payload(&mut self) -> Result<()> {
        Ok(())
    }

    /// Produce the response payload just before response assembly.
    fn prepare_response_payload(&mut self) -> Result<()> {
        Ok(())
    }

    /// Fired once just before a request transmission attempt.
    fn before_send_request(&mut self) {}

    /// Fired once just after a request transmission attempt; `error` is
    /// `None` on success.
    fn after_send_request(&mut self, _error: Option<&str>) {}

    /// Fired once just before a response transmission attempt.
    fn before_send_response(&mut self) {}

    /// Fired once just after a response transmission attempt; `error` is
    /// `None` on success.
    fn after_send_response(&mut self, _error: Option<&str>) {}

    // ==================== Execution ====================

    /// Execute the request side of the command.
    ///
    /// Base commands perform their action against the context and return
    /// an error string or `None`. Response-capable commands gather what
    /// their response needs, then delegate to
    /// [`send_response_via_connection`].
    fn handle_request(&mut self, ctx: &CommandContext) -> Option<String>;
}

/// Assemble the transmission string for the request side of a command.
///
/// Builds the header (`Command` = the command's own re-serialized
/// identifier and options, `Type` = `Request`), fires
/// `prepare_request_payload`, and encodes. Request payloads are never
/// compressed.
pub fn assemble_request(cmd: &mut dyn RemoteCommand) -> Result<String> {
    let mut header = Header::new();
    header.set_command(&cmd.command_line());
    header.set_message_type(MessageKind::Request);
    cmd.extend_header(&mut header);
    cmd.prepare_request_payload()?;
    let payload = cmd.state().request_payload().to_vec();
    Ok(flowlink_wire::encode(&header, &payload))
}

/// Assemble the transmission string for the response side of a command.
///
/// Clears any recorded error, builds the header with `Type` = `Response`,
/// fires `prepare_response_payload`, and gzip-compresses a non-empty
/// response payload before encoding.
///
/// # Panics
///
/// Panics if the command is still in request processing: assembling a
/// response for a request is a usage contract violation, not a wire-data
/// problem.
pub fn assemble_response(cmd: &mut dyn RemoteCommand) -> Result<String> {
    assert!(
        !cmd.is_request(),
        "assemble_response called on '{}' while still in request processing",
        cmd.name()
    );
    cmd.state_mut().clear_error_message();
    let mut header = Header::new();
    header.set_command(&cmd.command_line());
    header.set_message_type(MessageKind::Response);
    cmd.extend_header(&mut header);
    cmd.prepare_response_payload()?;
    let raw = cmd.state().response_payload();
    let payload = if raw.is_empty() {
        Vec::new()
    } else {
        flowlink_wire::compress(raw)?
    };
    Ok(flowlink_wire::encode(&header, &payload))
}

/// Request handling for response-capable commands: flip to response
/// processing, then hand the command to its configured connection.
///
/// The flip happens *before* the delegation so that nothing downstream
/// mistakes the object for a pending request. A transmission failure is
/// recorded on the command (`error_message`) and returned.
///
/// # Panics
///
/// Panics if no response connection has been configured, which is a
/// usage contract violation by the embedding application.
pub fn send_response_via_connection(cmd: &mut dyn RemoteCommand) -> Option<String> {
    let name = cmd.name();
    cmd.state_mut().set_request(false);
    let mut connection = match cmd.state_mut().take_response_connection() {
        Some(connection) => connection,
        None => panic!("response-capable command '{name}' has no response connection configured"),
    };
    let result = connection.send_response(cmd);
    cmd.state_mut().set_response_connection(connection);
    if let Some(err) = &result {
        cmd.state_mut().set_error_message(err);
    }
    result
}

/// Decode raw wire text into a fully configured command.
///
/// All failure paths (malformed envelope, missing `Command` key,
/// unknown identifier, option rejection, missing `Type`, undecodable
/// response payload) degrade to a logged diagnostic and `None`. Nothing
/// arriving from the wire can panic the caller.
pub fn parse_command(raw: &str, registry: &CommandRegistry) -> Option<Box<dyn RemoteCommand>> {
    let envelope = match flowlink_wire::decode(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!(target: "flowlink::commands", error = %e, "failed to decode message");
            return None;
        }
    };

    let command_line = match envelope.header.command() {
        Some(line) if !line.trim().is_empty() => line.to_string(),
        _ => {
            tracing::error!(
                target: "flowlink::commands",
                "message carries no '{}' header key", KEY_COMMAND
            );
            return None;
        }
    };

    let mut cmd = match registry.resolve(&command_line) {
        Ok(cmd) => cmd,
        Err(e) => {
            tracing::error!(
                target: "flowlink::commands",
                error = %e, command = %command_line, "failed to resolve command"
            );
            return None;
        }
    };

    if let Err(e) = cmd.parse(&envelope.header) {
        tracing::error!(
            target: "flowlink::commands",
            error = %e, command = cmd.name(), "failed to parse command header"
        );
        return None;
    }

    // Response payloads travel gzip-compressed; requests never do.
    let payload = if cmd.is_request() || envelope.payload.is_empty() {
        envelope.payload
    } else {
        match flowlink_wire::decompress(&envelope.payload) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    target: "flowlink::commands",
                    error = %e, command = cmd.name(), "failed to decompress response payload"
                );
                return None;
            }
        }
    };
    cmd.set_payload(payload);

    Some(cmd)
}

/// Convenience: the resolved flow serialized for a response payload.
pub(crate) fn flow_to_payload(flow: &Flow) -> Result<Vec<u8>> {
    serde_json::to_vec(flow).map_err(|e| Error::Serialization { reason: e.to_string() })
}
