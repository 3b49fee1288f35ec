//! Routes raw wire text to command execution and handler callbacks.

use std::any::Any;
use std::sync::Arc;

use tracing::error;

use flowlink_commands::{
    parse_command, CommandContext, CommandRegistry, Connection, RequestHandler, ResponseHandler,
};
use flowlink_core::{FlowLoader, FlowRegistry};

/// Receiving end of the protocol.
///
/// A transport hands each complete message here; the dispatcher decodes
/// it, executes the request side, and notifies the handler exactly once.
/// Undecodable text never reaches a handler's success path: the command
/// layer has already logged the failure and the message is dropped (or,
/// for responses, reported through
/// [`ResponseHandler::response_failed`]).
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    context: CommandContext,
    application: Option<Arc<dyn Any + Send + Sync>>,
}

impl Dispatcher {
    /// A dispatcher executing against the given flow registry and loader.
    pub fn new(
        registry: Arc<CommandRegistry>,
        flows: Arc<dyn FlowRegistry>,
        loader: Arc<dyn FlowLoader>,
    ) -> Dispatcher {
        Dispatcher {
            registry,
            context: CommandContext::new(flows, loader),
            application: None,
        }
    }

    /// Attach an opaque application handle that every dispatched command
    /// receives in its state.
    pub fn with_application(mut self, application: Arc<dyn Any + Send + Sync>) -> Dispatcher {
        self.application = Some(application);
        self
    }

    /// The command registry messages resolve against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Decode and execute an incoming request.
    ///
    /// `reply` is the channel a response-capable command sends its
    /// response back over. The handler is notified exactly once; text
    /// that does not decode into a request is dropped without a callback.
    pub fn dispatch_request(
        &self,
        raw: &str,
        reply: Box<dyn Connection>,
        handler: &mut dyn RequestHandler,
    ) {
        let Some(mut cmd) = parse_command(raw, &self.registry) else {
            return;
        };
        if !cmd.is_request() {
            handler.request_failed(cmd.as_ref(), "message is not a request");
            return;
        }
        cmd.state_mut().set_application_context(self.application.clone());
        cmd.state_mut().set_response_connection(reply);
        match cmd.handle_request(&self.context) {
            None => handler.request_successful(cmd.as_ref()),
            Some(reason) => handler.request_failed(cmd.as_ref(), &reason),
        }
    }

    /// Decode an incoming response and hand it to the handler.
    pub fn dispatch_response(&self, raw: &str, handler: &mut dyn ResponseHandler) {
        let Some(cmd) = parse_command(raw, &self.registry) else {
            handler.response_failed("undecodable response message");
            return;
        };
        if cmd.is_request() {
            error!(target: "flowlink::engine", command = cmd.name(), "request arrived on the response path");
            handler.response_failed("message is not a response");
            return;
        }
        handler.response_successful(cmd.as_ref());
    }
}
