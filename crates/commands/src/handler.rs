//! Bookkeeping collaborators notified once per message.

use crate::command::RemoteCommand;

/// Informed exactly once per handled request.
pub trait RequestHandler: Send {
    /// The request executed without error.
    fn request_successful(&mut self, cmd: &dyn RemoteCommand);

    /// The request executed but reported a failure.
    fn request_failed(&mut self, cmd: &dyn RemoteCommand, reason: &str);
}

/// Informed exactly once per received response.
pub trait ResponseHandler: Send {
    /// The response decoded successfully.
    fn response_successful(&mut self, cmd: &dyn RemoteCommand);

    /// The raw text could not be decoded into a response.
    fn response_failed(&mut self, reason: &str);
}

/// Default request bookkeeping: a log line per outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingRequestHandler;

impl RequestHandler for LoggingRequestHandler {
    fn request_successful(&mut self, cmd: &dyn RemoteCommand) {
        tracing::debug!(target: "flowlink::engine", command = cmd.name(), "request handled");
    }

    fn request_failed(&mut self, cmd: &dyn RemoteCommand, reason: &str) {
        tracing::error!(target: "flowlink::engine", command = cmd.name(), reason, "request failed");
    }
}

/// Default response bookkeeping: a log line per outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingResponseHandler;

impl ResponseHandler for LoggingResponseHandler {
    fn response_successful(&mut self, cmd: &dyn RemoteCommand) {
        tracing::debug!(target: "flowlink::engine", command = cmd.name(), "response received");
    }

    fn response_failed(&mut self, reason: &str) {
        tracing::error!(target: "flowlink::engine", reason, "response undecodable");
    }
}
