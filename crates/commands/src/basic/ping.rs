//! Liveness probe.

use std::time::{SystemTime, UNIX_EPOCH};

use flowlink_core::Result;

use crate::command::{send_response_via_connection, CommandContext, CommandState, RemoteCommand};

/// Checks that the remote engine is alive.
///
/// Response-capable; the response payload is a one-line report carrying
/// the responder's version and clock (epoch milliseconds).
#[derive(Default)]
pub struct Ping {
    state: CommandState,
}

impl Ping {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.Ping";

    /// A fresh ping.
    pub fn new() -> Ping {
        Ping::default()
    }
}

impl RemoteCommand for Ping {
    fn name(&self) -> &'static str {
        Ping::NAME
    }

    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn prepare_response_payload(&mut self) -> Result<()> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let body = format!("pong {} {}", env!("CARGO_PKG_VERSION"), millis);
        self.state.set_response_payload(body.into_bytes());
        Ok(())
    }

    fn handle_request(&mut self, _ctx: &CommandContext) -> Option<String> {
        send_response_via_connection(self)
    }
}
