//! Stop a running flow.

use flowlink_core::Result;

use crate::command::{CommandContext, CommandState, RemoteCommand};
use crate::targeting::{FlowAware, FlowTarget};

/// Stops the targeted flow and deregisters it.
///
/// Flow-targeting; produces no response; the outcome is reported to the
/// request handler and, on failure, recorded in `error_message`.
#[derive(Default)]
pub struct StopFlow {
    state: CommandState,
    target: FlowTarget,
}

impl StopFlow {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.StopFlow";

    /// A fresh command targeting the single running flow.
    pub fn new() -> StopFlow {
        StopFlow::default()
    }
}

impl FlowAware for StopFlow {
    fn flow_id(&self) -> i64 {
        self.target.id()
    }

    fn set_flow_id(&mut self, id: i64) {
        self.target.set_id(id);
    }
}

impl RemoteCommand for StopFlow {
    fn name(&self) -> &'static str {
        StopFlow::NAME
    }

    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn options(&self) -> Vec<String> {
        self.target.options()
    }

    fn parse_options(&mut self, opts: &[String]) -> Result<()> {
        self.target.parse_options(opts, StopFlow::NAME)
    }

    fn handle_request(&mut self, ctx: &CommandContext) -> Option<String> {
        let flow = match self.target.resolve(ctx.flows.as_ref()) {
            Ok(flow) => flow,
            Err(e) => {
                let message = e.to_string();
                self.state.set_error_message(&message);
                return Some(message);
            }
        };

        if ctx.flows.deregister(flow.id()) {
            tracing::info!(target: "flowlink::flow", id = flow.id(), name = flow.name(), "stopped flow");
            None
        } else {
            // Raced with an external stop between resolution and removal.
            let message = format!("flow {} already deregistered", flow.id());
            self.state.set_error_message(&message);
            Some(message)
        }
    }
}
