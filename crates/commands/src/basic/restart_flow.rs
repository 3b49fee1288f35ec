//! Restart a running flow from its source file.

use flowlink_core::Result;

use crate::command::{CommandContext, CommandState, RemoteCommand};
use crate::targeting::{FlowAware, FlowTarget};

/// Re-parses the targeted flow from its recorded source file and swaps
/// the fresh instance into the registry.
///
/// Flow-targeting; produces no response. Requires the flow to carry the
/// well-known source-file variable; a flow that never came from disk
/// cannot be restarted this way.
#[derive(Default)]
pub struct RestartFlow {
    state: CommandState,
    target: FlowTarget,
}

impl RestartFlow {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.RestartFlow";

    /// A fresh command targeting the single running flow.
    pub fn new() -> RestartFlow {
        RestartFlow::default()
    }
}

impl FlowAware for RestartFlow {
    fn flow_id(&self) -> i64 {
        self.target.id()
    }

    fn set_flow_id(&mut self, id: i64) {
        self.target.set_id(id);
    }
}

impl RemoteCommand for RestartFlow {
    fn name(&self) -> &'static str {
        RestartFlow::NAME
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
        self.target.parse_options(opts, RestartFlow::NAME)
    }

    fn handle_request(&mut self, ctx: &CommandContext) -> Option<String> {
        let fresh = match self
            .target
            .resolve_fresh(ctx.flows.as_ref(), ctx.loader.as_ref())
        {
            Ok(fresh) => fresh,
            Err(e) => {
                let message = e.to_string();
                self.state.set_error_message(&message);
                return Some(message);
            }
        };

        let id = fresh.id();
        if ctx.flows.replace(id, fresh) {
            tracing::info!(target: "flowlink::flow", id, "restarted flow from disk");
            None
        } else {
            let message = format!("flow {id} disappeared during restart");
            self.state.set_error_message(&message);
            Some(message)
        }
    }
}
