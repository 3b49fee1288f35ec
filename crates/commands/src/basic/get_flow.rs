//! Retrieve a running flow's definition.

use std::sync::Arc;

use flowlink_core::{Error, Flow, Result};

use crate::command::{send_response_via_connection, CommandContext, CommandState, RemoteCommand};
use crate::targeting::{FlowAware, FlowTarget};

/// Ships the targeted flow back to the requester.
///
/// Flow-targeting and response-capable; the response payload is the
/// JSON-serialized [`Flow`].
#[derive(Default)]
pub struct GetFlow {
    state: CommandState,
    target: FlowTarget,
    resolved: Option<Arc<Flow>>,
}

impl GetFlow {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.GetFlow";

    /// A fresh request targeting the single running flow.
    pub fn new() -> GetFlow {
        GetFlow::default()
    }

    /// Parse a received flow (sender side).
    pub fn parse_flow(payload: &[u8]) -> Result<Flow> {
        serde_json::from_slice(payload).map_err(|e| Error::Serialization { reason: e.to_string() })
    }
}

impl FlowAware for GetFlow {
    fn flow_id(&self) -> i64 {
        self.target.id()
    }

    fn set_flow_id(&mut self, id: i64) {
        self.target.set_id(id);
    }
}

impl RemoteCommand for GetFlow {
    fn name(&self) -> &'static str {
        GetFlow::NAME
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
        self.target.parse_options(opts, GetFlow::NAME)
    }

    fn prepare_response_payload(&mut self) -> Result<()> {
        // Usage contract: the response is only assembled after
        // handle_request resolved a flow.
        let Some(flow) = &self.resolved else {
            panic!("'{}' response assembled before a flow was resolved", GetFlow::NAME);
        };
        let body = crate::command::flow_to_payload(flow)?;
        self.state.set_response_payload(body);
        Ok(())
    }

    fn handle_request(&mut self, ctx: &CommandContext) -> Option<String> {
        match self.target.resolve(ctx.flows.as_ref()) {
            Ok(flow) => {
                self.resolved = Some(flow);
                send_response_via_connection(self)
            }
            Err(e) => {
                let message = e.to_string();
                self.state.set_error_message(&message);
                Some(message)
            }
        }
    }
}
