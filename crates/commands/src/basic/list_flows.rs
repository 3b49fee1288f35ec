//! Inventory of currently running flows.

use serde::{Deserialize, Serialize};

use flowlink_core::{Error, Result, VAR_FLOW_FILE};

use crate::command::{send_response_via_connection, CommandContext, CommandState, RemoteCommand};

/// One row of a [`ListFlows`] response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Registry id of the flow.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Source file, when the flow knows it.
    pub file: Option<String>,
}

/// Lists the flows currently registered as running.
///
/// Response-capable; the response payload is the JSON-serialized list of
/// [`FlowSummary`] rows, ordered by id.
#[derive(Default)]
pub struct ListFlows {
    state: CommandState,
    listing: Vec<FlowSummary>,
}

impl ListFlows {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.ListFlows";

    /// A fresh request.
    pub fn new() -> ListFlows {
        ListFlows::default()
    }

    /// Parse a received listing (sender side).
    pub fn parse_listing(payload: &[u8]) -> Result<Vec<FlowSummary>> {
        serde_json::from_slice(payload).map_err(|e| Error::Serialization { reason: e.to_string() })
    }
}

impl RemoteCommand for ListFlows {
    fn name(&self) -> &'static str {
        ListFlows::NAME
    }

    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn prepare_response_payload(&mut self) -> Result<()> {
        let body = serde_json::to_vec(&self.listing)
            .map_err(|e| Error::Serialization { reason: e.to_string() })?;
        self.state.set_response_payload(body);
        Ok(())
    }

    fn handle_request(&mut self, ctx: &CommandContext) -> Option<String> {
        let mut listing: Vec<FlowSummary> = ctx
            .flows
            .flows()
            .iter()
            .map(|flow| FlowSummary {
                id: flow.id(),
                name: flow.name().to_string(),
                file: flow.variable(VAR_FLOW_FILE).map(str::to_string),
            })
            .collect();
        listing.sort_by_key(|row| row.id);
        self.listing = listing;
        send_response_via_connection(self)
    }
}
