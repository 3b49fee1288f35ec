//! The built-in command variants.
//!
//! Every operation the protocol supports out of the box lives here; the
//! set is closed and registered explicitly by
//! [`CommandRegistry::with_builtins`](crate::CommandRegistry::with_builtins).

mod get_flow;
mod list_flows;
mod ping;
mod restart_flow;
mod stop_flow;
mod system_info;

pub use get_flow::GetFlow;
pub use list_flows::{FlowSummary, ListFlows};
pub use ping::Ping;
pub use restart_flow::RestartFlow;
pub use stop_flow::StopFlow;
pub use system_info::SystemInfo;

use crate::command::RemoteCommand;
use crate::registry::CommandFactory;

/// Factories for the built-in variants, in registration order.
pub(crate) fn builtins() -> Vec<CommandFactory> {
    vec![
        || Box::new(Ping::new()) as Box<dyn RemoteCommand>,
        || Box::new(SystemInfo::new()) as Box<dyn RemoteCommand>,
        || Box::new(ListFlows::new()) as Box<dyn RemoteCommand>,
        || Box::new(GetFlow::new()) as Box<dyn RemoteCommand>,
        || Box::new(StopFlow::new()) as Box<dyn RemoteCommand>,
        || Box::new(RestartFlow::new()) as Box<dyn RemoteCommand>,
    ]
}
