//! Execution side of the protocol: the in-process registry of running
//! flows, a loader that parses flow definition files from disk, and the
//! dispatcher that routes decoded messages to their handlers.
//!
//! The dispatcher sits at the receiving end of a transport. Whatever
//! carries the text (a socket, a file drop, a test buffer) hands each
//! complete message to [`Dispatcher::dispatch_request`] or
//! [`Dispatcher::dispatch_response`]; everything from decoding to
//! handler callbacks happens here.

mod dispatcher;
mod loader;
mod running_flows;

pub use dispatcher::Dispatcher;
pub use loader::FileFlowLoader;
pub use running_flows::RunningFlows;
