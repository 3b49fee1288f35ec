//! In-process implementation of the running-flow registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use flowlink_core::{Flow, FlowRegistry};

/// Tracks the flows currently executing in this process.
///
/// Ids are assigned monotonically and never reused, so a stale id from a
/// stopped flow can never accidentally address a later one.
#[derive(Default)]
pub struct RunningFlows {
    flows: RwLock<HashMap<i64, Arc<Flow>>>,
    next_id: AtomicI64,
}

impl RunningFlows {
    pub fn new() -> RunningFlows {
        RunningFlows::default()
    }
}

impl FlowRegistry for RunningFlows {
    fn running_count(&self) -> usize {
        self.flows.read().len()
    }

    fn flows(&self) -> Vec<Arc<Flow>> {
        let mut flows: Vec<Arc<Flow>> = self.flows.read().values().cloned().collect();
        flows.sort_by_key(|f| f.id());
        flows
    }

    fn flow(&self, id: i64) -> Option<Arc<Flow>> {
        self.flows.read().get(&id).cloned()
    }

    fn register(&self, mut flow: Flow) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        flow.set_id(id);
        debug!(target: "flowlink::flow", id, name = flow.name(), "flow registered");
        self.flows.write().insert(id, Arc::new(flow));
        id
    }

    fn deregister(&self, id: i64) -> bool {
        let removed = self.flows.write().remove(&id).is_some();
        if removed {
            debug!(target: "flowlink::flow", id, "flow deregistered");
        }
        removed
    }

    fn replace(&self, id: i64, mut flow: Flow) -> bool {
        flow.set_id(id);
        let mut flows = self.flows.write();
        if !flows.contains_key(&id) {
            return false;
        }
        flows.insert(id, Arc::new(flow));
        debug!(target: "flowlink::flow", id, "flow replaced");
        true
    }
}
