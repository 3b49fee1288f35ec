//! The workflow engine as seen by the protocol.
//!
//! Flows execute elsewhere; commands only ever see them through the
//! [`FlowRegistry`] collaborator. The registry has an explicit lifecycle:
//! flows are registered when they start and deregistered when they stop.
//! [`FlowLoader`] covers the one disk-touching operation the protocol
//! needs: re-parsing a flow from its source file during a reload.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Well-known variable holding the flow's source file (full path).
pub const VAR_FLOW_FILE: &str = "flow.file";

/// Well-known variable holding the directory of the flow's source file.
pub const VAR_FLOW_DIR: &str = "flow.dir";

/// Well-known variable holding the file stem of the flow's source file.
pub const VAR_FLOW_NAME: &str = "flow.name";

/// A running workflow instance, as far as the protocol is concerned:
/// an id, a name, and a variable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    id: i64,
    name: String,
    variables: BTreeMap<String, String>,
}

impl Flow {
    /// Create a flow that has not been registered yet (id `-1`).
    pub fn new(name: &str) -> Flow {
        Flow {
            id: -1,
            name: name.to_string(),
            variables: BTreeMap::new(),
        }
    }

    /// The registry-assigned id, `-1` before registration.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Assign the registry id.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// The flow's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a variable.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Set a variable.
    pub fn set_variable(&mut self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    /// All variables, sorted by name.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Apply the standard file-derived variables (`flow.file`, `flow.dir`,
    /// `flow.name`) from the given source file path.
    pub fn apply_file_variables(&mut self, path: &Path) {
        self.set_variable(VAR_FLOW_FILE, &path.display().to_string());
        if let Some(dir) = path.parent() {
            self.set_variable(VAR_FLOW_DIR, &dir.display().to_string());
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            self.set_variable(VAR_FLOW_NAME, stem);
        }
    }
}

/// Registry of currently running flows.
///
/// Thread safety: all methods must be safe to call concurrently.
/// Implementations must not invoke blocking operations while holding
/// internal locks, since commands resolve flows on transport threads.
pub trait FlowRegistry: Send + Sync {
    /// Number of currently running flows.
    fn running_count(&self) -> usize;

    /// Snapshot of all running flows.
    fn flows(&self) -> Vec<Arc<Flow>>;

    /// Look up a flow by id.
    fn flow(&self, id: i64) -> Option<Arc<Flow>>;

    /// Register a starting flow; the registry assigns and returns its id.
    fn register(&self, flow: Flow) -> i64;

    /// Deregister a stopped flow. Returns whether the id was known.
    fn deregister(&self, id: i64) -> bool;

    /// Replace the in-memory instance for a registered id (used by
    /// reload-from-disk). Returns whether the id was known.
    fn replace(&self, id: i64, flow: Flow) -> bool;
}

/// Parses a fresh [`Flow`] from its source file.
pub trait FlowLoader: Send + Sync {
    /// Load the flow definition at `path`.
    fn load(&self, path: &Path) -> Result<Flow>;
}
