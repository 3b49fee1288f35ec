//! Flow targeting: which running workflow does a command apply to.
//!
//! Commands that operate against a specific flow embed a [`FlowTarget`]
//! and expose it through [`FlowAware`]. Resolution policy:
//!
//! - id `-1` (the default): the registry must report exactly one running
//!   flow; any other count fails with an error naming that count, so the
//!   caller can diagnose which `-id` to pass.
//! - id `>= 0`: exact lookup; absence fails with an error naming the id.
//!
//! The optional reload step re-parses the resolved flow from its source
//! file; a fresh instance replaces the live one on success, and on any
//! failure the live instance is discarded from the result (the caller
//! gets an error, never a half-reloaded flow).

use std::path::PathBuf;
use std::sync::Arc;

use flowlink_core::{Error, Flow, FlowLoader, FlowRegistry, Result, VAR_FLOW_FILE};

/// The id value meaning "the single running flow".
pub const UNSPECIFIED_FLOW_ID: i64 = -1;

/// Identifier access for commands that target a flow.
pub trait FlowAware {
    /// The targeted flow id, [`UNSPECIFIED_FLOW_ID`] when not set.
    fn flow_id(&self) -> i64;

    /// Set the targeted flow id.
    fn set_flow_id(&mut self, id: i64);
}

/// The targeting capability commands embed: an id plus the `-id` flag
/// parsing/formatting and the resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowTarget {
    id: i64,
}

impl Default for FlowTarget {
    fn default() -> FlowTarget {
        FlowTarget { id: UNSPECIFIED_FLOW_ID }
    }
}

impl FlowTarget {
    /// Target a specific flow id.
    pub fn new(id: i64) -> FlowTarget {
        FlowTarget { id }
    }

    /// The targeted id.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Set the targeted id.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// Parse the `-id <n>` flag out of a variant's options. Anything
    /// else is rejected on behalf of `command`.
    pub fn parse_options(&mut self, opts: &[String], command: &str) -> Result<()> {
        let mut iter = opts.iter();
        while let Some(opt) = iter.next() {
            if opt == "-id" {
                let value = iter.next().ok_or_else(|| Error::InvalidOption {
                    command: command.to_string(),
                    reason: "-id requires a value".to_string(),
                })?;
                self.id = value.parse().map_err(|_| Error::InvalidOption {
                    command: command.to_string(),
                    reason: format!("invalid -id value: {value}"),
                })?;
            } else {
                return Err(Error::InvalidOption {
                    command: command.to_string(),
                    reason: format!("unknown option: {opt}"),
                });
            }
        }
        Ok(())
    }

    /// Re-serialize the flag; empty when the id is unspecified.
    pub fn options(&self) -> Vec<String> {
        if self.id == UNSPECIFIED_FLOW_ID {
            Vec::new()
        } else {
            vec!["-id".to_string(), self.id.to_string()]
        }
    }

    /// Resolve the targeted flow against the registry.
    ///
    /// Failures are returned and also logged at error level; nothing here
    /// panics.
    pub fn resolve(&self, flows: &dyn FlowRegistry) -> Result<Arc<Flow>> {
        let result = if self.id == UNSPECIFIED_FLOW_ID {
            let running = flows.flows();
            match running.len() {
                1 => Ok(running[0].clone()),
                count => Err(Error::FlowCountMismatch { count }),
            }
        } else {
            flows.flow(self.id).ok_or(Error::FlowNotFound { id: self.id })
        };
        if let Err(e) = &result {
            tracing::error!(target: "flowlink::flow", error = %e, id = self.id, "flow resolution failed");
        }
        result
    }

    /// Resolve, then re-parse the flow from its recorded source file.
    ///
    /// The fresh instance keeps the live flow's id and gets the standard
    /// file-derived variables re-applied before it is returned in place
    /// of the live one.
    pub fn resolve_fresh(
        &self,
        flows: &dyn FlowRegistry,
        loader: &dyn FlowLoader,
    ) -> Result<Flow> {
        let live = self.resolve(flows)?;
        let result = reload(&live, loader);
        if let Err(e) = &result {
            tracing::error!(target: "flowlink::flow", error = %e, id = live.id(), "flow reload failed");
        }
        result
    }
}

fn reload(live: &Flow, loader: &dyn FlowLoader) -> Result<Flow> {
    let path = live
        .variable(VAR_FLOW_FILE)
        .map(PathBuf::from)
        .ok_or_else(|| Error::MissingFlowFile { variable: VAR_FLOW_FILE.to_string() })?;
    if !path.is_file() {
        return Err(Error::FlowFileMissing { path: path.display().to_string() });
    }
    let mut fresh = loader.load(&path)?;
    fresh.set_id(live.id());
    fresh.apply_file_variables(&path);
    Ok(fresh)
}
