//! Flow definition files on disk.
//!
//! The on-disk format is deliberately plain: one `key=value` per line,
//! `#` comment lines and blank lines ignored. The `name` key names the
//! flow; every other key becomes a flow variable. A file without a
//! `name` key falls back to its file stem.

use std::fs;
use std::path::Path;

use tracing::debug;

use flowlink_core::{Error, Flow, FlowLoader, Result};

/// Loads [`Flow`] definitions from `key=value` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFlowLoader;

impl FileFlowLoader {
    pub fn new() -> FileFlowLoader {
        FileFlowLoader
    }
}

impl FlowLoader for FileFlowLoader {
    fn load(&self, path: &Path) -> Result<Flow> {
        let text = fs::read_to_string(path).map_err(|e| Error::FlowLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut name: Option<String> = None;
        let mut variables: Vec<(String, String)> = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::FlowLoad {
                    path: path.display().to_string(),
                    reason: format!("line {}: expected key=value, got '{line}'", lineno + 1),
                });
            };
            let key = key.trim();
            let value = value.trim();
            if key == "name" {
                name = Some(value.to_string());
            } else {
                variables.push((key.to_string(), value.to_string()));
            }
        }

        let name = name.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string()
        });
        let mut flow = Flow::new(&name);
        for (key, value) in &variables {
            flow.set_variable(key, value);
        }
        debug!(target: "flowlink::flow", path = %path.display(), name = flow.name(), "flow loaded");
        Ok(flow)
    }
}
