//! Host environment report.

use flowlink_core::Result;

use crate::command::{send_response_via_connection, CommandContext, CommandState, RemoteCommand};

/// Reports the responder's host environment.
///
/// Response-capable; the response payload is a `key=value` block, one
/// property per line.
#[derive(Default)]
pub struct SystemInfo {
    state: CommandState,
}

impl SystemInfo {
    /// The wire identifier.
    pub const NAME: &'static str = "flowlink.basic.SystemInfo";

    /// A fresh request.
    pub fn new() -> SystemInfo {
        SystemInfo::default()
    }

    /// Parse a received report back into key/value pairs (sender side).
    pub fn parse_report(payload: &[u8]) -> Vec<(String, String)> {
        String::from_utf8_lossy(payload)
            .lines()
            .filter_map(|line| {
                line.split_once('=')
                    .map(|(k, v)| (k.to_string(), v.to_string()))
            })
            .collect()
    }
}

impl RemoteCommand for SystemInfo {
    fn name(&self) -> &'static str {
        SystemInfo::NAME
    }

    fn state(&self) -> &CommandState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut CommandState {
        &mut self.state
    }

    fn prepare_response_payload(&mut self) -> Result<()> {
        let mut props = vec![
            ("os.name".to_string(), std::env::consts::OS.to_string()),
            ("os.arch".to_string(), std::env::consts::ARCH.to_string()),
            ("os.family".to_string(), std::env::consts::FAMILY.to_string()),
            (
                "flowlink.version".to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            ),
        ];
        if let Ok(cpus) = std::thread::available_parallelism() {
            props.push(("cpu.count".to_string(), cpus.get().to_string()));
        }
        if let Ok(dir) = std::env::current_dir() {
            props.push(("user.dir".to_string(), dir.display().to_string()));
        }

        let mut body = String::new();
        for (key, value) in &props {
            body.push_str(key);
            body.push('=');
            body.push_str(value);
            body.push('\n');
        }
        self.state.set_response_payload(body.into_bytes());
        Ok(())
    }

    fn handle_request(&mut self, _ctx: &CommandContext) -> Option<String> {
        send_response_via_connection(self)
    }
}
