//! End-to-end exercises: assembled requests travel through the
//! dispatcher against a live registry of running flows, and the replies
//! come back over a buffer connection.

use std::fs;
use std::sync::Arc;

use flowlink_commands::basic::{GetFlow, ListFlows, Ping, RestartFlow, StopFlow, SystemInfo};
use flowlink_commands::{
    assemble_request, default_registry, parse_command, BufferConnection, CommandRegistry,
    Connection, FlowAware, MessageBuffer, RemoteCommand, RequestHandler,
};
use flowlink_core::{Flow, FlowLoader, FlowRegistry, VAR_FLOW_FILE};
use flowlink_engine::{Dispatcher, FileFlowLoader, RunningFlows};

#[derive(Default)]
struct RecordingHandler {
    successes: Vec<String>,
    failures: Vec<(String, String)>,
}

impl RequestHandler for RecordingHandler {
    fn request_successful(&mut self, cmd: &dyn RemoteCommand) {
        self.successes.push(cmd.name().to_string());
    }

    fn request_failed(&mut self, cmd: &dyn RemoteCommand, reason: &str) {
        self.failures.push((cmd.name().to_string(), reason.to_string()));
    }
}

struct Rig {
    dispatcher: Dispatcher,
    flows: Arc<RunningFlows>,
    buffer: MessageBuffer,
    handler: RecordingHandler,
}

impl Rig {
    fn new() -> Rig {
        let flows = Arc::new(RunningFlows::new());
        Rig {
            dispatcher: Dispatcher::new(
                Arc::new(CommandRegistry::default()),
                flows.clone(),
                Arc::new(FileFlowLoader::new()),
            ),
            flows,
            buffer: MessageBuffer::new(),
            handler: RecordingHandler::default(),
        }
    }

    fn reply(&self) -> Box<dyn Connection> {
        Box::new(BufferConnection::new(self.buffer.clone()))
    }

    fn dispatch(&mut self, cmd: &mut dyn RemoteCommand) {
        let raw = assemble_request(cmd).unwrap();
        let reply = self.reply();
        self.dispatcher.dispatch_request(&raw, reply, &mut self.handler);
    }
}

/// Registers a flow whose definition lives in a real file on disk.
fn register_flow_from_file(rig: &Rig, dir: &tempfile::TempDir, name: &str, extra: &str) -> i64 {
    let path = dir.path().join(format!("{name}.flow"));
    fs::write(&path, format!("name={name}\n{extra}")).unwrap();
    let mut flow = FileFlowLoader::new().load(&path).unwrap();
    flow.apply_file_variables(&path);
    rig.flows.register(flow)
}

#[test]
fn test_ping_round_trip_through_dispatcher() {
    let mut rig = Rig::new();
    rig.dispatch(&mut Ping::new());

    assert_eq!(rig.handler.successes, vec![Ping::NAME]);
    let sent = rig.buffer.take();
    assert_eq!(sent.len(), 1);

    let response = parse_command(&sent[0], default_registry()).unwrap();
    assert_eq!(response.name(), Ping::NAME);
    assert!(!response.is_request());
    let text = String::from_utf8(response.payload().to_vec()).unwrap();
    assert!(text.starts_with("pong "), "unexpected payload: {text}");
}

#[test]
fn test_system_info_round_trip_through_dispatcher() {
    let mut rig = Rig::new();
    rig.dispatch(&mut SystemInfo::new());

    assert_eq!(rig.handler.successes, vec![SystemInfo::NAME]);
    let sent = rig.buffer.take();
    let response = parse_command(&sent[0], default_registry()).unwrap();
    let report = SystemInfo::parse_report(response.payload());
    let keys: Vec<&str> = report.iter().map(|(k, _)| k.as_str()).collect();
    assert!(keys.contains(&"os.name"));
    assert!(keys.contains(&"flowlink.version"));
}

#[test]
fn test_list_flows_round_trip_through_dispatcher() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    register_flow_from_file(&rig, &dir, "ingest", "rate=10\n");
    register_flow_from_file(&rig, &dir, "export", "");

    rig.dispatch(&mut ListFlows::new());
    assert_eq!(rig.handler.successes, vec![ListFlows::NAME]);

    let sent = rig.buffer.take();
    let response = parse_command(&sent[0], default_registry()).unwrap();
    let listing = ListFlows::parse_listing(response.payload()).unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].name, "ingest");
    assert!(listing[0].file.as_deref().unwrap().ends_with("ingest.flow"));
    assert_eq!(listing[1].name, "export");
}

#[test]
fn test_get_flow_targets_the_single_running_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    let id = register_flow_from_file(&rig, &dir, "ingest", "rate=10\n");

    // No -id option: exactly one flow is running, so -1 resolves to it.
    rig.dispatch(&mut GetFlow::new());
    assert_eq!(rig.handler.successes, vec![GetFlow::NAME]);

    let sent = rig.buffer.take();
    let response = parse_command(&sent[0], default_registry()).unwrap();
    let flow = GetFlow::parse_flow(response.payload()).unwrap();
    assert_eq!(flow.id(), id);
    assert_eq!(flow.name(), "ingest");
    assert_eq!(flow.variable("rate"), Some("10"));
}

#[test]
fn test_get_flow_fails_when_two_flows_run_untargeted() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    register_flow_from_file(&rig, &dir, "a", "");
    register_flow_from_file(&rig, &dir, "b", "");

    rig.dispatch(&mut GetFlow::new());
    assert!(rig.buffer.is_empty());
    assert_eq!(rig.handler.failures.len(), 1);
    let (name, reason) = &rig.handler.failures[0];
    assert_eq!(name, GetFlow::NAME);
    assert!(reason.contains("found 2"), "unexpected reason: {reason}");
}

#[test]
fn test_stop_flow_deregisters_the_targeted_flow() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    let keep = register_flow_from_file(&rig, &dir, "keep", "");
    let stop = register_flow_from_file(&rig, &dir, "stop", "");

    let mut cmd = StopFlow::new();
    cmd.set_flow_id(stop);
    rig.dispatch(&mut cmd);

    assert_eq!(rig.handler.successes, vec![StopFlow::NAME]);
    assert_eq!(rig.flows.running_count(), 1);
    assert!(rig.flows.flow(stop).is_none());
    assert!(rig.flows.flow(keep).is_some());
}

#[test]
fn test_stop_flow_unknown_id_reports_the_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    register_flow_from_file(&rig, &dir, "only", "");

    let mut cmd = StopFlow::new();
    cmd.set_flow_id(42);
    rig.dispatch(&mut cmd);

    assert_eq!(rig.flows.running_count(), 1);
    assert_eq!(rig.handler.failures.len(), 1);
    assert!(rig.handler.failures[0].1.contains("42"));
}

#[test]
fn test_restart_flow_reloads_the_definition_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    let id = register_flow_from_file(&rig, &dir, "ingest", "rate=10\n");

    // The definition changes on disk while the flow is running.
    let path = dir.path().join("ingest.flow");
    fs::write(&path, "name=ingest\nrate=50\n").unwrap();

    let mut cmd = RestartFlow::new();
    cmd.set_flow_id(id);
    rig.dispatch(&mut cmd);

    assert_eq!(rig.handler.successes, vec![RestartFlow::NAME]);
    let reloaded = rig.flows.flow(id).unwrap();
    assert_eq!(reloaded.id(), id);
    assert_eq!(reloaded.variable("rate"), Some("50"));
    assert_eq!(reloaded.variable(VAR_FLOW_FILE), Some(path.display().to_string().as_str()));
}

#[test]
fn test_restart_flow_without_file_variable_keeps_the_old_instance() {
    let mut rig = Rig::new();
    let id = rig.flows.register(Flow::new("inmemory"));

    let mut cmd = RestartFlow::new();
    cmd.set_flow_id(id);
    rig.dispatch(&mut cmd);

    assert_eq!(rig.handler.failures.len(), 1);
    assert!(rig.handler.failures[0].1.contains(VAR_FLOW_FILE));
    // The running instance is untouched.
    assert_eq!(rig.flows.flow(id).unwrap().name(), "inmemory");
}

#[test]
fn test_restart_flow_with_unparseable_file_keeps_the_old_instance() {
    let dir = tempfile::tempdir().unwrap();
    let mut rig = Rig::new();
    let id = register_flow_from_file(&rig, &dir, "ingest", "rate=10\n");

    let path = dir.path().join("ingest.flow");
    fs::write(&path, "name=ingest\nbroken line without a separator\n").unwrap();

    let mut cmd = RestartFlow::new();
    cmd.set_flow_id(id);
    rig.dispatch(&mut cmd);

    assert_eq!(rig.handler.failures.len(), 1);
    let kept = rig.flows.flow(id).unwrap();
    assert_eq!(kept.variable("rate"), Some("10"));
}
