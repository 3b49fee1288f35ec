//! Whole-protocol round trips through the facade crate: sender
//! assembles, text crosses a (simulated) transport, receiver dispatches,
//! and the sender decodes the reply.

use std::fs;
use std::sync::Arc;

use flowlink::{
    assemble_request, default_registry, parse_command, BufferConnection, CommandRegistry,
    Dispatcher, FileFlowLoader, FlowAware, FlowLoader, FlowRegistry, GetFlow, ListFlows,
    LoggingRequestHandler, MessageBuffer, Ping, RemoteCommand, RestartFlow, ResponseHandler,
    RunningFlows, StopFlow, COMMENT_MARKER, WRAP_COLUMNS,
};

fn rig() -> (Dispatcher, Arc<RunningFlows>, MessageBuffer) {
    let flows = Arc::new(RunningFlows::new());
    let dispatcher = Dispatcher::new(
        Arc::new(CommandRegistry::default()),
        flows.clone(),
        Arc::new(FileFlowLoader::new()),
    );
    (dispatcher, flows, MessageBuffer::new())
}

fn send(dispatcher: &Dispatcher, replies: &MessageBuffer, cmd: &mut dyn RemoteCommand) {
    let raw = assemble_request(cmd).unwrap();
    dispatcher.dispatch_request(
        &raw,
        Box::new(BufferConnection::new(replies.clone())),
        &mut LoggingRequestHandler,
    );
}

fn start_flow(flows: &RunningFlows, dir: &tempfile::TempDir, name: &str, body: &str) -> i64 {
    let path = dir.path().join(format!("{name}.flow"));
    fs::write(&path, format!("name={name}\n{body}")).unwrap();
    let mut flow = FileFlowLoader::new().load(&path).unwrap();
    flow.apply_file_variables(&path);
    flows.register(flow)
}

#[test]
fn test_ping_pong() {
    let (dispatcher, _flows, replies) = rig();
    send(&dispatcher, &replies, &mut Ping::new());

    let sent = replies.take();
    assert_eq!(sent.len(), 1);
    let pong = parse_command(&sent[0], default_registry()).unwrap();
    assert!(!pong.is_request());
    let report = String::from_utf8(pong.payload().to_vec()).unwrap();
    assert!(report.starts_with("pong "));
}

#[test]
fn test_full_flow_management_session() {
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, flows, replies) = rig();
    let ingest = start_flow(&flows, &dir, "ingest", "rate=10\n");
    let export = start_flow(&flows, &dir, "export", "target=s3\n");

    // List both running flows.
    send(&dispatcher, &replies, &mut ListFlows::new());
    let response = parse_command(&replies.take()[0], default_registry()).unwrap();
    let listing = ListFlows::parse_listing(response.payload()).unwrap();
    assert_eq!(listing.len(), 2);

    // Fetch one definition by id.
    let mut get = GetFlow::new();
    get.set_flow_id(export);
    send(&dispatcher, &replies, &mut get);
    let response = parse_command(&replies.take()[0], default_registry()).unwrap();
    let flow = GetFlow::parse_flow(response.payload()).unwrap();
    assert_eq!(flow.name(), "export");
    assert_eq!(flow.variable("target"), Some("s3"));

    // Change the definition on disk and restart the flow.
    fs::write(dir.path().join("export.flow"), "name=export\ntarget=gcs\n").unwrap();
    let mut restart = RestartFlow::new();
    restart.set_flow_id(export);
    send(&dispatcher, &replies, &mut restart);
    assert_eq!(flows.flow(export).unwrap().variable("target"), Some("gcs"));

    // Stop it; only the other flow remains.
    let mut stop = StopFlow::new();
    stop.set_flow_id(export);
    send(&dispatcher, &replies, &mut stop);
    assert_eq!(flows.running_count(), 1);
    assert!(flows.flow(ingest).is_some());
}

#[test]
fn test_wire_text_is_line_oriented_and_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, flows, replies) = rig();
    for i in 0..5 {
        start_flow(&flows, &dir, &format!("flow-{i}"), "padding=0123456789\n");
    }

    send(&dispatcher, &replies, &mut ListFlows::new());
    let raw = replies.take().remove(0);

    let mut in_header = true;
    for line in raw.lines() {
        if in_header && !line.starts_with(COMMENT_MARKER) {
            in_header = false;
        }
        if !in_header {
            assert!(line.len() <= WRAP_COLUMNS, "overlong body line: {line}");
        }
    }
}

#[test]
fn test_sender_sees_resolution_failure_reports() {
    // Two flows running, untargeted request: no response is produced and
    // the failure is observable on the receiving side only.
    let dir = tempfile::tempdir().unwrap();
    let (dispatcher, flows, replies) = rig();
    start_flow(&flows, &dir, "a", "");
    start_flow(&flows, &dir, "b", "");

    struct Tally(Vec<String>);
    impl ResponseHandler for Tally {
        fn response_successful(&mut self, cmd: &dyn RemoteCommand) {
            self.0.push(format!("ok:{}", cmd.name()));
        }
        fn response_failed(&mut self, reason: &str) {
            self.0.push(format!("err:{reason}"));
        }
    }

    send(&dispatcher, &replies, &mut GetFlow::new());
    assert!(replies.is_empty());

    // Feeding garbage into the response path reports, never panics.
    let mut tally = Tally(Vec::new());
    dispatcher.dispatch_response("complete garbage", &mut tally);
    assert_eq!(tally.0, vec!["err:undecodable response message"]);
}
