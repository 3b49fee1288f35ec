//! How assembled commands leave the process.
//!
//! The inbound transport and the response path are independent: a request
//! can arrive over one connection and its response leave over another.
//! Framing, pooling and backpressure are the transport's concern; a
//! `Connection` only ever sees one whole command at a time.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::command::{assemble_request, assemble_response, RemoteCommand};

/// Transmits assembled commands.
///
/// `send_request`/`send_response` are template methods: they fire the
/// command's before/after hooks exactly once per attempt around the
/// actual transmission, which implementations supply via
/// `do_send_request`/`do_send_response`. Errors are returned as strings,
/// never thrown.
pub trait Connection: Send {
    /// Transmit the request side of a command. `None` on success.
    fn do_send_request(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String>;

    /// Transmit the response side of a command. `None` on success.
    fn do_send_response(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String>;

    /// Transmit a request, firing `before_send_request` /
    /// `after_send_request` around the attempt.
    fn send_request(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String> {
        cmd.before_send_request();
        let result = self.do_send_request(cmd);
        cmd.after_send_request(result.as_deref());
        result
    }

    /// Transmit a response, firing `before_send_response` /
    /// `after_send_response` around the attempt.
    fn send_response(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String> {
        cmd.before_send_response();
        let result = self.do_send_response(cmd);
        cmd.after_send_response(result.as_deref());
        result
    }
}

/// Shared sink of messages written by a [`BufferConnection`].
///
/// Clone it before handing the connection away; the clones see the same
/// underlying buffer.
#[derive(Clone, Default)]
pub struct MessageBuffer {
    inner: Arc<Mutex<Vec<String>>>,
}

impl MessageBuffer {
    /// An empty buffer.
    pub fn new() -> MessageBuffer {
        MessageBuffer::default()
    }

    /// Number of buffered messages.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether nothing has been buffered yet.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drain all buffered messages, oldest first.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.inner.lock())
    }

    fn push(&self, message: String) {
        self.inner.lock().push(message);
    }
}

/// An in-process connection that assembles commands and appends the
/// resulting strings to a [`MessageBuffer`].
///
/// Useful as a loopback for embedders that shuttle the strings over
/// their own transport, and as the connection of choice in tests.
pub struct BufferConnection {
    buffer: MessageBuffer,
}

impl BufferConnection {
    /// A connection writing into `buffer`.
    pub fn new(buffer: MessageBuffer) -> BufferConnection {
        BufferConnection { buffer }
    }
}

impl Connection for BufferConnection {
    fn do_send_request(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String> {
        match assemble_request(cmd) {
            Ok(message) => {
                self.buffer.push(message);
                None
            }
            Err(e) => Some(e.to_string()),
        }
    }

    fn do_send_response(&mut self, cmd: &mut dyn RemoteCommand) -> Option<String> {
        match assemble_response(cmd) {
            Ok(message) => {
                self.buffer.push(message);
                None
            }
            Err(e) => Some(e.to_string()),
        }
    }
}
