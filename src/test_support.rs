//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::io::{self, ErrorKind};
use std::sync::{Arc, Mutex};

use crate::core::state::{App, Connection};
use crate::transport::{Inbound, Outbound, TransportError};

/// Inbound half that replays a fixed script of reads, then reports "nothing
/// available" forever.
pub struct ScriptedInbound {
    script: VecDeque<Result<Vec<u8>, TransportError>>,
}

impl ScriptedInbound {
    pub fn new(script: Vec<Result<Vec<u8>, TransportError>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Inbound for ScriptedInbound {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.script.pop_front() {
            Some(Ok(bytes)) => {
                let n = bytes.len().min(buf.len());
                buf[..n].copy_from_slice(&bytes[..n]);
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => Ok(0),
        }
    }
}

/// Outbound half that records every write call.
pub struct RecordingOutbound {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl RecordingOutbound {
    pub fn new() -> (Self, Arc<Mutex<Vec<Vec<u8>>>>) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                writes: Arc::clone(&writes),
            },
            writes,
        )
    }
}

impl Outbound for RecordingOutbound {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        self.writes.lock().unwrap().push(bytes.to_vec());
        Ok(bytes.len())
    }
}

/// Outbound half whose writes always fail.
pub struct FailingOutbound;

impl Outbound for FailingOutbound {
    fn write(&mut self, _bytes: &[u8]) -> Result<usize, TransportError> {
        Err(TransportError::Write(io::Error::new(
            ErrorKind::BrokenPipe,
            "device unplugged",
        )))
    }
}

/// A read error as a device would report it.
pub fn read_error() -> TransportError {
    TransportError::Read(io::Error::new(ErrorKind::BrokenPipe, "device unplugged"))
}

/// Creates a test App for `/dev/ttyTEST` at 9600 baud.
pub fn test_app() -> App {
    App::new(Connection::new("/dev/ttyTEST", 9600), 10_000)
}
