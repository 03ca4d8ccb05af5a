//! # Application State
//!
//! Core session state for Bobacom. No terminal types and no I/O live here.
//!
//! ```text
//! App
//! ├── connection: Connection   // device name + baud rate, immutable
//! ├── phase: Phase             // Uninitialized → Ready → Shutdown
//! ├── transcript: Transcript   // everything sent and received
//! ├── viewport: Viewport       // visible window onto the transcript
//! └── input: InputField        // line being composed
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The event loop owns the single `App` value; nothing else mutates it.

use std::fmt;

use crate::core::input::InputField;
use crate::core::transcript::Transcript;
use crate::core::viewport::Viewport;

/// The device this session talks to. Created once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub device: String,
    pub baud_rate: u32,
}

impl Connection {
    pub fn new(device: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            device: device.into(),
            baud_rate,
        }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The user pressed the interrupt key. Not an error.
    Interrupted,
    ReadFailed(String),
    WriteFailed(String),
}

impl ShutdownReason {
    pub fn is_failure(&self) -> bool {
        !matches!(self, ShutdownReason::Interrupted)
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupted => write!(f, "interrupted by user"),
            ShutdownReason::ReadFailed(msg) => write!(f, "{msg}"),
            ShutdownReason::WriteFailed(msg) => write!(f, "{msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No terminal geometry yet; nothing is rendered.
    Uninitialized,
    Ready,
    /// Terminal. Every further action is ignored.
    Shutdown(ShutdownReason),
}

pub struct App {
    pub connection: Connection,
    pub phase: Phase,
    pub transcript: Transcript,
    pub viewport: Viewport,
    pub input: InputField,
}

impl App {
    pub fn new(connection: Connection, scrollback_lines: usize) -> Self {
        Self {
            connection,
            phase: Phase::Uninitialized,
            transcript: Transcript::new(scrollback_lines),
            viewport: Viewport::default(),
            input: InputField::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    pub fn shutdown_reason(&self) -> Option<&ShutdownReason> {
        match &self.phase {
            Phase::Shutdown(reason) => Some(reason),
            _ => None,
        }
    }
}
