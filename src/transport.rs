//! # Transport
//!
//! The byte-stream device contract consumed by the rest of Bobacom.
//!
//! A device connection is split into two independently owned halves at open
//! time: [`Inbound`] is moved onto the reader task, [`Outbound`] stays with the
//! event loop. Each half is used from exactly one thread, so no locking is
//! needed between the reader and the writer.
//!
//! ```text
//! open_serial(name, baud)
//!        │
//!        ▼
//!    Transport ──split()──► Inbound  (reader task, blocking reads)
//!                      └──► Outbound (event loop, blocking writes)
//! ```
//!
//! Dropping both halves closes the device.

use log::{debug, info};
use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;

use serialport::SerialPort;

/// Read timeout for the serial handle. Matches the reader's poll interval so a
/// quiet device hands control back often enough to observe cancellation.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum TransportError {
    /// The device could not be opened. Fatal before the interactive loop starts.
    Open { device: String, message: String },
    /// A read from the device failed.
    Read(io::Error),
    /// A write to the device failed.
    Write(io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Open { device, message } => {
                write!(f, "failed to open {device}: {message}")
            }
            TransportError::Read(e) => write!(f, "failed to read from device: {e}"),
            TransportError::Write(e) => write!(f, "failed to write to device: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Open { .. } => None,
            TransportError::Read(e) | TransportError::Write(e) => Some(e),
        }
    }
}

// ============================================================================
// Contract
// ============================================================================

/// Receiving half of a device connection.
pub trait Inbound: Send {
    /// Block until at least one byte is available and copy it into `buf`.
    ///
    /// Returns `Ok(0)` when the device produced nothing within its poll
    /// timeout. Any `Err` is a device failure.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
}

/// Sending half of a device connection.
pub trait Outbound: Send {
    /// Write all of `bytes` to the device, blocking until done.
    /// Returns the number of bytes written.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError>;
}

/// An open device connection, not yet split between its two users.
pub struct Transport {
    inbound: Box<dyn Inbound>,
    outbound: Box<dyn Outbound>,
}

impl Transport {
    pub fn new(inbound: Box<dyn Inbound>, outbound: Box<dyn Outbound>) -> Self {
        Self { inbound, outbound }
    }

    pub fn split(self) -> (Box<dyn Inbound>, Box<dyn Outbound>) {
        (self.inbound, self.outbound)
    }
}

// ============================================================================
// Serial implementation
// ============================================================================

struct SerialInbound {
    port: Box<dyn SerialPort>,
}

impl Inbound for SerialInbound {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                Ok(0)
            }
            Err(e) => Err(TransportError::Read(e)),
        }
    }
}

struct SerialOutbound {
    port: Box<dyn SerialPort>,
}

impl Outbound for SerialOutbound {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, TransportError> {
        self.port.write_all(bytes).map_err(TransportError::Write)?;
        self.port.flush().map_err(TransportError::Write)?;
        debug!("Wrote {} bytes to device", bytes.len());
        Ok(bytes.len())
    }
}

/// Open a serial device and split it into reader and writer handles.
///
/// The writer gets its own, longer timeout: at low baud rates a full line can
/// take far longer to drain than the reader's poll interval.
pub fn open_serial(
    name: &str,
    baud_rate: u32,
    write_timeout: Duration,
) -> Result<Transport, TransportError> {
    let open_error = |e: serialport::Error| TransportError::Open {
        device: name.to_string(),
        message: e.to_string(),
    };

    let reader = serialport::new(name, baud_rate)
        .timeout(READ_TIMEOUT)
        .open()
        .map_err(open_error)?;
    let mut writer = reader.try_clone().map_err(open_error)?;
    writer.set_timeout(write_timeout).map_err(open_error)?;

    info!("Opened {} at {} baud", name, baud_rate);

    Ok(Transport::new(
        Box::new(SerialInbound { port: reader }),
        Box::new(SerialOutbound { port: writer }),
    ))
}
