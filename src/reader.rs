//! # Reader Task
//!
//! Pulls bytes off the device and posts them onto the event bus as
//! `Action::IncomingData`, without ever touching `App`.
//!
//! The loop reads into a fixed 256-byte buffer, forwards exactly what was
//! read (no framing, no decoding), then sleeps for the poll interval whether
//! or not anything arrived. A read failure is posted as `Action::ReadFailed`
//! and ends the task; the event loop decides what happens next.
//!
//! Cancellation is checked before every read and after every sleep.

use log::{debug, info, warn};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::action::Action;
use crate::transport::Inbound;

pub const READ_BUFFER_SIZE: usize = 256;
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderExit {
    Cancelled,
    ReadFailed,
    /// The event loop dropped its receiver.
    BusClosed,
}

/// Run the read loop on the current thread until cancelled or failed.
pub fn read_loop(
    mut inbound: Box<dyn Inbound>,
    bus: UnboundedSender<Action>,
    cancel: CancellationToken,
    poll_interval: Duration,
) -> ReaderExit {
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        if cancel.is_cancelled() {
            return ReaderExit::Cancelled;
        }

        match inbound.read(&mut buf) {
            Ok(0) => {}
            Ok(n) => {
                debug!("Read {} bytes from device", n);
                if bus.send(Action::IncomingData(buf[..n].to_vec())).is_err() {
                    warn!("Failed to forward device data: receiver dropped");
                    return ReaderExit::BusClosed;
                }
            }
            Err(e) => {
                warn!("Device read failed: {}", e);
                if bus.send(Action::ReadFailed(e.to_string())).is_err() {
                    warn!("Failed to report read failure: receiver dropped");
                }
                return ReaderExit::ReadFailed;
            }
        }

        std::thread::sleep(poll_interval);
    }
}

/// Spawn the read loop on tokio's blocking pool.
pub fn spawn(
    inbound: Box<dyn Inbound>,
    bus: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> JoinHandle<ReaderExit> {
    info!("Starting reader task ({:?} poll interval)", POLL_INTERVAL);
    tokio::task::spawn_blocking(move || {
        let exit = read_loop(inbound, bus, cancel, POLL_INTERVAL);
        info!("Reader task stopped: {:?}", exit);
        exit
    })
}
