//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, runs the event loop, and
//! performs the I/O that `core::update` asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Every producer (terminal input, the reader task, the loop itself when it
//! reports a write) posts `Action`s onto one unbounded channel, so the loop
//! applies them in exactly the order they were posted. After waking for one
//! action it drains everything already queued, then draws once.
//!
//! A `Shutdown` phase ends the loop before the rest of the queue is looked at.
//! On the way out the reader is cancelled and joined before the device is
//! released, and the terminal is restored even if drawing failed.

mod component;
mod components;
pub mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio_util::sync::CancellationToken;

use crate::core::action::{Action, Effect, update};
use crate::core::state::{App, ShutdownReason};
use crate::reader;
use crate::transport::{Outbound, Transport};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Run an interactive session on `transport` until it shuts down.
///
/// Returns why the session ended. Terminal I/O errors are returned as `Err`
/// after the terminal has been restored.
pub async fn run(mut app: App, transport: Transport) -> io::Result<ShutdownReason> {
    let (inbound, mut outbound) = transport.split();
    let (bus, mut events) = unbounded_channel::<Action>();
    let cancel = CancellationToken::new();

    let mut terminal = ratatui::init();
    let mode_guard = TerminalModeGuard::new();
    if let Err(e) = &mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    // The first Resize moves the session to Ready; the terminal's own resize
    // events keep it current afterwards.
    match terminal.size() {
        Ok(size) => {
            let _ = bus.send(Action::Resize {
                width: size.width,
                height: size.height,
            });
        }
        Err(e) => warn!("Could not query terminal size: {}", e),
    }

    let input_task = event::spawn_input(bus.clone(), cancel.clone());
    let reader_task = reader::spawn(inbound, bus, cancel.clone());

    let result = event_loop(&mut app, outbound.as_mut(), &mut events, |app| {
        terminal.draw(|f| ui::draw_ui(f, app)).map(|_| ())
    })
    .await;

    cancel.cancel();
    if let Err(e) = input_task.await {
        warn!("Terminal input task panicked: {}", e);
    }
    match reader_task.await {
        Ok(exit) => debug!("Reader joined: {:?}", exit),
        Err(e) => warn!("Reader task panicked: {}", e),
    }

    drop(mode_guard);
    ratatui::restore();
    // Both halves are released only after the reader has stopped.
    drop(outbound);

    result?;
    let reason = app
        .shutdown_reason()
        .cloned()
        .unwrap_or(ShutdownReason::Interrupted);
    info!("Session ended: {}", reason);
    Ok(reason)
}

/// Apply events in arrival order until the session shuts down.
///
/// `draw` is called once per batch of events, and only once the first
/// `Resize` has made the session ready.
async fn event_loop(
    app: &mut App,
    outbound: &mut dyn Outbound,
    events: &mut UnboundedReceiver<Action>,
    mut draw: impl FnMut(&App) -> io::Result<()>,
) -> io::Result<()> {
    loop {
        let Some(first) = events.recv().await else {
            warn!("Event bus closed with no producers left");
            return Ok(());
        };

        let mut should_quit = dispatch(app, outbound, first) == Effect::Quit;
        while !should_quit {
            match events.try_recv() {
                Ok(action) => should_quit = dispatch(app, outbound, action) == Effect::Quit,
                Err(_) => break,
            }
        }

        if should_quit {
            return Ok(());
        }
        if app.is_ready() {
            draw(app)?;
        }
    }
}

/// Apply one action, performing any device write it asks for.
///
/// A transmit is completed here: the outcome goes straight back through
/// `update` as `Transmitted` or `WriteFailed`.
fn dispatch(app: &mut App, outbound: &mut dyn Outbound, action: Action) -> Effect {
    match update(app, action) {
        Effect::Transmit(line) => {
            let outcome = match outbound.write(line.as_bytes()) {
                Ok(n) => {
                    debug!("Wrote {} bytes to device", n);
                    Action::Transmitted(line)
                }
                Err(e) => {
                    warn!("Device write failed: {}", e);
                    Action::WriteFailed(e.to_string())
                }
            };
            update(app, outcome)
        }
        effect => effect,
    }
}
