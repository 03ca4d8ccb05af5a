//! # Actions
//!
//! Everything that can happen in a Bobacom session becomes an `Action`.
//! Bytes arrive from the device? That's `Action::IncomingData(bytes)`.
//! User presses Enter? That's `Action::Submit`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Submitting is two-phase: `Submit` asks the caller to transmit the line
//! (`Effect::Transmit`), and the caller reports back with `Transmitted` or
//! `WriteFailed`. The transcript and input field only change once the write
//! has succeeded.

use log::{debug, error, info};

use crate::core::input::Edit;
use crate::core::state::{App, Phase, ShutdownReason};
use crate::core::viewport::{Viewport, rows_for_terminal};

/// Line terminator appended to every submitted line.
pub const LINE_TERMINATOR: &str = "\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Terminal geometry, in cells.
    Resize { width: u16, height: u16 },
    /// Interrupt key (Ctrl+C): end the session.
    Interrupt,
    /// Submit key (Enter): send the input line.
    Submit,
    /// Any other key, translated into a line-editor operation.
    Edit(Edit),
    /// Mouse wheel, in rows (negative = towards older content).
    Scroll(i32),
    /// Raw bytes from the device, exactly as read.
    IncomingData(Vec<u8>),
    /// The reader hit a device error and stopped.
    ReadFailed(String),
    /// A submitted line (terminator included) reached the device.
    Transmitted(String),
    WriteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Write this text to the device, then report `Transmitted` or `WriteFailed`.
    Transmit(String),
    /// The session has ended; stop processing events.
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    if let Phase::Shutdown(reason) = &app.phase {
        debug!("Ignoring {:?} after shutdown ({})", action, reason);
        return Effect::None;
    }

    match action {
        Action::Resize { width, height } => {
            let rows = rows_for_terminal(height);
            if app.phase == Phase::Uninitialized {
                app.viewport = Viewport::new(width, rows);
                app.viewport.set_content(&app.transcript);
                app.phase = Phase::Ready;
                info!("Ready: {}x{} terminal, {} transcript rows", width, height, rows);
            } else {
                app.viewport.resize(width, rows, &app.transcript);
                debug!("Resized to {}x{} ({} transcript rows)", width, height, rows);
            }
            Effect::None
        }
        Action::Interrupt => shutdown(app, ShutdownReason::Interrupted),
        Action::Submit => {
            let line = format!("{}{}", app.input.value(), LINE_TERMINATOR);
            Effect::Transmit(line)
        }
        Action::Transmitted(line) => {
            app.transcript.append_str(&line);
            app.input.take();
            refresh_viewport(app);
            Effect::None
        }
        Action::Edit(edit) => {
            app.input.apply(edit);
            Effect::None
        }
        Action::Scroll(delta) => {
            if app.is_ready() {
                app.viewport.scroll_by(delta);
            }
            Effect::None
        }
        Action::IncomingData(bytes) => {
            debug!("Received {} bytes", bytes.len());
            app.transcript.append_bytes(&bytes);
            refresh_viewport(app);
            Effect::None
        }
        Action::ReadFailed(reason) => shutdown(app, ShutdownReason::ReadFailed(reason)),
        Action::WriteFailed(reason) => shutdown(app, ShutdownReason::WriteFailed(reason)),
    }
}

/// Before the first resize there is no viewport to keep in sync; the
/// transcript is seeded into it when `Ready` is entered.
fn refresh_viewport(app: &mut App) {
    if app.is_ready() {
        app.viewport.set_content(&app.transcript);
    }
}

fn shutdown(app: &mut App, reason: ShutdownReason) -> Effect {
    if reason.is_failure() {
        error!("Session ending: {}", reason);
    } else {
        info!("Session ending: {}", reason);
    }
    app.phase = Phase::Shutdown(reason);
    Effect::Quit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::{FOOTER_HEIGHT, HEADER_HEIGHT};
    use crate::test_support::test_app;

    fn type_text(app: &mut crate::core::state::App, text: &str) {
        for c in text.chars() {
            update(app, Action::Edit(Edit::Insert(c)));
        }
    }

    #[test]
    fn test_first_resize_enters_ready() {
        let mut app = test_app();
        update(&mut app, Action::IncomingData(b"boot\n".to_vec()));
        assert_eq!(app.phase, Phase::Uninitialized);

        let effect = update(&mut app, Action::Resize { width: 80, height: 24 });
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.viewport.width, 80);
        assert_eq!(app.viewport.height, 24 - HEADER_HEIGHT - FOOTER_HEIGHT);
        // Seeded with what arrived before geometry was known
        assert_eq!(app.viewport.content_height(), 2);
    }

    #[test]
    fn test_second_resize_overrides_geometry_only() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 24 });
        update(&mut app, Action::IncomingData(b"hello".to_vec()));

        update(&mut app, Action::Resize { width: 40, height: 10 });
        assert_eq!(app.phase, Phase::Ready);
        assert_eq!(app.viewport.width, 40);
        assert_eq!(app.viewport.height, 4);
        assert_eq!(app.transcript.text(), "hello");
    }

    #[test]
    fn test_incoming_data_concatenates_in_arrival_order() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 24 });
        for chunk in [&b"AT"[..], b"+CSQ\r\n", b"+CSQ: 21,0\r\n", b"OK\r\n"] {
            update(&mut app, Action::IncomingData(chunk.to_vec()));
        }
        assert_eq!(app.transcript.text(), "AT+CSQ\r\n+CSQ: 21,0\r\nOK\r\n");
    }

    #[test]
    fn test_incoming_data_keeps_viewport_at_bottom() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 20, height: 10 });
        for i in 0..30 {
            update(&mut app, Action::IncomingData(format!("line {i}\n").into_bytes()));
            let expected = app
                .viewport
                .content_height()
                .saturating_sub(app.viewport.height as usize);
            assert_eq!(app.viewport.offset(), expected);
        }
    }

    #[test]
    fn test_append_repins_after_manual_scroll() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 20, height: 10 });
        update(&mut app, Action::IncomingData(b"1\n2\n3\n4\n5\n6\n7\n8\n".to_vec()));
        update(&mut app, Action::Scroll(-3));
        assert!(!app.viewport.is_at_bottom());

        update(&mut app, Action::IncomingData(b"9".to_vec()));
        assert!(app.viewport.is_at_bottom());
        assert_eq!(app.viewport.offset(), app.viewport.max_offset());
    }

    #[test]
    fn test_submit_requests_transmit_without_mutating() {
        let mut app = test_app();
        type_text(&mut app, "hello");

        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::Transmit("hello\n".to_string()));
        assert_eq!(app.input.value(), "hello");
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_transmitted_appends_and_clears_input() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 24 });
        type_text(&mut app, "hello");

        update(&mut app, Action::Transmitted("hello\n".to_string()));
        assert_eq!(app.transcript.text(), "hello\n");
        assert!(app.input.is_empty());
        assert!(app.viewport.is_at_bottom());
    }

    #[test]
    fn test_edit_does_not_touch_transcript_or_viewport() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 24 });
        update(&mut app, Action::IncomingData(b"data".to_vec()));
        let offset = app.viewport.offset();

        update(&mut app, Action::Edit(Edit::Insert('x')));
        update(&mut app, Action::Edit(Edit::Backspace));
        update(&mut app, Action::Edit(Edit::Insert('y')));
        assert_eq!(app.input.value(), "y");
        assert_eq!(app.transcript.text(), "data");
        assert_eq!(app.viewport.offset(), offset);
    }

    #[test]
    fn test_interrupt_shuts_down_gracefully() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Interrupt), Effect::Quit);
        assert_eq!(app.shutdown_reason(), Some(&ShutdownReason::Interrupted));
    }

    #[test]
    fn test_read_failure_stops_all_processing() {
        let mut app = test_app();
        update(&mut app, Action::Resize { width: 80, height: 24 });
        update(&mut app, Action::IncomingData(b"before".to_vec()));

        let effect = update(&mut app, Action::ReadFailed("device unplugged".to_string()));
        assert_eq!(effect, Effect::Quit);
        assert_eq!(
            app.shutdown_reason(),
            Some(&ShutdownReason::ReadFailed("device unplugged".to_string()))
        );

        assert_eq!(update(&mut app, Action::IncomingData(b"after".to_vec())), Effect::None);
        assert_eq!(update(&mut app, Action::Submit), Effect::None);
        update(&mut app, Action::Resize { width: 10, height: 10 });
        assert_eq!(app.transcript.text(), "before");
        assert_eq!(app.viewport.width, 80);
    }

    #[test]
    fn test_write_failure_shuts_down() {
        let mut app = test_app();
        let effect = update(&mut app, Action::WriteFailed("broken pipe".to_string()));
        assert_eq!(effect, Effect::Quit);
        assert!(app.shutdown_reason().is_some_and(ShutdownReason::is_failure));
    }
}
