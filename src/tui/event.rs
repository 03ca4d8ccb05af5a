use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::action::Action;
use crate::core::input::Edit;

/// Rows scrolled per mouse wheel notch.
pub const SCROLL_STEP: i32 = 3;

/// Translate a terminal event into a session action.
pub fn translate(event: Event) -> Option<Action> {
    match event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => translate_key(key_event),
        Event::Resize(width, height) => Some(Action::Resize { width, height }),
        Event::Paste(data) => Some(Action::Edit(Edit::InsertStr(data))),
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(Action::Scroll(-SCROLL_STEP)),
            MouseEventKind::ScrollDown => Some(Action::Scroll(SCROLL_STEP)),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<Action> {
    debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code, key_event.modifiers
    );
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    let edit = match key_event.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Interrupt),
        KeyCode::Enter => return Some(Action::Submit),
        // readline-style bindings
        KeyCode::Char('a') if ctrl => Edit::Home,
        KeyCode::Char('e') if ctrl => Edit::End,
        KeyCode::Char('u') if ctrl => Edit::DeleteToStart,
        KeyCode::Char('k') if ctrl => Edit::DeleteToEnd,
        KeyCode::Char('w') if ctrl => Edit::DeleteWordBackward,
        KeyCode::Backspace if alt => Edit::DeleteWordBackward,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => Edit::Insert(c),
        KeyCode::Backspace => Edit::Backspace,
        KeyCode::Delete => Edit::Delete,
        KeyCode::Left => Edit::Left,
        KeyCode::Right => Edit::Right,
        KeyCode::Home => Edit::Home,
        KeyCode::End => Edit::End,
        _ => return None,
    };
    Some(Action::Edit(edit))
}

/// Forward terminal events onto the event bus until cancelled.
///
/// If the terminal stops delivering input the session can no longer be
/// quit from the keyboard, so an `Interrupt` is posted in that case.
pub fn spawn_input(bus: UnboundedSender<Action>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = EventStream::new();
        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => break,
                next = events.next() => next,
            };

            let action = match next {
                Some(Ok(event)) => match translate(event) {
                    Some(action) => action,
                    None => continue,
                },
                Some(Err(e)) => {
                    warn!("Terminal input failed: {}", e);
                    Action::Interrupt
                }
                None => {
                    warn!("Terminal input stream ended");
                    Action::Interrupt
                }
            };

            let ends_input = action == Action::Interrupt;
            if bus.send(action).is_err() || ends_input {
                break;
            }
        }
        info!("Terminal input task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        assert_eq!(
            translate(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Interrupt)
        );
    }

    #[test]
    fn test_enter_submits() {
        assert_eq!(
            translate(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Submit)
        );
    }

    #[test]
    fn test_other_keys_become_edits() {
        assert_eq!(
            translate(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::Edit(Edit::Insert('x')))
        );
        assert_eq!(
            translate(key(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Action::Edit(Edit::Insert('X')))
        );
        assert_eq!(
            translate(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::Edit(Edit::Left))
        );
        assert_eq!(
            translate(key(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            Some(Action::Edit(Edit::DeleteWordBackward))
        );
        assert_eq!(
            translate(key(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Action::Edit(Edit::DeleteWordBackward))
        );
    }

    #[test]
    fn test_unbound_keys_are_dropped() {
        assert_eq!(translate(key(KeyCode::Char('z'), KeyModifiers::CONTROL)), None);
        assert_eq!(translate(key(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(translate(release), None);
    }

    #[test]
    fn test_resize_paste_and_wheel() {
        assert_eq!(
            translate(Event::Resize(100, 40)),
            Some(Action::Resize { width: 100, height: 40 })
        );
        assert_eq!(
            translate(Event::Paste("AT+RST".to_string())),
            Some(Action::Edit(Edit::InsertStr("AT+RST".to_string())))
        );

        let wheel = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            translate(wheel(MouseEventKind::ScrollUp)),
            Some(Action::Scroll(-SCROLL_STEP))
        );
        assert_eq!(
            translate(wheel(MouseEventKind::ScrollDown)),
            Some(Action::Scroll(SCROLL_STEP))
        );
        assert_eq!(translate(wheel(MouseEventKind::Moved)), None);
    }
}
