//! # InputBox Component
//!
//! Renders the [`InputField`] inside a rounded, padded box and places the
//! terminal cursor at the field's cursor.
//!
//! The field holds a single line. When it is wider than the box, the view
//! scrolls horizontally so the cursor stays visible at the right edge. While
//! the field is empty a dimmed placeholder is shown instead.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::input::InputField;
use crate::tui::component::Component;

pub const PLACEHOLDER: &str = "Type something...";

pub struct InputBox<'a> {
    pub field: &'a InputField,
}

impl<'a> InputBox<'a> {
    pub fn new(field: &'a InputField) -> Self {
        Self { field }
    }
}

impl Component for InputBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        let (paragraph, cursor_col) = if self.field.is_empty() {
            let placeholder = Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray));
            (placeholder, 0)
        } else {
            let (visible, col) = visible_window(self.field.value(), self.field.cursor(), inner.width);
            (Paragraph::new(visible), col)
        };

        frame.render_widget(paragraph.block(block), area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

/// The slice of `text` that fits in `width` columns with the cursor visible,
/// and the cursor's column within that slice.
fn visible_window(text: &str, cursor: usize, width: u16) -> (String, u16) {
    let width = width as usize;
    if width == 0 {
        return (String::new(), 0);
    }

    // Drop leading chars until the cursor lands inside the box (the cursor
    // itself needs one column).
    let before = &text[..cursor];
    let mut cursor_col = before.width();
    let mut start = 0;
    let mut leading = before.chars();
    while cursor_col >= width {
        let Some(c) = leading.next() else { break };
        cursor_col -= c.width().unwrap_or(0);
        start += c.len_utf8();
    }

    let mut visible = String::new();
    let mut used = 0;
    for c in text[start..].chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        visible.push(c);
    }

    (visible, cursor_col as u16)
}
