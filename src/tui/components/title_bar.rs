//! # TitleBar Component
//!
//! Top bar naming the device and baud rate.
//!
//! ```text
//! ╭────────────────────────────────────────╮
//! │ Bobacom – /dev/ttyUSB0 @ 115200 baud   ├───────────────────────
//! ╰────────────────────────────────────────╯
//! ```
//!
//! The title sits in a rounded box whose right edge is drawn as `├`, and a
//! horizontal rule continues from that edge across the remaining width. The
//! bar is always [`HEADER_HEIGHT`] rows tall; the viewport's row budget
//! depends on it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::Connection;
use crate::core::viewport::HEADER_HEIGHT;
use crate::tui::component::Component;

/// Border (2) + padding (2) around the title text.
const HORIZONTAL_OVERHEAD: u16 = 4;
const RULE: &str = "─";

/// Stateless header component.
pub struct TitleBar<'a> {
    pub connection: &'a Connection,
}

impl<'a> TitleBar<'a> {
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    pub fn title(&self) -> String {
        format!(
            "Bobacom – {} @ {} baud",
            self.connection.device, self.connection.baud_rate
        )
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self.title();
        let box_width = (title.width() as u16 + HORIZONTAL_OVERHEAD).min(area.width);
        let box_area = Rect {
            width: box_width,
            height: area.height.min(HEADER_HEIGHT),
            ..area
        };

        let border_set = border::Set {
            vertical_right: "├",
            ..border::ROUNDED
        };
        let block = Block::bordered()
            .border_set(border_set)
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(title).block(block), box_area);

        let rule_width = area.width.saturating_sub(box_width);
        if rule_width > 0 && box_area.height >= HEADER_HEIGHT {
            let rule_area = Rect::new(area.x + box_width, area.y + 1, rule_width, 1);
            frame.render_widget(Paragraph::new(RULE.repeat(rule_width as usize)), rule_area);
        }
    }
}
