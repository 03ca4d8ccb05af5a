//! # TranscriptView Component
//!
//! Scrollable view of the session transcript.
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that
//! borrows the `Transcript` and the `Viewport` as props. All layout and
//! scroll bookkeeping already happened in `core` when the events were
//! applied, so rendering only asks the viewport for the rows currently on
//! screen and draws them.
//!
//! A vertical scrollbar occupies the viewport's gutter column once the
//! content is taller than the view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Text};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::transcript::Transcript;
use crate::core::viewport::Viewport;
use crate::tui::component::Component;

pub struct TranscriptView<'a> {
    pub transcript: &'a Transcript,
    pub viewport: &'a Viewport,
}

impl<'a> TranscriptView<'a> {
    pub fn new(transcript: &'a Transcript, viewport: &'a Viewport) -> Self {
        Self {
            transcript,
            viewport,
        }
    }

    fn render_scrollbar(&self, frame: &mut Frame, area: Rect) {
        let max_scroll = self.viewport.max_offset();
        if max_scroll == 0 {
            return;
        }

        // ScrollbarState content_length is max scrollable position, not total rows
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_scroll)
            .position(self.viewport.offset());

        let scrollbar_area = Rect {
            x: area.x + area.width.saturating_sub(1),
            width: 1,
            ..area
        };

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

impl Component for TranscriptView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Line> = self
            .viewport
            .visible_rows(self.transcript)
            .into_iter()
            .take(area.height as usize)
            .map(Line::from)
            .collect();

        let text_area = Rect {
            width: self.viewport.text_width().min(area.width),
            ..area
        };
        frame.render_widget(Paragraph::new(Text::from(rows)), text_area);

        if area.width > 0 {
            self.render_scrollbar(frame, area);
        }
    }
}
