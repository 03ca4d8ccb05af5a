use crate::core::state::App;
use crate::core::viewport::{FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::tui::component::Component;
use crate::tui::components::{InputBox, TitleBar, TranscriptView};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

pub fn draw_ui(frame: &mut Frame, app: &App) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(HEADER_HEIGHT), Min(0), Length(FOOTER_HEIGHT)]);
    let [title_area, transcript_area, input_area] = layout.areas(frame.area());

    TitleBar::new(&app.connection).render(frame, title_area);
    TranscriptView::new(&app.transcript, &app.viewport).render(frame, transcript_area);
    InputBox::new(&app.input).render(frame, input_area);
}
