use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields, usually borrowed from `App`).
/// - They render to a `Frame` within a given `Rect`.
///
/// Bobacom's components are transient: built fresh each frame, holding no
/// state of their own. All persistent state lives in `core`.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
