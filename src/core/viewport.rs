//! # Viewport
//!
//! The visible, scrollable window onto the [`Transcript`].
//!
//! Each logical transcript line is soft-wrapped to the viewport width, less
//! the scrollbar gutter. The sum of wrapped rows is the rendered content
//! height. The scroll offset is always clamped to
//! `[0, max(0, content_height - height)]`.
//!
//! ## Layout cache
//!
//! Wrapping the whole transcript on every append would be O(n) per chunk, so
//! wrapped heights are cached per line. Only the open (last) line can still
//! change, so it is re-measured on every sync; frozen lines are measured once
//! per width. Evicted lines are dropped from the front of the cache.

use std::borrow::Cow;
use std::collections::VecDeque;

use crate::core::transcript::Transcript;

/// Rows used by the header (bordered title box).
pub const HEADER_HEIGHT: u16 = 3;
/// Rows used by the footer (bordered input box).
pub const FOOTER_HEIGHT: u16 = 3;

/// Rightmost column is kept free for the scrollbar.
pub const SCROLLBAR_GUTTER: u16 = 1;

const TAB: &str = "    ";

/// Number of transcript rows available in a terminal of the given height.
pub fn rows_for_terminal(height: u16) -> u16 {
    height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT)
}

pub struct Viewport {
    pub width: u16,
    pub height: u16,
    offset: usize,
    /// When true, content changes keep the view pinned to the newest row.
    stick_to_bottom: bool,
    layout: LayoutCache,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            offset: 0,
            stick_to_bottom: true,
            layout: LayoutCache::new(),
        }
    }

    /// Re-measure against the transcript and pin to the newest content.
    pub fn set_content(&mut self, transcript: &Transcript) {
        self.layout.sync(transcript, self.text_width());
        self.goto_bottom();
    }

    /// Update geometry only. Scroll policy is preserved: a pinned view stays
    /// pinned, an unpinned one is clamped.
    pub fn resize(&mut self, width: u16, height: u16, transcript: &Transcript) {
        self.width = width;
        self.height = height;
        self.layout.sync(transcript, self.text_width());
        if self.stick_to_bottom {
            self.offset = self.max_offset();
        } else {
            self.clamp();
        }
    }

    pub fn goto_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.offset = self.max_offset();
    }

    /// Scroll by `delta` rows (negative = up). Reaching the bottom re-pins.
    pub fn scroll_by(&mut self, delta: i32) {
        let magnitude = delta.unsigned_abs() as usize;
        if delta < 0 {
            self.offset = self.offset.saturating_sub(magnitude);
        } else {
            self.offset = self.offset.saturating_add(magnitude);
        }
        self.clamp();
        self.stick_to_bottom = self.offset >= self.max_offset();
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }

    /// Columns available to wrapped text.
    pub fn text_width(&self) -> u16 {
        self.width.saturating_sub(SCROLLBAR_GUTTER)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_height(&self) -> usize {
        self.layout.total()
    }

    pub fn max_offset(&self) -> usize {
        self.content_height().saturating_sub(self.height as usize)
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// The wrapped rows currently on screen, top to bottom.
    pub fn visible_rows(&self, transcript: &Transcript) -> Vec<String> {
        let height = self.height as usize;
        let mut rows = Vec::with_capacity(height);
        if height == 0 {
            return rows;
        }

        let mut top = 0usize;
        for (i, line) in transcript.lines().enumerate() {
            let line_height = self.layout.height_of(i);
            if top + line_height <= self.offset {
                top += line_height;
                continue;
            }

            let skip = self.offset.saturating_sub(top);
            for row in wrap_line(line, self.text_width()).into_iter().skip(skip) {
                if rows.len() == height {
                    return rows;
                }
                rows.push(row);
            }
            top += line_height;
            if rows.len() == height {
                break;
            }
        }
        rows
    }
}

/// Wrap a single logical line to `width` columns.
///
/// Control characters are not drawn (so `\r\n` endings display cleanly) and
/// tabs expand to spaces. Always returns at least one row.
pub fn wrap_line(line: &str, width: u16) -> Vec<String> {
    let text = display_text(line);
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let rows: Vec<String> = textwrap::wrap(&text, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect();

    if rows.is_empty() {
        vec![String::new()]
    } else {
        rows
    }
}

fn display_text(line: &str) -> Cow<'_, str> {
    if !line.chars().any(char::is_control) {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => out.push_str(TAB),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Cached wrapped heights for frozen transcript lines.
struct LayoutCache {
    /// Heights of frozen lines, starting at absolute line `first_line`.
    heights: VecDeque<usize>,
    first_line: u64,
    frozen_total: usize,
    /// Height of the open (last) line, re-measured on every sync.
    open_height: usize,
    width: u16,
}

impl LayoutCache {
    fn new() -> Self {
        Self {
            heights: VecDeque::new(),
            first_line: 0,
            frozen_total: 0,
            open_height: 1,
            width: 0,
        }
    }

    fn sync(&mut self, transcript: &Transcript, width: u16) {
        if self.width != width {
            self.heights.clear();
            self.frozen_total = 0;
            self.width = width;
            self.first_line = transcript.evicted_lines();
        }

        while self.first_line < transcript.evicted_lines() {
            match self.heights.pop_front() {
                Some(h) => {
                    self.frozen_total -= h;
                    self.first_line += 1;
                }
                None => self.first_line = transcript.evicted_lines(),
            }
        }

        let frozen = transcript.line_count().saturating_sub(1);
        while self.heights.len() > frozen {
            if let Some(h) = self.heights.pop_back() {
                self.frozen_total -= h;
            }
        }

        let mut open_height = 1;
        for (i, line) in transcript.lines().enumerate().skip(self.heights.len()) {
            let h = wrap_line(line, width).len();
            if i < frozen {
                self.heights.push_back(h);
                self.frozen_total += h;
            } else {
                open_height = h;
            }
        }
        self.open_height = open_height;
    }

    fn height_of(&self, index: usize) -> usize {
        self.heights.get(index).copied().unwrap_or(self.open_height)
    }

    fn total(&self) -> usize {
        self.frozen_total + self.open_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript_with(text: &str) -> Transcript {
        let mut transcript = Transcript::new(1_000);
        transcript.append_str(text);
        transcript
    }

    #[test]
    fn test_rows_for_terminal_subtracts_chrome() {
        assert_eq!(rows_for_terminal(24), 18);
        assert_eq!(rows_for_terminal(4), 0);
    }

    #[test]
    fn test_wrap_line_breaks_long_words() {
        assert_eq!(wrap_line("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap_line("", 10), vec![""]);
        assert_eq!(wrap_line("anything", 0), vec![""]);
    }

    #[test]
    fn test_wrap_line_hides_control_chars() {
        assert_eq!(wrap_line("OK\r", 10), vec!["OK"]);
        assert_eq!(wrap_line("a\tb", 20), vec!["a    b"]);
    }

    #[test]
    fn test_content_height_counts_wrapped_rows() {
        let transcript = transcript_with("0123456789\nab\n");
        let mut viewport = Viewport::new(6, 10);
        viewport.set_content(&transcript);
        // "01234" "56789" | "ab" | ""
        assert_eq!(viewport.content_height(), 4);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_set_content_pins_to_bottom() {
        let transcript = transcript_with("1\n2\n3\n4\n5\n6");
        let mut viewport = Viewport::new(10, 4);
        viewport.set_content(&transcript);
        assert_eq!(viewport.content_height(), 6);
        assert_eq!(viewport.offset(), 2);
        assert_eq!(viewport.visible_rows(&transcript), vec!["3", "4", "5", "6"]);
    }

    #[test]
    fn test_open_line_growth_is_remeasured() {
        let mut transcript = transcript_with("abc");
        let mut viewport = Viewport::new(5, 10);
        viewport.set_content(&transcript);
        assert_eq!(viewport.content_height(), 1);

        transcript.append_str("defgh\nxy");
        viewport.set_content(&transcript);
        // "abcd" "efgh" | "xy"
        assert_eq!(viewport.content_height(), 3);
    }

    #[test]
    fn test_eviction_shrinks_content_height() {
        let mut transcript = Transcript::new(3);
        let mut viewport = Viewport::new(10, 2);
        transcript.append_str("a\nb\n");
        viewport.set_content(&transcript);
        assert_eq!(viewport.content_height(), 3);

        transcript.append_str("c\nd");
        viewport.set_content(&transcript);
        assert_eq!(viewport.content_height(), 3);
        assert_eq!(viewport.visible_rows(&transcript), vec!["c", "d"]);
    }

    #[test]
    fn test_scroll_is_clamped_and_repins() {
        let transcript = transcript_with("1\n2\n3\n4\n5\n6");
        let mut viewport = Viewport::new(10, 4);
        viewport.set_content(&transcript);

        viewport.scroll_by(-100);
        assert_eq!(viewport.offset(), 0);
        assert!(!viewport.is_at_bottom());
        assert_eq!(viewport.visible_rows(&transcript), vec!["1", "2", "3", "4"]);

        viewport.scroll_by(100);
        assert_eq!(viewport.offset(), 2);
        assert!(viewport.is_at_bottom());
    }

    #[test]
    fn test_resize_keeps_pinned_view_at_bottom() {
        let transcript = transcript_with("1\n2\n3\n4\n5\n6");
        let mut viewport = Viewport::new(10, 4);
        viewport.set_content(&transcript);

        viewport.resize(10, 2, &transcript);
        assert_eq!(viewport.offset(), 4);

        viewport.resize(10, 10, &transcript);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn test_resize_clamps_unpinned_view() {
        let transcript = transcript_with("1\n2\n3\n4\n5\n6");
        let mut viewport = Viewport::new(10, 2);
        viewport.set_content(&transcript);
        viewport.scroll_by(-1);
        assert_eq!(viewport.offset(), 3);

        viewport.resize(10, 5, &transcript);
        assert_eq!(viewport.offset(), 1);
        assert!(viewport.is_at_bottom());
    }

    #[test]
    fn test_visible_rows_starts_mid_line() {
        let transcript = transcript_with("abcdef\ngh");
        let mut viewport = Viewport::new(3, 2);
        viewport.set_content(&transcript);
        // rows: "ab" "cd" "ef" "gh" -> bottom two
        assert_eq!(viewport.offset(), 2);
        assert_eq!(viewport.visible_rows(&transcript), vec!["ef", "gh"]);
    }
}
