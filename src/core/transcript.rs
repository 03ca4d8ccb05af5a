//! # Transcript
//!
//! Append-only record of everything sent and received, stored as logical
//! lines (split on `\n`). The last line is the open line that future appends
//! extend; every earlier line is frozen.
//!
//! ## Scrollback cap
//!
//! At most `max_lines` logical lines are kept. When an append pushes past the
//! cap, whole lines are evicted from the front. `evicted_lines()` and
//! `appended_bytes()` only ever grow, so callers can still observe
//! monotonic progress.
//!
//! ## Decoding
//!
//! Device bytes are decoded incrementally. A multi-byte UTF-8 sequence split
//! across two reads is held back until the rest arrives; bytes that can never
//! form valid UTF-8 become U+FFFD.

use std::collections::VecDeque;

pub struct Transcript {
    lines: VecDeque<String>,
    /// Incomplete UTF-8 sequence at the end of the last device chunk.
    pending: Vec<u8>,
    max_lines: usize,
    appended_bytes: u64,
    evicted_lines: u64,
}

impl Transcript {
    pub fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::from([String::new()]),
            pending: Vec::new(),
            max_lines: max_lines.max(1),
            appended_bytes: 0,
            evicted_lines: 0,
        }
    }

    /// Append raw device bytes.
    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.appended_bytes += bytes.len() as u64;

        let mut data = std::mem::take(&mut self.pending);
        data.extend_from_slice(bytes);

        let mut rest: &[u8] = &data;
        while !rest.is_empty() {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.push_text(text);
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    // Borrowed: `valid` is known-good UTF-8
                    self.push_text(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        None => {
                            self.pending = tail.to_vec();
                            break;
                        }
                        Some(len) => {
                            self.push_text("\u{FFFD}");
                            rest = &tail[len..];
                        }
                    }
                }
            }
        }
    }

    /// Append locally produced text (e.g. a submitted line).
    ///
    /// Held-back device bytes stay pending; local text does not complete or
    /// discard a split sequence.
    pub fn append_str(&mut self, text: &str) {
        self.appended_bytes += text.len() as u64;
        self.push_text(text);
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let mut parts = text.split('\n');
        if let (Some(first), Some(open)) = (parts.next(), self.lines.back_mut()) {
            open.push_str(first);
        }
        self.lines.extend(parts.map(str::to_string));

        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
            self.evicted_lines += 1;
        }
    }

    /// The retained transcript as a single string.
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }

    /// Retained logical lines, oldest first. Never empty.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn evicted_lines(&self) -> u64 {
        self.evicted_lines
    }

    /// Total bytes ever appended, including evicted and pending ones.
    pub fn appended_bytes(&self) -> u64 {
        self.appended_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.appended_bytes == 0
    }
}
