//! # InputField
//!
//! The single line of text being composed for transmission, plus the
//! line-editor contract ([`Edit`]) that key presses are translated into.
//!
//! The cursor is a byte offset into `buffer` and always sits on a UTF-8 char
//! boundary.

/// A single editing operation on the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    /// Pasted text. Line breaks are dropped: the field holds one line.
    InsertStr(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    DeleteToStart,
    DeleteToEnd,
    DeleteWordBackward,
}

#[derive(Debug, Default)]
pub struct InputField {
    buffer: String,
    cursor: usize,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Clear the field, returning what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    /// Apply an edit. Returns `true` if the buffer or cursor changed.
    pub fn apply(&mut self, edit: Edit) -> bool {
        match edit {
            Edit::Insert(c) => {
                if matches!(c, '\n' | '\r') {
                    return false;
                }
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            Edit::InsertStr(text) => {
                let text: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
                if text.is_empty() {
                    return false;
                }
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                true
            }
            Edit::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                true
            }
            Edit::Delete => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                true
            }
            Edit::Left => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                true
            }
            Edit::Right => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                true
            }
            Edit::Home => (self.cursor != 0).then(|| self.cursor = 0).is_some(),
            Edit::End => {
                let end = self.buffer.len();
                (self.cursor != end).then(|| self.cursor = end).is_some()
            }
            Edit::DeleteToStart => {
                if self.cursor == 0 {
                    return false;
                }
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
                true
            }
            Edit::DeleteToEnd => {
                if self.cursor >= self.buffer.len() {
                    return false;
                }
                self.buffer.truncate(self.cursor);
                true
            }
            Edit::DeleteWordBackward => {
                if self.cursor == 0 {
                    return false;
                }
                let start = prev_word_boundary(&self.buffer, self.cursor);
                self.buffer.drain(start..self.cursor);
                self.cursor = start;
                true
            }
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Skip non-word characters backwards, then the word before them
/// (readline `backward-kill-word`).
fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = chars.peek().map(|&(i, c)| i + c.len_utf8()).unwrap_or(0);
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}
