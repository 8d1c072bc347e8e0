//! The command line being edited.

use alloc::string::String;
use core::mem;

use crate::utf8::{count_chars, next_boundary, prev_boundary};

/// Text plus a cursor. The cursor is a byte offset that always sits on
/// a codepoint boundary.
///
/// Editing methods return `true` if they changed anything, so callers
/// know whether a redraw is needed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor as byte offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor as number of codepoints from the start of the line
    pub fn cursor_chars(&self) -> usize {
        count_chars(self.text.as_bytes(), 0, self.cursor)
    }

    fn set_cursor(&mut self, cursor: usize) -> bool {
        let moved = cursor != self.cursor;
        self.cursor = cursor;
        moved
    }

    /// Insert a codepoint at the cursor and move past it.
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Remove the codepoint before the cursor.
    pub fn erase_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let start = prev_boundary(self.text.as_bytes(), self.cursor);
        self.text.drain(start..self.cursor);
        self.cursor = start;

        true
    }

    /// Remove the codepoint under the cursor.
    pub fn erase_forward(&mut self) -> bool {
        if self.cursor == self.text.len() {
            return false;
        }

        let end = next_boundary(self.text.as_bytes(), self.cursor);
        self.text.drain(self.cursor..end);

        true
    }

    pub fn move_left(&mut self) -> bool {
        let pos = prev_boundary(self.text.as_bytes(), self.cursor);
        self.set_cursor(pos)
    }

    pub fn move_right(&mut self) -> bool {
        let pos = next_boundary(self.text.as_bytes(), self.cursor);
        self.set_cursor(pos)
    }

    /// Move to the start of the current or previous space-delimited word.
    pub fn move_word_left(&mut self) -> bool {
        let bytes = self.text.as_bytes();
        let mut pos = self.cursor;

        while pos > 0 && bytes[prev_boundary(bytes, pos)] == b' ' {
            pos = prev_boundary(bytes, pos);
        }

        while pos > 0 && bytes[prev_boundary(bytes, pos)] != b' ' {
            pos = prev_boundary(bytes, pos);
        }

        self.set_cursor(pos)
    }

    /// Move to the end of the current or next space-delimited word.
    pub fn move_word_right(&mut self) -> bool {
        let bytes = self.text.as_bytes();
        let mut pos = self.cursor;

        while pos < bytes.len() && bytes[pos] == b' ' {
            pos = next_boundary(bytes, pos);
        }

        while pos < bytes.len() && bytes[pos] != b' ' {
            pos = next_boundary(bytes, pos);
        }

        self.set_cursor(pos)
    }

    pub fn home(&mut self) -> bool {
        self.set_cursor(0)
    }

    pub fn end(&mut self) -> bool {
        self.set_cursor(self.text.len())
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the content, leaving the cursor at the end.
    pub fn set(&mut self, s: &str) {
        self.text.clear();
        self.text.push_str(s);
        self.cursor = self.text.len();
    }

    /// Take the content, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        mem::take(&mut self.text)
    }
}
