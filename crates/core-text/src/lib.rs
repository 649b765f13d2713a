//! Rope-based text buffer backing the in-memory editor.
//!
//! Two coordinate systems coexist here. `Position` (line, byte-in-line) is what
//! the motion helpers work in; absolute char offsets are what editor cursors
//! and selections are expressed in. `Buffer` converts between the two.

use anyhow::Result;
use ropey::Rope;

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
/// Byte offsets always sit on grapheme boundaries once produced by `motion` helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

pub mod motion;

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of chars in the buffer (newlines included).
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Return the requested line as an owned `String` (including trailing newline if present).
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx < self.rope.len_lines() {
            Some(self.rope.line(idx).to_string())
        } else {
            None
        }
    }

    /// Line content without its trailing newline. Empty for out of range lines.
    pub fn line_content(&self, idx: usize) -> String {
        let Some(mut s) = self.line(idx) else {
            return String::new();
        };
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Byte length of a line (excluding any newline) for clamping purposes.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        if idx >= self.rope.len_lines() {
            return 0;
        }
        self.line_content(idx).len()
    }

    /// Convert a line/byte position into an absolute char offset. Out of range
    /// positions clamp to the nearest valid offset.
    pub fn position_to_char(&self, pos: Position) -> usize {
        if pos.line >= self.line_count() {
            return self.rope.len_chars();
        }
        let content = self.line_content(pos.line);
        let mut byte = pos.byte.min(content.len());
        while !content.is_char_boundary(byte) {
            byte -= 1;
        }
        self.rope.line_to_char(pos.line) + content[..byte].chars().count()
    }

    /// Convert an absolute char offset (clamped to the buffer length) into a position.
    pub fn char_to_position(&self, char_idx: usize) -> Position {
        let char_idx = char_idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(char_idx);
        let within = char_idx - self.rope.line_to_char(line);
        let byte = self
            .line_content(line)
            .char_indices()
            .nth(within)
            .map(|(b, _)| b)
            .unwrap_or_else(|| self.line_byte_len(line));
        Position { line, byte }
    }

    /// Insert `text` at an absolute char offset (clamped). Returns the number of chars inserted.
    pub fn insert_at(&mut self, char_idx: usize, text: &str) -> usize {
        let at = char_idx.min(self.rope.len_chars());
        self.rope.insert(at, text);
        text.chars().count()
    }

    /// Remove the chars in `[start, end)` (clamped) and return them.
    pub fn remove_chars(&mut self, start: usize, end: usize) -> String {
        let total = self.rope.len_chars();
        let (s, e) = (start.min(total), end.min(total));
        if s >= e {
            return String::new();
        }
        let removed = self.rope.slice(s..e).to_string();
        self.rope.remove(s..e);
        removed
    }

    /// Whole buffer contents.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

/// Grapheme helpers. These are pure and operate on a single line.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    /// Previous grapheme boundary (returns 0 if already at or below 1st boundary).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 || byte > line.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns line.len() if at or beyond end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Compute visual column (terminal cells) up to (but not including) byte offset.
    pub fn visual_col(line: &str, byte: usize) -> usize {
        let mut col = 0;
        for (idx, g) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            col += cluster_width(g);
        }
        col
    }

    /// Width in cells of this grapheme cluster (never below one).
    pub fn cluster_width(g: &str) -> usize {
        g.width().max(1)
    }

    /// Naive word classification: alphanumeric or underscore start.
    pub fn is_word(g: &str) -> bool {
        g.chars()
            .next()
            .map(|c| c == '_' || c.is_alphanumeric())
            .unwrap_or(false)
    }

    pub fn is_blank(g: &str) -> bool {
        g.chars().all(char::is_whitespace)
    }
}
