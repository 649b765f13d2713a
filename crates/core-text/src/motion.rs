//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of editor state.
//! Each helper returns `true` when the position moved so callers can stop a
//! repeated motion at the first step that fails, the way text-widget cursors do.

use crate::{Buffer, Position, grapheme};

/// Move left one grapheme boundary, wrapping to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) -> bool {
    if pos.byte == 0 {
        if pos.line == 0 {
            return false;
        }
        pos.line -= 1;
        pos.byte = buf.line_byte_len(pos.line);
        return true;
    }
    let content = buf.line_content(pos.line);
    pos.byte = grapheme::prev_boundary(&content, pos.byte);
    true
}

/// Move right one grapheme boundary, wrapping to the start of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) -> bool {
    let content = buf.line_content(pos.line);
    if pos.byte >= content.len() {
        if pos.line + 1 >= buf.line_count() {
            return false;
        }
        pos.line += 1;
        pos.byte = 0;
        return true;
    }
    pos.byte = grapheme::next_boundary(&content, pos.byte);
    true
}

/// Move to start of line.
pub fn line_start(_buf: &Buffer, pos: &mut Position) -> bool {
    pos.byte = 0;
    true
}

/// Move to end of line (after last grapheme).
pub fn line_end(buf: &Buffer, pos: &mut Position) -> bool {
    pos.byte = buf.line_byte_len(pos.line);
    true
}

/// Move up one line preserving a target visual column (sticky). Returns the updated sticky column,
/// or `None` when already on the first line (position untouched).
pub fn up(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    if pos.line == 0 {
        return None;
    }
    let col = sticky_col
        .unwrap_or_else(|| grapheme::visual_col(&buf.line_content(pos.line), pos.byte));
    pos.line -= 1;
    pos.byte = byte_for_visual_col(buf, pos.line, col);
    Some(col)
}

/// Move down one line preserving sticky visual column. `None` when already on the last line.
pub fn down(buf: &Buffer, pos: &mut Position, sticky_col: Option<usize>) -> Option<usize> {
    if pos.line + 1 >= buf.line_count() {
        return None;
    }
    let col = sticky_col
        .unwrap_or_else(|| grapheme::visual_col(&buf.line_content(pos.line), pos.byte));
    pos.line += 1;
    pos.byte = byte_for_visual_col(buf, pos.line, col);
    Some(col)
}

/// Convert a target visual column into a byte offset on a given line, clamping to line end.
fn byte_for_visual_col(buf: &Buffer, line: usize, target_col: usize) -> usize {
    let content = buf.line_content(line);
    let mut col = 0;
    let mut byte = 0;
    for (b, g) in unicode_segmentation::UnicodeSegmentation::grapheme_indices(content.as_str(), true)
    {
        let w = grapheme::cluster_width(g);
        if col + w > target_col {
            return b;
        }
        col += w;
        byte = b + g.len();
    }
    byte
}

/// Move forward to the start of the next word.
/// - On a word cluster: skip the rest of the word, then any non-word clusters.
/// - On whitespace / punctuation: skip until a word cluster.
/// - At end of line: continue on the next line. Stops at buffer end.
pub fn word_forward(buf: &Buffer, pos: &mut Position) -> bool {
    let start = *pos;
    let mut line = pos.line;
    let mut content = buf.line_content(line);
    let mut byte = pos.byte.min(content.len());
    if byte >= content.len() {
        if line + 1 >= buf.line_count() {
            return false;
        }
        line += 1;
        byte = 0;
        content = buf.line_content(line);
    }
    // If starting on a word char, skip the rest of this word first
    let next_b = grapheme::next_boundary(&content, byte);
    if next_b > byte && grapheme::is_word(&content[byte..next_b]) {
        let mut b = next_b;
        while b < content.len() {
            let nb = grapheme::next_boundary(&content, b);
            if !grapheme::is_word(&content[b..nb]) {
                break;
            }
            b = nb;
        }
        byte = b;
    }
    loop {
        if byte >= content.len() {
            if line + 1 >= buf.line_count() {
                pos.line = line;
                pos.byte = content.len();
                return *pos != start;
            }
            line += 1;
            byte = 0;
            content = buf.line_content(line);
            continue;
        }
        let nb = grapheme::next_boundary(&content, byte);
        if grapheme::is_word(&content[byte..nb]) {
            pos.line = line;
            pos.byte = byte;
            return *pos != start;
        }
        byte = nb;
    }
}

/// Move to the end of the current word, staying on the current line.
/// Leading blanks are skipped first, then one run of same-class clusters (word chars or
/// punctuation). Fails at end of line.
pub fn word_end(buf: &Buffer, pos: &mut Position) -> bool {
    let content = buf.line_content(pos.line);
    let mut byte = pos.byte.min(content.len());
    if byte >= content.len() {
        return false;
    }
    while byte < content.len() {
        let nb = grapheme::next_boundary(&content, byte);
        if !grapheme::is_blank(&content[byte..nb]) {
            break;
        }
        byte = nb;
    }
    if byte < content.len() {
        let nb = grapheme::next_boundary(&content, byte);
        let word = grapheme::is_word(&content[byte..nb]);
        byte = nb;
        while byte < content.len() {
            let nb = grapheme::next_boundary(&content, byte);
            let g = &content[byte..nb];
            if grapheme::is_blank(g) || grapheme::is_word(g) != word {
                break;
            }
            byte = nb;
        }
    }
    pos.byte = byte;
    true
}
