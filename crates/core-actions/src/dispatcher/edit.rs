//! Deletion keys (`dd`, `D`, `dw`).
//!
//! All three build a selection from the current cursor with anchor-keeping
//! moves and then hand it to the editor's cut, so the removed text lands on
//! the host clipboard and becomes one undo step. A move that hits the document
//! edge keeps the partial selection; an empty selection cuts nothing.

use core_host::{EditorHost, MoveMode, MoveOperation, TextEditor};
use tracing::trace;

use super::{DispatchResult, editor};
use crate::DispatchError;

fn cut_selection(ed: &mut dyn TextEditor, key: &'static str) -> DispatchResult {
    let (start, end) = ed.cursor().selection();
    trace!(target: "actions.dispatch", key, start, end, "cut_selection");
    ed.cut();
    DispatchResult::command_line()
}

/// `dd`: whole lines from the start of the current one, `n` line breaks down.
pub(super) fn delete_line(
    host: &mut dyn EditorHost,
    n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::StartOfLine, MoveMode::MoveAnchor, 1);
    ed.move_cursor(MoveOperation::Down, MoveMode::KeepAnchor, n as usize);
    Ok(cut_selection(ed, "dd"))
}

/// `D`: to the end of the line, extended `n - 1` further lines down.
pub(super) fn delete_to_line_end(
    host: &mut dyn EditorHost,
    n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::EndOfLine, MoveMode::KeepAnchor, 1);
    ed.move_cursor(
        MoveOperation::Down,
        MoveMode::KeepAnchor,
        n.saturating_sub(1) as usize,
    );
    Ok(cut_selection(ed, "D"))
}

/// `dw`: through the end of the `n`th word on the current line.
pub(super) fn delete_word(
    host: &mut dyn EditorHost,
    n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::EndOfWord, MoveMode::KeepAnchor, n as usize);
    Ok(cut_selection(ed, "dw"))
}
