//! Insert-mode entry keys.
//!
//! Each one places the cursor and hands focus to the editor, which ends
//! command-line mode until the escape shortcut brings focus back. The repeat
//! count is ignored.

use core_host::{EditorHost, MoveMode, MoveOperation, TextEditor};
use tracing::trace;

use super::{DispatchResult, editor};
use crate::DispatchError;

fn enter_insert(ed: &mut dyn TextEditor, key: &'static str) -> DispatchResult {
    ed.set_focus();
    trace!(target: "actions.dispatch", key, position = ed.cursor().position, "insert_mode");
    DispatchResult::editor()
}

pub(super) fn insert_before(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    Ok(enter_insert(editor(host)?, "i"))
}

pub(super) fn insert_after(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::Right, MoveMode::MoveAnchor, 1);
    Ok(enter_insert(ed, "a"))
}

pub(super) fn append_line_end(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::EndOfLine, MoveMode::MoveAnchor, 1);
    Ok(enter_insert(ed, "A"))
}

pub(super) fn open_line_below(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::EndOfLine, MoveMode::MoveAnchor, 1);
    ed.insert_text("\n");
    Ok(enter_insert(ed, "o"))
}

pub(super) fn open_line_above(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    ed.move_cursor(MoveOperation::StartOfLine, MoveMode::MoveAnchor, 1);
    ed.insert_text("\n");
    ed.move_cursor(MoveOperation::Up, MoveMode::MoveAnchor, 1);
    Ok(enter_insert(ed, "O"))
}
