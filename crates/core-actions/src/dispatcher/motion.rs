//! Cursor movement keys.
//!
//! Counted motions stop at the first step that cannot be taken (document
//! edge); the partial movement is kept. Reaching an edge is not an error.

use core_host::{EditorHost, MoveMode, MoveOperation};
use tracing::trace;

use super::{DispatchResult, editor};
use crate::DispatchError;

fn move_by(
    host: &mut dyn EditorHost,
    op: MoveOperation,
    count: u32,
) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    let completed = ed.move_cursor(op, MoveMode::MoveAnchor, count as usize);
    trace!(target: "actions.dispatch", op = ?op, count, completed, "motion");
    Ok(DispatchResult::command_line())
}

pub(super) fn left(host: &mut dyn EditorHost, n: u32) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::Left, n)
}

pub(super) fn right(host: &mut dyn EditorHost, n: u32) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::Right, n)
}

pub(super) fn up(host: &mut dyn EditorHost, n: u32) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::Up, n)
}

pub(super) fn down(host: &mut dyn EditorHost, n: u32) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::Down, n)
}

pub(super) fn next_word(
    host: &mut dyn EditorHost,
    n: u32,
) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::NextWord, n)
}

/// `$`: the count is accepted and ignored.
pub(super) fn line_end(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::EndOfLine, 1)
}

pub(super) fn line_start(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    move_by(host, MoveOperation::StartOfLine, 1)
}
