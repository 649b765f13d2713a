//! `u`: repeated undo.

use core_host::EditorHost;
use tracing::trace;

use super::{DispatchResult, editor};
use crate::DispatchError;

/// Undo exactly `n` discrete steps; `n == 0` does nothing.
pub(super) fn undo(host: &mut dyn EditorHost, n: u32) -> Result<DispatchResult, DispatchError> {
    let ed = editor(host)?;
    for _ in 0..n {
        ed.undo();
    }
    trace!(target: "actions.dispatch", op = "undo", steps = n, "undo");
    Ok(DispatchResult::command_line())
}
