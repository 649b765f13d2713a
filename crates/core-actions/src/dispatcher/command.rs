//! File actions: the ex-commands (`:w`, `:q`, `:wq`, `:n`, `:e`, `:<line>`)
//! and the `ZZ` key.
//!
//! Everything here is delegated to host-level actions; failures come back as
//! `DispatchError::Host` with the host's own context attached. Focus always
//! stays on the command line.

use core_host::{EditorHost, HostAction};
use tracing::{debug, trace};

use super::{DispatchResult, editor};
use crate::DispatchError;

fn run(host: &mut dyn EditorHost, actions: &[HostAction]) -> Result<DispatchResult, DispatchError> {
    for &action in actions {
        // later actions are skipped once one fails (no close after a failed save)
        host.trigger(action)?;
        debug!(target: "actions.command", %action, "host_action");
    }
    Ok(DispatchResult::command_line())
}

/// `:w` (arguments are ignored).
pub(super) fn write(host: &mut dyn EditorHost, _args: &str) -> Result<DispatchResult, DispatchError> {
    run(host, &[HostAction::Save])
}

pub(super) fn quit(host: &mut dyn EditorHost, _args: &str) -> Result<DispatchResult, DispatchError> {
    run(host, &[HostAction::Close])
}

pub(super) fn write_quit(
    host: &mut dyn EditorHost,
    _args: &str,
) -> Result<DispatchResult, DispatchError> {
    run(host, &[HostAction::Save, HostAction::Close])
}

pub(super) fn new_file(
    host: &mut dyn EditorHost,
    _args: &str,
) -> Result<DispatchResult, DispatchError> {
    run(host, &[HostAction::New])
}

/// `:e` reloads the current file, `:e .` opens the file dialog. Explicit paths
/// are not supported.
pub(super) fn edit(host: &mut dyn EditorHost, args: &str) -> Result<DispatchResult, DispatchError> {
    match args {
        "" => run(host, &[HostAction::Reload]),
        "." => run(host, &[HostAction::Open]),
        other => Err(DispatchError::NotImplemented(format!("e {other}"))),
    }
}

/// `:<number>`: 1-based, clamping is left to the editor.
pub(super) fn go_to_line(
    host: &mut dyn EditorHost,
    line: usize,
) -> Result<DispatchResult, DispatchError> {
    editor(host)?.go_to_line(line);
    trace!(target: "actions.command", line, "go_to_line");
    Ok(DispatchResult::command_line())
}

/// `ZZ`: save then close the current document.
pub(super) fn save_and_close(
    host: &mut dyn EditorHost,
    _n: u32,
) -> Result<DispatchResult, DispatchError> {
    run(host, &[HostAction::Save, HostAction::Close])
}
