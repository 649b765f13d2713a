//! Dispatch of parsed key tokens and ex-command lines to host operations.
//!
//! Two closed registries are built once when a `Dispatcher` is created and
//! never change afterwards:
//! * keys: registry name (see `symbols::key_name`) -> handler taking the repeat count
//! * commands: ex-command name -> handler taking the argument string
//!
//! Sub-modules hold the handlers themselves:
//! * `motion`  - cursor movement
//! * `mode`    - insert-mode entry (focus moves to the editor)
//! * `edit`    - deletions through selection + cut
//! * `undo`    - repeated undo
//! * `command` - file actions (`:w`, `:q`, `ZZ`, ...)
//!
//! Every handler receives the host as `&mut dyn EditorHost` and reports which
//! widget should hold focus afterwards.

use std::collections::HashMap;

use core_host::{EditorHost, TextEditor};
use tracing::trace;

use crate::DispatchError;
use crate::symbols::key_name;
use command_parser::ParsedCommand;

mod command;
pub mod command_parser;
mod edit;
mod mode;
mod motion;
mod undo;

/// Widget that should hold keyboard focus after a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    CommandLine,
    Editor,
}

/// Result of dispatching a single key token or ex-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub focus: Focus,
}

impl DispatchResult {
    /// Keep (or return) focus on the command line.
    pub fn command_line() -> Self {
        Self {
            focus: Focus::CommandLine,
        }
    }
    /// Hand focus to the editor (insert mode).
    pub fn editor() -> Self {
        Self {
            focus: Focus::Editor,
        }
    }
}

pub type KeyHandler = fn(&mut dyn EditorHost, u32) -> Result<DispatchResult, DispatchError>;
pub type CommandHandler = fn(&mut dyn EditorHost, &str) -> Result<DispatchResult, DispatchError>;

const KEY_TABLE: &[(&str, KeyHandler)] = &[
    // Movement
    ("h", motion::left),
    ("j", motion::down),
    ("k", motion::up),
    ("l", motion::right),
    ("w", motion::next_word),
    ("SPACE", motion::right),
    ("DOLLAR", motion::line_end),
    ("ZERO", motion::line_start),
    // Insertion
    ("i", mode::insert_before),
    ("a", mode::insert_after),
    ("A", mode::append_line_end),
    ("o", mode::open_line_below),
    ("O", mode::open_line_above),
    // Editing
    ("u", undo::undo),
    ("dd", edit::delete_line),
    ("D", edit::delete_to_line_end),
    ("dw", edit::delete_word),
    // Files
    ("ZZ", command::save_and_close),
];

const COMMAND_TABLE: &[(&str, CommandHandler)] = &[
    ("w", command::write),
    ("q", command::quit),
    ("wq", command::write_quit),
    ("n", command::new_file),
    ("e", command::edit),
];

/// Owns the key and ex-command registries.
pub struct Dispatcher {
    keys: HashMap<&'static str, KeyHandler>,
    commands: HashMap<&'static str, CommandHandler>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            keys: KEY_TABLE.iter().copied().collect(),
            commands: COMMAND_TABLE.iter().copied().collect(),
        }
    }

    /// Registered key names, sorted.
    pub fn key_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.keys.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered ex-command names, sorted.
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run the handler registered for `token` with `repeat`.
    pub fn dispatch_key(
        &self,
        host: &mut dyn EditorHost,
        token: &str,
        repeat: u32,
    ) -> Result<DispatchResult, DispatchError> {
        if token.starts_with('_') {
            return Err(DispatchError::Private(token.to_string()));
        }
        let name = key_name(token);
        let Some(handler) = self.keys.get(name.as_str()) else {
            return Err(DispatchError::UnknownKey(name));
        };
        trace!(target: "actions.dispatch", key = name.as_str(), repeat, "dispatch_key");
        handler(host, repeat)
    }

    /// Run an ex-command line (the text after `:`).
    pub fn dispatch_command(
        &self,
        host: &mut dyn EditorHost,
        line: &str,
    ) -> Result<DispatchResult, DispatchError> {
        match command_parser::parse(line) {
            ParsedCommand::Ignored => {
                trace!(target: "actions.command", line, "command_ignored");
                Ok(DispatchResult::command_line())
            }
            ParsedCommand::GoToLine(number) => command::go_to_line(host, number),
            ParsedCommand::Named { name, args } => {
                let Some(handler) = self.commands.get(name) else {
                    return Err(DispatchError::UnknownCommand(name.to_string()));
                };
                trace!(target: "actions.command", name, args, "dispatch_command");
                handler(host, args)
            }
        }
    }
}

/// Focused editor or `NoEditor`.
fn editor(host: &mut dyn EditorHost) -> Result<&mut dyn TextEditor, DispatchError> {
    host.current_editor().ok_or(DispatchError::NoEditor)
}
