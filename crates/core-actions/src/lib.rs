//! Vim-style command line: key-sequence parsing and command dispatch.
//!
//! Layers, bottom-up:
//! - `key_parser`: splits the command-line text into `(repeat, token, leftover)`.
//! - `symbols`: spells punctuation tokens out (`$` -> `DOLLAR`) for registry lookup.
//! - `dispatcher`: the key and ex-command registries and their handlers, all of
//!   which act on the host through `core_host::EditorHost`.
//! - `widget`: `CommandLine`, which owns the typed text and drives the two
//!   layers above from text-changed / return-pressed notifications.
//! - `plugin`: `VimPlugin`, the adapter the host application loads.
//!
//! Logging targets: `actions.parse`, `actions.dispatch`, `actions.command`,
//! `actions.widget`, `actions.plugin`.

pub mod dispatcher;
mod error;
pub mod key_parser;
pub mod plugin;
pub mod symbols;
pub mod widget;

pub use dispatcher::{DispatchResult, Dispatcher, Focus};
pub use error::DispatchError;
pub use key_parser::{KeySequence, MAX_REPEAT};
pub use plugin::VimPlugin;
pub use widget::{CURSOR_SELECTION_KEY, CommandLine};
