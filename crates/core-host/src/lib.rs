//! Host editor boundary.
//!
//! The command line never owns a document. Everything it does to text goes
//! through two traits implemented by the surrounding editor application:
//!
//! - `TextEditor`: the focused editable text widget (cursor, cut, undo, focus).
//! - `EditorHost`: the editor container, which hands out the focused
//!   `TextEditor` and triggers application level actions (save, close, ...).
//!
//! The plugin lifecycle the host imposes (title, registration, settings, close
//! hooks) is reduced to the `Plugin` / `Registrar` pair.
//!
//! `memory` provides a complete in-process implementation used by tests and by
//! the headless binary.

use std::fmt;

pub mod memory;
mod undo;

pub use memory::{MemoryDocument, MemoryEditor, MemoryHost, RecordingRegistrar};

/// Cursor inside a document expressed in absolute char offsets. `anchor == position`
/// means no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextCursor {
    pub position: usize,
    pub anchor: usize,
}

impl TextCursor {
    pub fn at(position: usize) -> Self {
        Self {
            position,
            anchor: position,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.position != self.anchor
    }

    /// Selected range as `(start, end)` with `start <= end`.
    pub fn selection(&self) -> (usize, usize) {
        (
            self.position.min(self.anchor),
            self.position.max(self.anchor),
        )
    }
}

/// Unit a cursor can be moved by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOperation {
    Left,
    Right,
    Up,
    Down,
    NextWord,
    EndOfWord,
    StartOfLine,
    EndOfLine,
}

/// Whether a move drags the anchor along (`MoveAnchor`) or extends the selection (`KeepAnchor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    MoveAnchor,
    KeepAnchor,
}

/// Cosmetic highlight laid over a char range, keyed by owner name on the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSelection {
    pub start: usize,
    pub end: usize,
    pub foreground: String,
    pub background: String,
}

/// Editable text widget handle.
pub trait TextEditor {
    fn cursor(&self) -> TextCursor;
    fn set_cursor(&mut self, cursor: TextCursor);
    /// Move the cursor `count` times. Stops at the first step that cannot be
    /// performed and returns `false` in that case.
    fn move_cursor(&mut self, op: MoveOperation, mode: MoveMode, count: usize) -> bool;
    /// Insert at the cursor, replacing any selection.
    fn insert_text(&mut self, text: &str);
    /// Remove the selection and place it on the clipboard. No-op without a selection.
    fn cut(&mut self);
    /// Revert one edit step.
    fn undo(&mut self);
    /// Give this widget keyboard focus.
    fn set_focus(&mut self);
    fn clear_focus(&mut self) {}
    /// Jump to a 1-based line number.
    fn go_to_line(&mut self, line: usize);
    fn character_count(&self) -> usize;
    fn set_extra_selections(&mut self, key: &str, selections: Vec<ExtraSelection>);
    fn clear_extra_selections(&mut self, key: &str);
}

/// Application level actions the host can trigger on the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Save,
    Close,
    New,
    /// Show the open-file dialog.
    Open,
    /// Re-read the current file from disk without confirmation.
    Reload,
}

impl fmt::Display for HostAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HostAction::Save => "save",
            HostAction::Close => "close",
            HostAction::New => "new",
            HostAction::Open => "open",
            HostAction::Reload => "reload",
        };
        f.write_str(name)
    }
}

/// Editor container the command line is attached to.
pub trait EditorHost {
    /// Currently focused document, if any is open.
    fn current_editor(&mut self) -> Option<&mut dyn TextEditor>;
    fn trigger(&mut self, action: HostAction) -> anyhow::Result<()>;
}

impl<T: EditorHost + ?Sized> EditorHost for &mut T {
    fn current_editor(&mut self) -> Option<&mut dyn TextEditor> {
        (**self).current_editor()
    }
    fn trigger(&mut self, action: HostAction) -> anyhow::Result<()> {
        (**self).trigger(action)
    }
}

/// Sink for the registrations a plugin performs when it is installed.
pub trait Registrar {
    /// Lay out a widget with the given label below the editor.
    fn add_widget(&mut self, label: &str);
    /// Route a keyboard shortcut back to `Plugin::on_shortcut`.
    fn bind_shortcut(&mut self, shortcut: &str);
}

/// Lifecycle hooks the host calls on an installed plugin.
pub trait Plugin {
    type Settings;

    fn title(&self) -> &str;
    fn icon(&self) -> Option<&str> {
        None
    }
    fn register(&mut self, registrar: &mut dyn Registrar) -> anyhow::Result<()>;
    fn apply_settings(&mut self, settings: &Self::Settings);
    fn actions(&self) -> Vec<String> {
        Vec::new()
    }
    fn refresh(&mut self) {}
    /// Return `false` to veto closing the main window.
    fn closing(&mut self, _cancelable: bool) -> bool {
        true
    }
    fn on_shortcut(&mut self, shortcut: &str);
}
