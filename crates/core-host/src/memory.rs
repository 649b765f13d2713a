//! In-process host: rope-backed editors and a document stack with disk IO.
//!
//! Behaves like a minimal editor application. Save and reload go to the
//! file system synchronously; the open-file dialog is replaced by a queue of
//! paths so scripted sessions and tests can answer it.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use core_text::{Buffer, Position, motion};
use tracing::{debug, info};

use crate::undo::UndoEngine;
use crate::{
    EditorHost, ExtraSelection, HostAction, MoveMode, MoveOperation, Registrar, TextCursor,
    TextEditor,
};

/// Editable document held entirely in memory.
pub struct MemoryEditor {
    buffer: Buffer,
    cursor: TextCursor,
    undo: UndoEngine,
    clipboard: Option<String>,
    focused: bool,
    extra_selections: BTreeMap<String, Vec<ExtraSelection>>,
}

impl MemoryEditor {
    pub fn new(name: &str, content: &str) -> Result<Self> {
        Ok(Self {
            buffer: Buffer::from_str(name, content)?,
            cursor: TextCursor::default(),
            undo: UndoEngine::new(),
            clipboard: None,
            focused: false,
            extra_selections: BTreeMap::new(),
        })
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn name(&self) -> &str {
        &self.buffer.name
    }

    /// Zero-based (line, char column) of the cursor.
    pub fn line_col(&self) -> (usize, usize) {
        let pos = self.buffer.char_to_position(self.cursor.position);
        let line_start = self.buffer.position_to_char(Position::new(pos.line, 0));
        (pos.line, self.cursor.position - line_start)
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.depth()
    }

    pub fn extra_selections(&self, key: &str) -> &[ExtraSelection] {
        self.extra_selections
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace the whole content (file reload). Clears undo history and clamps the cursor.
    pub fn replace_content(&mut self, content: &str) -> Result<()> {
        let name = self.buffer.name.clone();
        self.buffer = Buffer::from_str(name, content)?;
        self.undo.clear();
        let position = self.cursor.position.min(self.buffer.len_chars());
        self.cursor = TextCursor::at(position);
        Ok(())
    }

    fn step(&self, op: MoveOperation, pos: &mut Position, sticky: &mut Option<usize>) -> bool {
        let buf = &self.buffer;
        match op {
            MoveOperation::Left => motion::left(buf, pos),
            MoveOperation::Right => motion::right(buf, pos),
            MoveOperation::Up => match motion::up(buf, pos, *sticky) {
                Some(col) => {
                    *sticky = Some(col);
                    true
                }
                None => false,
            },
            MoveOperation::Down => match motion::down(buf, pos, *sticky) {
                Some(col) => {
                    *sticky = Some(col);
                    true
                }
                None => false,
            },
            MoveOperation::NextWord => motion::word_forward(buf, pos),
            MoveOperation::EndOfWord => motion::word_end(buf, pos),
            MoveOperation::StartOfLine => motion::line_start(buf, pos),
            MoveOperation::EndOfLine => motion::line_end(buf, pos),
        }
    }
}

impl TextEditor for MemoryEditor {
    fn cursor(&self) -> TextCursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: TextCursor) {
        let len = self.buffer.len_chars();
        self.cursor = TextCursor {
            position: cursor.position.min(len),
            anchor: cursor.anchor.min(len),
        };
    }

    fn move_cursor(&mut self, op: MoveOperation, mode: MoveMode, count: usize) -> bool {
        let mut pos = self.buffer.char_to_position(self.cursor.position);
        let mut sticky = None;
        let mut completed = true;
        for _ in 0..count {
            if !self.step(op, &mut pos, &mut sticky) {
                completed = false;
                break;
            }
        }
        self.cursor.position = self.buffer.position_to_char(pos);
        if mode == MoveMode::MoveAnchor {
            self.cursor.anchor = self.cursor.position;
        }
        completed
    }

    fn insert_text(&mut self, text: &str) {
        self.undo.push_snapshot(self.cursor, &self.buffer);
        let (start, end) = self.cursor.selection();
        self.buffer.remove_chars(start, end);
        let inserted = self.buffer.insert_at(start, text);
        self.cursor = TextCursor::at(start + inserted);
    }

    fn cut(&mut self) {
        if !self.cursor.has_selection() {
            return;
        }
        self.undo.push_snapshot(self.cursor, &self.buffer);
        let (start, end) = self.cursor.selection();
        let removed = self.buffer.remove_chars(start, end);
        debug!(target: "host.editor", chars = end - start, "cut");
        self.clipboard = Some(removed);
        self.cursor = TextCursor::at(start);
    }

    fn undo(&mut self) {
        if let Some(snapshot) = self.undo.pop() {
            self.buffer = snapshot.buffer;
            self.cursor = snapshot.cursor;
        }
    }

    fn set_focus(&mut self) {
        self.focused = true;
    }

    fn clear_focus(&mut self) {
        self.focused = false;
    }

    fn go_to_line(&mut self, line: usize) {
        let last = self.buffer.line_count().saturating_sub(1);
        let target = line.saturating_sub(1).min(last);
        self.cursor = TextCursor::at(self.buffer.position_to_char(Position::new(target, 0)));
    }

    fn character_count(&self) -> usize {
        self.buffer.len_chars()
    }

    fn set_extra_selections(&mut self, key: &str, selections: Vec<ExtraSelection>) {
        self.extra_selections.insert(key.to_string(), selections);
    }

    fn clear_extra_selections(&mut self, key: &str) {
        self.extra_selections.remove(key);
    }
}

/// An open document: an editor plus the file it was loaded from, if any.
pub struct MemoryDocument {
    pub path: Option<PathBuf>,
    pub editor: MemoryEditor,
}

/// Editor container holding a stack of documents, one of which is current.
#[derive(Default)]
pub struct MemoryHost {
    documents: Vec<MemoryDocument>,
    current: Option<usize>,
    open_queue: VecDeque<PathBuf>,
    history: Vec<HostAction>,
    untitled: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with one unsaved document.
    pub fn with_document(name: &str, content: &str) -> Result<Self> {
        let mut host = Self::new();
        host.push_document(None, name, content)?;
        Ok(host)
    }

    /// Read `path` from disk and make it the current document.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        debug!(target: "host.io", file = %path.display(), size_bytes = content.len(), "file_read_ok");
        self.push_document(Some(path.to_path_buf()), &name, &content)
    }

    /// Answer the next open-file dialog with `path`.
    pub fn queue_open(&mut self, path: impl Into<PathBuf>) {
        self.open_queue.push_back(path.into());
    }

    /// Actions triggered so far, in order.
    pub fn history(&self) -> &[HostAction] {
        &self.history
    }

    pub fn documents(&self) -> &[MemoryDocument] {
        &self.documents
    }

    pub fn current_document(&self) -> Option<&MemoryDocument> {
        self.current.and_then(|i| self.documents.get(i))
    }

    pub fn editor(&self) -> Option<&MemoryEditor> {
        self.current_document().map(|d| &d.editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut MemoryEditor> {
        let idx = self.current?;
        self.documents.get_mut(idx).map(|d| &mut d.editor)
    }

    fn push_document(&mut self, path: Option<PathBuf>, name: &str, content: &str) -> Result<()> {
        let editor = MemoryEditor::new(name, content)?;
        self.documents.push(MemoryDocument { path, editor });
        self.current = Some(self.documents.len() - 1);
        Ok(())
    }

    fn current_index(&self) -> Result<usize> {
        self.current.ok_or_else(|| anyhow!("no document open"))
    }

    fn save(&mut self) -> Result<()> {
        let doc = &self.documents[self.current_index()?];
        let Some(path) = doc.path.as_ref() else {
            bail!("no file name for {}", doc.editor.name());
        };
        let text = doc.editor.text();
        std::fs::write(path, text.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        info!(target: "host.io", file = %path.display(), size_bytes = text.len(), "file_written");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let idx = self.current_index()?;
        let doc = self.documents.remove(idx);
        debug!(target: "host.io", name = doc.editor.name(), "document_closed");
        self.current = match self.documents.len() {
            0 => None,
            len => Some(idx.min(len - 1)),
        };
        Ok(())
    }

    fn new_document(&mut self) -> Result<()> {
        self.untitled += 1;
        let name = format!("untitled{}", self.untitled);
        self.push_document(None, &name, "")
    }

    fn open(&mut self) -> Result<()> {
        match self.open_queue.pop_front() {
            Some(path) => self.open_path(&path),
            None => {
                info!(target: "host.io", "open_dialog_cancelled");
                Ok(())
            }
        }
    }

    fn reload(&mut self) -> Result<()> {
        let idx = self.current_index()?;
        let doc = &mut self.documents[idx];
        let Some(path) = doc.path.as_ref() else {
            bail!("{} has never been saved", doc.editor.name());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reloading {}", path.display()))?;
        doc.editor.replace_content(&content)?;
        info!(target: "host.io", file = %path.display(), "file_reloaded");
        Ok(())
    }
}

impl EditorHost for MemoryHost {
    fn current_editor(&mut self) -> Option<&mut dyn TextEditor> {
        let idx = self.current?;
        self.documents
            .get_mut(idx)
            .map(|d| &mut d.editor as &mut dyn TextEditor)
    }

    fn trigger(&mut self, action: HostAction) -> Result<()> {
        self.history.push(action);
        match action {
            HostAction::Save => self.save(),
            HostAction::Close => self.close(),
            HostAction::New => self.new_document(),
            HostAction::Open => self.open(),
            HostAction::Reload => self.reload(),
        }
    }
}

/// Registrar that just remembers what was registered.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    pub widgets: Vec<String>,
    pub shortcuts: Vec<String>,
}

impl Registrar for RecordingRegistrar {
    fn add_widget(&mut self, label: &str) {
        debug!(target: "host.plugin", label, "widget_added");
        self.widgets.push(label.to_string());
    }

    fn bind_shortcut(&mut self, shortcut: &str) {
        debug!(target: "host.plugin", shortcut, "shortcut_bound");
        self.shortcuts.push(shortcut.to_string());
    }
}
