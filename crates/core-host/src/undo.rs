use core_text::Buffer;
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

use crate::TextCursor;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Full-document snapshot taken before an edit.
#[derive(Clone)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    pub cursor: TextCursor,
    hash: u64,
}

#[derive(Default)]
pub struct UndoEngine {
    undo_stack: VecDeque<EditSnapshot>,
    snapshots_skipped: u64,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Record the pre-edit state. Identical consecutive states are stored once.
    pub fn push_snapshot(&mut self, cursor: TextCursor, buffer: &Buffer) {
        let current_hash = buffer_hash(buffer);
        if let Some(last) = self.undo_stack.back()
            && last.hash == current_hash
        {
            self.snapshots_skipped += 1;
            trace!(target: "host.undo", depth = self.undo_stack.len(), hash = current_hash, "snapshot_dedupe_skip");
            return;
        }
        self.undo_stack.push_back(EditSnapshot {
            buffer: buffer.clone(),
            cursor,
            hash: current_hash,
        });
        trace!(target: "host.undo", depth = self.undo_stack.len(), hash = current_hash, "push_snapshot");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.pop_front();
            trace!(target: "host.undo", "undo_stack_trimmed");
        }
    }

    pub fn pop(&mut self) -> Option<EditSnapshot> {
        let snap = self.undo_stack.pop_back();
        trace!(target: "host.undo", depth = self.undo_stack.len(), restored = snap.is_some(), "pop_snapshot");
        snap
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
    }
}

fn buffer_hash(buffer: &Buffer) -> u64 {
    let mut hasher = DefaultHasher::new();
    buffer.text().hash(&mut hasher);
    hasher.finish()
}
