//! The command-line widget.
//!
//! `CommandLine` owns the typed text and reacts to the two notifications a
//! line-edit control produces:
//!
//! * text changed: the buffer is parsed again and every complete key token at
//!   its front is dispatched, so a burst like `3jdd` runs as two commands. The
//!   buffer keeps whatever could not be parsed yet (`d` waiting for a motion).
//!   Parsing stops as soon as a key hands focus to the editor; the rest of the
//!   burst stays in the buffer.
//! * return pressed: whole-line commands. `:` goes to the ex-command
//!   dispatcher, `!` and `/` `?` are recognised but not implemented. The buffer
//!   is emptied afterwards whatever it held.
//!
//! While the command line has focus a one-character block highlight
//! (`vim_cursor`) is laid over the editor cursor so the position stays visible.
//! Dispatch errors are logged and swallowed; nothing here is fatal.

use core_config::{Config, CursorConfig};
use core_host::{EditorHost, ExtraSelection};
use tracing::{debug, trace, warn};

use crate::dispatcher::{Dispatcher, Focus};
use crate::{DispatchError, key_parser};

/// Extra-selection key of the block cursor.
pub const CURSOR_SELECTION_KEY: &str = "vim_cursor";

pub struct CommandLine<H: EditorHost> {
    host: H,
    dispatcher: Dispatcher,
    buffer: String,
    focus: Focus,
    label: String,
    cursor_style: CursorConfig,
}

impl<H: EditorHost> CommandLine<H> {
    /// New widget attached to `host`. The editor holds focus until `focus_in`.
    pub fn new(host: H, config: &Config) -> Self {
        Self {
            host,
            dispatcher: Dispatcher::new(),
            buffer: String::new(),
            focus: Focus::Editor,
            label: config.file.commandline.label.clone(),
            cursor_style: config.file.cursor.clone(),
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    /// Replace the block-cursor colours; applied on the next refresh.
    pub fn set_cursor_style(&mut self, style: CursorConfig) {
        self.cursor_style = style;
        if self.focus == Focus::CommandLine {
            self.refresh_cursor();
        }
    }

    /// Text of the line edit changed to `text`.
    pub fn on_text_changed(&mut self, text: &str) {
        self.buffer = text.to_string();
        while self.focus == Focus::CommandLine {
            let Some(seq) = key_parser::parse(&self.buffer) else {
                break;
            };
            trace!(
                target: "actions.parse",
                repeat = seq.repeat,
                token = seq.token.as_str(),
                leftover = seq.leftover.as_str(),
                "key_sequence"
            );
            let result = self
                .dispatcher
                .dispatch_key(&mut self.host, &seq.token, seq.repeat);
            self.buffer = seq.leftover;
            match result {
                Ok(res) => self.apply_focus(res.focus),
                Err(err) => report(&err),
            }
        }
        if self.focus == Focus::CommandLine {
            self.refresh_cursor();
        }
    }

    /// Return pressed in the line edit.
    pub fn on_return(&mut self) {
        let text = std::mem::take(&mut self.buffer);
        let Some(kind) = text.chars().next() else {
            return;
        };
        let rest = &text[kind.len_utf8()..];
        match kind {
            ':' => match self.dispatcher.dispatch_command(&mut self.host, rest) {
                Ok(res) => self.apply_focus(res.focus),
                Err(err) => report(&err),
            },
            '!' => report(&DispatchError::NotImplemented(format!("shell command {rest:?}"))),
            '/' | '?' => report(&DispatchError::NotImplemented(format!("search {text:?}"))),
            _ => trace!(target: "actions.widget", discarded = text.as_str(), "return_discarded"),
        }
        if self.focus == Focus::CommandLine {
            self.refresh_cursor();
        }
    }

    /// The command line gained keyboard focus.
    pub fn focus_in(&mut self) {
        self.focus = Focus::CommandLine;
        self.buffer.clear();
        if let Some(ed) = self.host.current_editor() {
            ed.clear_focus();
        }
        self.refresh_cursor();
        debug!(target: "actions.widget", "focus_in");
    }

    /// The command line lost keyboard focus (to the editor).
    pub fn focus_out(&mut self) {
        self.focus = Focus::Editor;
        if let Some(ed) = self.host.current_editor() {
            ed.clear_extra_selections(CURSOR_SELECTION_KEY);
        }
        debug!(target: "actions.widget", "focus_out");
    }

    /// Escape shortcut: leave insert mode and start over with an empty command line.
    pub fn escape(&mut self) {
        trace!(target: "actions.widget", pending = self.buffer.as_str(), "escape");
        self.focus_in();
    }

    fn apply_focus(&mut self, focus: Focus) {
        if focus == Focus::Editor && self.focus == Focus::CommandLine {
            self.focus_out();
        }
    }

    fn refresh_cursor(&mut self) {
        let Some(ed) = self.host.current_editor() else {
            return;
        };
        if !self.cursor_style.block {
            ed.clear_extra_selections(CURSOR_SELECTION_KEY);
            return;
        }
        let start = ed.cursor().position;
        let end = (start + 1).min(ed.character_count());
        ed.set_extra_selections(
            CURSOR_SELECTION_KEY,
            vec![ExtraSelection {
                start,
                end,
                foreground: self.cursor_style.foreground.clone(),
                background: self.cursor_style.background.clone(),
            }],
        );
    }
}

fn report(err: &DispatchError) {
    if err.is_quiet() {
        debug!(target: "actions.widget", error = %err, "dispatch_rejected");
    } else {
        warn!(target: "actions.widget", error = %err, "dispatch_failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_host::{MemoryHost, TextEditor};
    use pretty_assertions::assert_eq;

    fn widget(text: &str) -> CommandLine<MemoryHost> {
        let host = MemoryHost::with_document("t", text).unwrap();
        let mut w = CommandLine::new(host, &Config::default());
        w.focus_in();
        w
    }

    fn type_keys(w: &mut CommandLine<MemoryHost>, keys: &str) {
        for ch in keys.chars() {
            let text = format!("{}{ch}", w.buffer());
            w.on_text_changed(&text);
        }
    }

    #[test]
    fn starts_unfocused_with_configured_label() {
        let host = MemoryHost::with_document("t", "").unwrap();
        let w = CommandLine::new(host, &Config::default());
        assert_eq!(w.focus(), Focus::Editor);
        assert_eq!(w.label(), "Vim:");
    }

    #[test]
    fn burst_runs_every_complete_token() {
        let mut w = widget("a\nb\nc\nd\n");
        w.on_text_changed("jjdd");
        assert_eq!(w.buffer(), "");
        assert_eq!(w.host().editor().unwrap().text(), "a\nb\nd\n");
    }

    #[test]
    fn incomplete_prefix_waits() {
        let mut w = widget("one two");
        type_keys(&mut w, "d");
        assert_eq!(w.buffer(), "d");
        type_keys(&mut w, "w");
        assert_eq!(w.buffer(), "");
        assert_eq!(w.host().editor().unwrap().text(), " two");
    }

    #[test]
    fn count_typed_one_char_at_a_time() {
        let lines: String = (0..12).map(|i| format!("{i}\n")).collect();
        let mut w = widget(&lines);
        type_keys(&mut w, "10j");
        assert_eq!(w.host().editor().unwrap().line_col(), (10, 0));
    }

    #[test]
    fn insert_key_stops_chain_and_keeps_rest() {
        let mut w = widget("abc");
        w.on_text_changed("ixyz");
        assert_eq!(w.focus(), Focus::Editor);
        assert_eq!(w.buffer(), "xyz");
        let ed = w.host().editor().unwrap();
        assert!(ed.has_focus());
        assert!(ed.extra_selections(CURSOR_SELECTION_KEY).is_empty());
    }

    #[test]
    fn escape_returns_to_command_line() {
        let mut w = widget("abc");
        w.on_text_changed("A");
        assert_eq!(w.focus(), Focus::Editor);
        w.escape();
        assert_eq!(w.focus(), Focus::CommandLine);
        assert_eq!(w.buffer(), "");
        assert!(!w.host().editor().unwrap().has_focus());
    }

    #[test]
    fn block_cursor_follows_motions() {
        let mut w = widget("abc");
        let sel = w.host().editor().unwrap().extra_selections(CURSOR_SELECTION_KEY)[0].clone();
        assert_eq!((sel.start, sel.end), (0, 1));
        assert_eq!(sel.background, "black");
        assert_eq!(sel.foreground, "white");
        w.on_text_changed("$");
        let sel = &w.host().editor().unwrap().extra_selections(CURSOR_SELECTION_KEY)[0];
        assert_eq!((sel.start, sel.end), (3, 3));
    }

    #[test]
    fn block_cursor_can_be_disabled() {
        let mut w = widget("abc");
        w.set_cursor_style(CursorConfig {
            block: false,
            ..CursorConfig::default()
        });
        assert!(
            w.host()
                .editor()
                .unwrap()
                .extra_selections(CURSOR_SELECTION_KEY)
                .is_empty()
        );
    }

    #[test]
    fn return_runs_ex_command_and_clears() {
        let mut w = widget("1\n2\n3\n");
        w.on_text_changed(":3");
        assert_eq!(w.buffer(), ":3");
        w.on_return();
        assert_eq!(w.buffer(), "");
        assert_eq!(w.host().editor().unwrap().line_col(), (2, 0));
    }

    #[test]
    fn shell_and_search_only_clear_buffer() {
        let mut w = widget("abc");
        for line in ["!ls", "/abc", "?abc"] {
            w.on_text_changed(line);
            w.on_return();
            assert_eq!(w.buffer(), "");
            assert_eq!(w.host().editor().unwrap().text(), "abc");
        }
        assert!(w.host().history().is_empty());
    }

    #[test]
    fn return_discards_pending_keys() {
        let mut w = widget("abc");
        w.on_text_changed("3d");
        w.on_return();
        assert_eq!(w.buffer(), "");
        assert_eq!(w.host().editor().unwrap().text(), "abc");
    }

    #[test]
    fn unknown_keys_are_consumed() {
        let mut w = widget("abc");
        w.on_text_changed("xl");
        assert_eq!(w.buffer(), "");
        assert_eq!(w.host().editor().unwrap().cursor().position, 1);
    }

    #[test]
    fn empty_return_is_ignored() {
        let mut w = widget("abc");
        w.on_return();
        assert_eq!(w.focus(), Focus::CommandLine);
    }
}
