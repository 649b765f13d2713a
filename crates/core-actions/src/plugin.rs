//! Host plugin adapter.
//!
//! `VimPlugin` is what the editor application loads: it registers the
//! labelled command-line widget, binds the escape shortcut on the editor area
//! and forwards settings changes to the widget.

use anyhow::Result;
use core_config::Config;
use core_host::{EditorHost, Plugin, Registrar};
use tracing::{debug, info};

use crate::widget::CommandLine;

pub const PLUGIN_TITLE: &str = "Vim";

pub struct VimPlugin<H: EditorHost> {
    widget: CommandLine<H>,
    escape_shortcut: String,
}

impl<H: EditorHost> VimPlugin<H> {
    pub fn new(host: H, config: &Config) -> Self {
        Self {
            widget: CommandLine::new(host, config),
            escape_shortcut: config.file.commandline.escape_shortcut.clone(),
        }
    }

    pub fn widget(&self) -> &CommandLine<H> {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut CommandLine<H> {
        &mut self.widget
    }

    pub fn escape_shortcut(&self) -> &str {
        &self.escape_shortcut
    }
}

impl<H: EditorHost> Plugin for VimPlugin<H> {
    type Settings = Config;

    fn title(&self) -> &str {
        PLUGIN_TITLE
    }

    fn register(&mut self, registrar: &mut dyn Registrar) -> Result<()> {
        registrar.add_widget(self.widget.label());
        registrar.bind_shortcut(&self.escape_shortcut);
        info!(
            target: "actions.plugin",
            label = self.widget.label(),
            shortcut = self.escape_shortcut.as_str(),
            "plugin_registered"
        );
        Ok(())
    }

    fn apply_settings(&mut self, settings: &Config) {
        let file = &settings.file;
        self.widget.set_label(&file.commandline.label);
        self.widget.set_cursor_style(file.cursor.clone());
        self.escape_shortcut = file.commandline.escape_shortcut.clone();
        debug!(target: "actions.plugin", source = ?settings.path, "settings_applied");
    }

    fn on_shortcut(&mut self, shortcut: &str) {
        if shortcut == self.escape_shortcut {
            self.widget.escape();
        } else {
            debug!(target: "actions.plugin", shortcut, "shortcut_ignored");
        }
    }
}
