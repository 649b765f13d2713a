//! vimline entrypoint.
//!
//! Headless host for the Vim command line: documents live in a `MemoryHost`,
//! and stdin stands in for the keyboard. Each input line is typed into
//! whichever widget has focus:
//!
//! - command line: characters are typed one at a time, then return is
//!   pressed. If a key hands focus to the editor mid-line, the rest of the line
//!   is inserted as text and return is not pressed.
//! - editor: the line is inserted followed by a newline; a line reading
//!   `<Esc>` fires the escape shortcut instead.
//!
//! After every line a status row is printed. The session ends at end of input
//! or once the last document is closed.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Focus, VimPlugin};
use core_config::load_from;
use core_host::{EditorHost, MemoryHost, Plugin, RecordingRegistrar};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "vimline.log";
const ESCAPE_LINE: &str = "<Esc>";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vimline", version, about = "Vim-style command line over an in-memory editor")]
struct Args {
    /// File to open at startup. If omitted an unsaved scratch document is used.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `vimline.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_host(path: Option<&Path>) -> Result<MemoryHost> {
    match path {
        Some(path) => {
            let mut host = MemoryHost::new();
            host.open_path(path)
                .with_context(|| format!("opening {}", path.display()))?;
            Ok(host)
        }
        None => MemoryHost::with_document("scratch", ""),
    }
}

/// Type one input line into the focused widget.
fn feed_line(plugin: &mut VimPlugin<MemoryHost>, line: &str) {
    if line == ESCAPE_LINE {
        let shortcut = plugin.escape_shortcut().to_string();
        plugin.on_shortcut(&shortcut);
        return;
    }
    let widget = plugin.widget_mut();
    if widget.focus() == Focus::Editor {
        insert_text(widget.host_mut(), &format!("{line}\n"));
        return;
    }
    for (idx, ch) in line.char_indices() {
        if widget.focus() == Focus::Editor {
            insert_text(widget.host_mut(), &line[idx..]);
            return;
        }
        let text = format!("{}{ch}", widget.buffer());
        widget.on_text_changed(&text);
    }
    if widget.focus() == Focus::CommandLine {
        widget.on_return();
    }
}

fn insert_text(host: &mut MemoryHost, text: &str) {
    if let Some(editor) = host.current_editor() {
        editor.insert_text(text);
    }
}

fn write_status(out: &mut impl Write, plugin: &VimPlugin<MemoryHost>) -> io::Result<()> {
    let widget = plugin.widget();
    let mode = match widget.focus() {
        Focus::CommandLine => "COMMAND",
        Focus::Editor => "INSERT",
    };
    match widget.host().editor() {
        Some(editor) => {
            let (line, col) = editor.line_col();
            writeln!(out, "{} {}:{} [{mode}]", editor.name(), line + 1, col + 1)
        }
        None => writeln!(out, "[no document]"),
    }
}

/// Drive the plugin from `input` until end of input or no document remains.
fn run_session(
    plugin: &mut VimPlugin<MemoryHost>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    plugin.widget_mut().focus_in();
    write_status(out, plugin)?;
    for line in input.lines() {
        let line = line.context("reading input")?;
        feed_line(plugin, &line);
        write_status(out, plugin)?;
        if plugin.widget().host().documents().is_empty() {
            info!(target: "runtime", "last_document_closed");
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let host = load_host(args.path.as_deref())?;

    let mut plugin = VimPlugin::new(host, &config);
    let mut registrar = RecordingRegistrar::default();
    plugin.register(&mut registrar)?;
    debug!(target: "runtime", widgets = ?registrar.widgets, shortcuts = ?registrar.shortcuts, "registered");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_session(&mut plugin, stdin.lock(), &mut out)?;

    plugin.closing(false);
    info!(target: "runtime", "shutdown");
    Ok(())
}
