//! Configuration loading and parsing.
//!
//! Reads `vimline.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [commandline]
//! label = "Vim:"
//! escape_shortcut = "Esc"
//!
//! [cursor]
//! block = true
//! foreground = "white"
//! background = "black"
//! ```
//!
//! Every field has a default; unknown fields are ignored so the file can grow
//! without breaking older builds. A file that fails to parse is reported and
//! replaced by defaults rather than aborting startup.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vimline.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CommandLineConfig {
    #[serde(default = "CommandLineConfig::default_label")]
    pub label: String,
    /// Shortcut, bound on the editor area, that clears the command line and focuses it.
    #[serde(default = "CommandLineConfig::default_escape_shortcut")]
    pub escape_shortcut: String,
}

impl Default for CommandLineConfig {
    fn default() -> Self {
        Self {
            label: Self::default_label(),
            escape_shortcut: Self::default_escape_shortcut(),
        }
    }
}

impl CommandLineConfig {
    fn default_label() -> String {
        "Vim:".to_string()
    }
    fn default_escape_shortcut() -> String {
        "Esc".to_string()
    }
}

/// Block cursor drawn over the editor while the command line has focus.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CursorConfig {
    #[serde(default = "CursorConfig::default_block")]
    pub block: bool,
    #[serde(default = "CursorConfig::default_foreground")]
    pub foreground: String,
    #[serde(default = "CursorConfig::default_background")]
    pub background: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            block: Self::default_block(),
            foreground: Self::default_foreground(),
            background: Self::default_background(),
        }
    }
}

impl CursorConfig {
    const fn default_block() -> bool {
        true
    }
    fn default_foreground() -> String {
        "white".to_string()
    }
    fn default_background() -> String {
        "black".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub commandline: CommandLineConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub path: Option<PathBuf>, // file the values came from, if any
    pub file: ConfigFile,
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vimline").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl Write for LockedWriter<'_> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.path, None);
        assert_eq!(cfg.file.commandline.label, "Vim:");
        assert_eq!(cfg.file.commandline.escape_shortcut, "Esc");
        assert!(cfg.file.cursor.block);
        assert_eq!(cfg.file.cursor.foreground, "white");
        assert_eq!(cfg.file.cursor.background, "black");
    }

    #[test]
    fn parses_partial_sections() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[commandline]\nlabel = \"ex>\"\n[cursor]\nblock = false\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
        assert_eq!(cfg.file.commandline.label, "ex>");
        assert_eq!(cfg.file.commandline.escape_shortcut, "Esc");
        assert!(!cfg.file.cursor.block);
        assert_eq!(cfg.file.cursor.background, "black");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[future]\nanswer = 42\n[cursor]\nforeground = \"red\"\n")
            .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.cursor.foreground, "red");
    }

    #[test]
    fn parse_failure_falls_back_and_warns() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[commandline\nlabel = ").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || {
            load_from(Some(tmp.path().to_path_buf())).unwrap()
        });

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed"));
        assert_eq!(cfg.file, ConfigFile::default());
        assert_eq!(cfg.path, None);
    }
}
