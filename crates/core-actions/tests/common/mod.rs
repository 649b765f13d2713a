#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

use core_actions::CommandLine;
use core_config::Config;
use core_host::MemoryHost;
use tracing_subscriber::fmt::MakeWriter;

/// Command line attached to a single unsaved document, already focused.
pub fn command_line(text: &str) -> CommandLine<MemoryHost> {
    let host = MemoryHost::with_document("fixture", text).unwrap();
    focused(host)
}

pub fn focused(host: MemoryHost) -> CommandLine<MemoryHost> {
    let mut cl = CommandLine::new(host, &Config::default());
    cl.focus_in();
    cl
}

/// Type `keys` one character at a time, the way a line edit reports them.
pub fn type_keys(cl: &mut CommandLine<MemoryHost>, keys: &str) {
    for ch in keys.chars() {
        let text = format!("{}{ch}", cl.buffer());
        cl.on_text_changed(&text);
    }
}

/// Type a whole line and press return.
pub fn enter_line(cl: &mut CommandLine<MemoryHost>, line: &str) {
    type_keys(cl, line);
    cl.on_return();
}

pub fn text(cl: &CommandLine<MemoryHost>) -> String {
    cl.host().editor().unwrap().text()
}

pub fn line_col(cl: &CommandLine<MemoryHost>) -> (usize, usize) {
    cl.host().editor().unwrap().line_col()
}

#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl<'a> Write for LockedWriter<'a> {
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

/// Run `f` with a debug-level subscriber and return everything it logged.
pub fn capture_logs(f: impl FnOnce()) -> String {
    let (writer, buf) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.lock().expect("log buffer poisoned").clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
