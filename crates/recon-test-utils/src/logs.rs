//! Capture of warnings emitted while a closure runs
//!
//! Installs a thread-scoped `fmt` subscriber writing into memory, so tests
//! can assert on what would have been logged without touching the global
//! subscriber.

use std::io;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("SharedBuffer: log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Formatted log lines at WARN or above, one per event
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    lines: Vec<String>,
}

impl CapturedLogs {
    /// Lines logged at WARN level.
    pub fn warnings(&self) -> Vec<&str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.contains("WARN"))
            .collect()
    }

    /// Does any captured line contain `needle`?
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

/// Run `f`, returning its result and every WARN or ERROR event it logged.
///
/// ```
/// use recon_test_utils::logs::capture_warnings;
///
/// let ((), logs) = capture_warnings(|| tracing::warn!("disk is full"));
/// assert_eq!(logs.warnings().len(), 1);
/// assert!(logs.contains("disk is full"));
/// ```
pub fn capture_warnings<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let buffer = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer
        .0
        .lock()
        .expect("capture_warnings: log buffer poisoned")
        .clone();
    let lines = String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect();

    (result, CapturedLogs { lines })
}
