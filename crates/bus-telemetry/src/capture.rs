//! In-memory log capture.
//!
//! A `MakeWriter` that appends formatted log lines to a shared buffer, for
//! tests that assert a server-side log entry was recorded.
//!
//! ```rust,ignore
//! let capture = LogCapture::new();
//! tracing::subscriber::with_default(capture.subscriber(), || {
//!     tracing::error!(property = "color", "Runaway error");
//! });
//! assert!(capture.contains("Runaway error"));
//! ```

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Shared buffer of formatted log output.
#[derive(Clone, Debug, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A subscriber writing every event at `TRACE` and above into this
    /// capture, without ANSI colours.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync {
        self.subscriber_at(LevelFilter::TRACE)
    }

    /// Same as [`subscriber`](Self::subscriber) with a level ceiling.
    pub fn subscriber_at(&self, level: LevelFilter) -> impl Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(level)
            .with_ansi(false)
            .with_target(true)
            .finish()
    }

    /// A subscriber writing one JSON object per event.
    pub fn json_subscriber(&self) -> impl Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .json()
            .with_writer(self.clone())
            .with_max_level(LevelFilter::TRACE)
            .finish()
    }

    /// Everything captured so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Writer handed out per event.
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}
