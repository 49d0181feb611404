//! In-memory capture sink.
//!
//! [`MemoryBuffer`] is a cloneable handle to shared bytes; every clone sees
//! the same contents. It doubles as an [`io::Write`] so it can be passed to
//! console redirection, and as the backing store of [`MemorySink`].

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Sink, SinkBuilder};
use crate::error::OutputError;

/// Shared, cloneable text capture buffer.
#[derive(Clone, Default)]
pub struct MemoryBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl MemoryBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured bytes as text (lossy on invalid UTF-8).
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// True if nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Write for MemoryBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sink appending to a [`MemoryBuffer`].
pub struct MemorySink {
    buffer: MemoryBuffer,
}

impl MemorySink {
    pub fn new(buffer: MemoryBuffer) -> Self {
        Self { buffer }
    }
}

impl Sink for MemorySink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.buffer.inner.lock().extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        // The buffer is shared with whoever inspects it; keep it alive.
        Ok(())
    }
}

/// Builder producing [`MemorySink`]s over one shared buffer.
#[derive(Clone)]
pub struct MemorySinkBuilder {
    buffer: MemoryBuffer,
}

impl MemorySinkBuilder {
    pub fn new(buffer: MemoryBuffer) -> Self {
        Self { buffer }
    }
}

impl SinkBuilder for MemorySinkBuilder {
    fn build(&self) -> Result<Box<dyn Sink>, OutputError> {
        Ok(Box::new(MemorySink::new(self.buffer.clone())))
    }
}
