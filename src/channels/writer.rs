//! Line-oriented print wrapper over a fan-out writer.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::channels::FanoutWriter;
use crate::error::OutputError;

/// Print handle bound one-to-one with a channel's fan-out writer.
///
/// Handles are cheap to clone and share the writer; concurrent callers on the
/// same channel serialize on its lock. Obtained from
/// [`Registry::get_output`](crate::Registry::get_output) — a handle always
/// refers to a channel that was configured at lookup time, so every operation
/// here performs real I/O (unlike [`Printer`](crate::Printer), which re-resolves
/// its channel on each call and degrades to a no-op).
#[derive(Clone)]
pub struct ChannelWriter {
    channel: String,
    inner: Arc<Mutex<FanoutWriter>>,
}

impl ChannelWriter {
    pub(crate) fn new(channel: String, inner: Arc<Mutex<FanoutWriter>>) -> Self {
        Self { channel, inner }
    }

    /// The channel identifier this handle prints to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Prints a value without a trailing line break.
    pub fn print(&self, value: impl fmt::Display) -> Result<(), OutputError> {
        self.inner.lock().write_text(&value.to_string())
    }

    /// Prints a value followed by a line break.
    pub fn println(&self, value: impl fmt::Display) -> Result<(), OutputError> {
        self.inner.lock().write_text(&format!("{value}\n"))
    }

    /// Prints an empty line.
    pub fn newline(&self) -> Result<(), OutputError> {
        self.inner.lock().write_text("\n")
    }

    /// Prints pre-formatted arguments, e.g. `writer.format(format_args!(...))`.
    pub fn format(&self, args: fmt::Arguments<'_>) -> Result<(), OutputError> {
        self.inner.lock().write_text(&args.to_string())
    }

    /// Flushes all sinks of the channel.
    pub fn flush(&self) -> Result<(), OutputError> {
        self.inner.lock().flush()
    }

    /// Closes the channel's sinks (no-op when the channel is permanent).
    pub fn close(&self) -> Result<(), OutputError> {
        self.inner.lock().close()
    }
}
