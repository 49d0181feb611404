//! # Sinks: single output destinations.
//!
//! A [`Sink`] accepts contiguous blocks of text and can be flushed and closed.
//! A [`SinkBuilder`] is a recorded recipe for producing a sink; fan-out writers
//! keep builders around and materialize the actual sinks lazily on first use.
//!
//! ## Variants
//! - [`ConsoleSink`] — process stdout/stderr, or an arbitrary redirected
//!   writer. Closing is always a no-op: console streams are shared,
//!   long-lived process resources.
//! - [`FileSink`] — a file at a (possibly late-bound) path, append or
//!   truncate. Closed when its owning channel closes.
//! - [`MemorySink`] — shared in-memory capture buffer, mainly for tests.
//!
//! Sinks are exclusively owned by their fan-out writer; no sink instance is
//! ever shared between two writers (the *buffer* behind a memory or redirected
//! console sink may be, by design).

mod console;
mod file;
mod memory;

pub use console::{ConsoleSink, ConsoleSinkBuilder, ConsoleTarget, SharedWriter};
pub use file::{FileSink, FileSinkBuilder, PathSource};
pub use memory::{MemoryBuffer, MemorySink, MemorySinkBuilder};

use std::io;

use crate::error::OutputError;

/// A single destination capable of accepting text.
///
/// Implementations report plain [`io::Error`]s; the owning channel wraps them
/// with its identifier.
pub trait Sink: Send {
    /// Writes a contiguous block of text to the destination.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Flushes any OS-level buffering.
    fn flush(&mut self) -> io::Result<()>;

    /// Releases the destination. Console and memory sinks treat this as a
    /// no-op; file sinks drop their handle and reject further writes.
    fn close(&mut self) -> io::Result<()>;
}

impl std::fmt::Debug for dyn Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Sink")
    }
}

/// A recorded recipe for producing a [`Sink`].
///
/// Builders are cheap to clone (held behind `Arc` by configurations) and may
/// be invoked at most once per owning fan-out writer, at materialization time.
/// Construction failures carry the offending path, not a channel id.
pub trait SinkBuilder: Send + Sync {
    /// Materializes the sink.
    fn build(&self) -> Result<Box<dyn Sink>, OutputError>;
}
