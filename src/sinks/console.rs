//! Console sinks bound to the process standard streams.
//!
//! The target is captured at configuration-build time, which is what allows
//! tests (and embedding hosts) to redirect "console" traffic into an arbitrary
//! writer via [`OutputConfigBuilder::redirect_stdout`](crate::OutputConfigBuilder::redirect_stdout).
//!
//! Closing a console sink never closes the underlying stream.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::{Sink, SinkBuilder};
use crate::error::OutputError;

/// A writer shared between a redirected console target and the code that
/// inspects it afterwards.
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Where console output for a channel actually goes.
#[derive(Clone)]
pub enum ConsoleTarget {
    /// The process standard output stream.
    Stdout,
    /// The process standard error stream.
    Stderr,
    /// A caller-supplied replacement writer.
    Shared(SharedWriter),
}

impl ConsoleTarget {
    /// Wraps an arbitrary writer as a redirected console target.
    pub fn shared(writer: impl Write + Send + 'static) -> Self {
        ConsoleTarget::Shared(Arc::new(Mutex::new(Box::new(writer))))
    }
}

/// Sink writing to a [`ConsoleTarget`].
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    /// Creates a sink for the given target.
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }
}

impl Sink for ConsoleSink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => io::stdout().lock().write_all(text.as_bytes()),
            ConsoleTarget::Stderr => io::stderr().lock().write_all(text.as_bytes()),
            ConsoleTarget::Shared(writer) => writer.lock().write_all(text.as_bytes()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.target {
            ConsoleTarget::Stdout => io::stdout().lock().flush(),
            ConsoleTarget::Stderr => io::stderr().lock().flush(),
            ConsoleTarget::Shared(writer) => writer.lock().flush(),
        }
    }

    fn close(&mut self) -> io::Result<()> {
        // Console streams outlive every channel.
        Ok(())
    }
}

/// Builder producing [`ConsoleSink`]s for a fixed target.
#[derive(Clone)]
pub struct ConsoleSinkBuilder {
    target: ConsoleTarget,
}

impl ConsoleSinkBuilder {
    /// Builder for the given target.
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    /// Builder for the process standard output.
    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    /// Builder for the process standard error.
    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }
}

impl SinkBuilder for ConsoleSinkBuilder {
    fn build(&self) -> Result<Box<dyn Sink>, OutputError> {
        Ok(Box::new(ConsoleSink::new(self.target.clone())))
    }
}
