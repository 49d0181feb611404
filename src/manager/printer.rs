//! Identifier-bound print handle that tolerates unconfigured channels.

use std::borrow::Cow;
use std::fmt;

use super::OutputManager;
use crate::error::OutputError;

/// Print handle bound to a manager and a channel identifier.
///
/// Unlike [`ChannelWriter`](crate::ChannelWriter), a `Printer` re-resolves its
/// channel through the manager on every call: it can be handed to code before
/// the channel is configured, keeps working if the channel is cleared and
/// re-registered, and silently does nothing while the identifier is
/// unconfigured.
#[derive(Clone)]
pub struct Printer<'a> {
    manager: &'a OutputManager,
    channel: Cow<'static, str>,
}

impl<'a> Printer<'a> {
    pub(crate) fn new(manager: &'a OutputManager, channel: Cow<'static, str>) -> Self {
        Self { manager, channel }
    }

    /// The identifier this printer resolves on each call.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Prints a value without a line break; no-op if unconfigured.
    pub fn print(&self, value: impl fmt::Display) -> Result<(), OutputError> {
        self.manager.print(&self.channel, value)
    }

    /// Prints a value followed by a line break; no-op if unconfigured.
    pub fn println(&self, value: impl fmt::Display) -> Result<(), OutputError> {
        self.manager.println(&self.channel, value)
    }

    /// Prints an empty line; no-op if unconfigured.
    pub fn newline(&self) -> Result<(), OutputError> {
        self.manager.newline(&self.channel)
    }

    /// Prints pre-formatted arguments; no-op if unconfigured.
    pub fn format(&self, args: fmt::Arguments<'_>) -> Result<(), OutputError> {
        self.manager.format(&self.channel, args)
    }

    /// Closes the channel's sinks; no-op if unconfigured or permanent.
    pub fn close(&self) -> Result<(), OutputError> {
        self.manager.close(&self.channel)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::OutputConfigBuilder;
    use crate::manager::OutputManager;
    use crate::sinks::{MemoryBuffer, MemorySinkBuilder};

    #[test]
    fn printer_picks_up_late_configuration() {
        let manager = OutputManager::process_wide();
        let printer = manager.printer("late");

        printer.println("before config").unwrap(); // dropped

        let buffer = MemoryBuffer::new();
        let config = OutputConfigBuilder::new()
            .attach_sink("late", Arc::new(MemorySinkBuilder::new(buffer.clone())))
            .build();
        manager.apply(&config);

        printer.println("after config").unwrap();
        assert_eq!(buffer.contents(), "after config\n");
    }

    #[test]
    fn printer_survives_clearing() {
        let manager = OutputManager::process_wide();
        let buffer = MemoryBuffer::new();
        let config = OutputConfigBuilder::new()
            .attach_sink("tmp", Arc::new(MemorySinkBuilder::new(buffer.clone())))
            .build();
        manager.apply(&config);

        let printer = manager.printer("tmp");
        printer.print("a").unwrap();

        manager.clear("tmp");
        printer.print("dropped").unwrap(); // no-op, channel is gone

        manager.apply(&config);
        printer.print("b").unwrap();

        assert_eq!(buffer.contents(), "ab");
    }
}
