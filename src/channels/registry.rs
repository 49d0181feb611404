//! # Channel registry: identifier → fan-out writer.
//!
//! [`Registry`] owns the mapping from channel identifiers to their fan-out
//! writers and hands out [`ChannelWriter`] print wrappers bound one-to-one
//! with them.
//!
//! ## Rules
//! - Applying a configuration get-or-creates writers and (re)assigns their
//!   builder lists; it never materializes sinks — that is deferred to the
//!   first write on each channel.
//! - `get_output` never fails: an unconfigured id yields `None`.
//! - Closing touches sinks (respecting permanence); clearing removes
//!   *entries*, and only the non-permanent ones. A cleared id stays
//!   unreachable until re-registered by a new configuration.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::channels::{ChannelWriter, FanoutWriter};
use crate::config::OutputConfig;
use crate::error::OutputError;

/// Identifier-keyed table of fan-out writers.
#[derive(Default)]
pub struct Registry {
    channels: Mutex<HashMap<String, Arc<Mutex<FanoutWriter>>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a configuration snapshot.
    ///
    /// For every identifier in `config`: get-or-create its fan-out writer,
    /// set permanence if configured (one-directional), and assign its sink
    /// builder list. Sinks are not built here.
    pub fn apply(&self, config: &OutputConfig) {
        let mut channels = self.channels.lock();

        for (id, recipe) in config.entries() {
            let writer = channels
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(FanoutWriter::new(id.clone()))));

            let mut writer = writer.lock();
            if recipe.permanent {
                writer.mark_permanent();
            }
            writer.set_builders(recipe.builders.clone());
        }
    }

    /// Returns the print wrapper for `id`, or `None` if the id was never
    /// configured (or was cleared). Never fails.
    pub fn get_output(&self, id: &str) -> Option<ChannelWriter> {
        let channels = self.channels.lock();
        channels
            .get(id)
            .map(|writer| ChannelWriter::new(id.to_string(), Arc::clone(writer)))
    }

    /// Closes every channel's sinks. Permanent channels no-op their close.
    pub fn close_all(&self) -> Result<(), OutputError> {
        for writer in self.snapshot() {
            writer.lock().close()?;
        }
        Ok(())
    }

    /// Closes the sinks of one channel; absent ids are ignored.
    pub fn close(&self, id: &str) -> Result<(), OutputError> {
        let writer = { self.channels.lock().get(id).cloned() };
        match writer {
            Some(writer) => writer.lock().close(),
            None => Ok(()),
        }
    }

    /// Removes every non-permanent channel. Permanent channels are untouched
    /// and remain retrievable.
    pub fn clear_all(&self) {
        let mut channels = self.channels.lock();
        let before = channels.len();
        channels.retain(|_, writer| writer.lock().is_permanent());
        debug!(removed = before - channels.len(), "cleared disposable channels");
    }

    /// Removes the channel for `id` if it exists and is not permanent.
    pub fn clear(&self, id: &str) {
        let mut channels = self.channels.lock();
        if let Some(writer) = channels.get(id) {
            if !writer.lock().is_permanent() {
                channels.remove(id);
            }
        }
    }

    /// Sorted list of configured identifiers.
    pub fn ids(&self) -> Vec<String> {
        let channels = self.channels.lock();
        let mut ids: Vec<String> = channels.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// True if no channel is configured.
    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }

    /// Number of configured channels.
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    // Clone the handles out so sink I/O happens without the table lock held.
    fn snapshot(&self) -> Vec<Arc<Mutex<FanoutWriter>>> {
        self.channels.lock().values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfigBuilder;
    use crate::sinks::{MemoryBuffer, MemorySinkBuilder};

    #[test]
    fn unknown_id_yields_none_not_an_error() {
        let registry = Registry::new();
        assert!(registry.get_output("never-configured").is_none());
    }

    #[test]
    fn clear_all_spares_permanent_channels() {
        let registry = Registry::new();
        let config = OutputConfigBuilder::new()
            .attach_sink("keep", Arc::new(MemorySinkBuilder::new(MemoryBuffer::new())))
            .make_permanent("keep")
            .attach_sink("drop", Arc::new(MemorySinkBuilder::new(MemoryBuffer::new())))
            .build();
        registry.apply(&config);

        registry.clear_all();

        assert!(registry.get_output("keep").is_some());
        assert!(registry.get_output("drop").is_none());
        assert_eq!(registry.ids(), vec!["keep".to_string()]);
    }

    #[test]
    fn cleared_id_stays_gone_until_reconfigured() {
        let registry = Registry::new();
        let buffer = MemoryBuffer::new();
        let config = OutputConfigBuilder::new()
            .attach_sink("log", Arc::new(MemorySinkBuilder::new(buffer.clone())))
            .build();
        registry.apply(&config);

        registry.clear("log");
        assert!(registry.get_output("log").is_none());

        registry.apply(&config);
        let writer = registry.get_output("log").expect("re-registered");
        writer.println("back").unwrap();
        assert_eq!(buffer.contents(), "back\n");
    }

    #[test]
    fn clear_ignores_permanent_single_channel() {
        let registry = Registry::new();
        let config = OutputConfigBuilder::new()
            .attach_sink("pin", Arc::new(MemorySinkBuilder::new(MemoryBuffer::new())))
            .make_permanent("pin")
            .build();
        registry.apply(&config);

        registry.clear("pin");
        assert!(registry.get_output("pin").is_some());
    }

    #[test]
    fn reapplying_marks_existing_channel_permanent() {
        let registry = Registry::new();
        let plain = OutputConfigBuilder::new()
            .attach_sink("ch", Arc::new(MemorySinkBuilder::new(MemoryBuffer::new())))
            .build();
        registry.apply(&plain);

        let pinned = OutputConfigBuilder::new()
            .attach_sink("ch", Arc::new(MemorySinkBuilder::new(MemoryBuffer::new())))
            .make_permanent("ch")
            .build();
        registry.apply(&pinned);

        registry.clear_all();
        assert!(registry.get_output("ch").is_some());
    }

    #[test]
    fn close_of_absent_id_is_silent() {
        let registry = Registry::new();
        registry.close("missing").unwrap();
        registry.close_all().unwrap();
    }
}
