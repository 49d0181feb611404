//! Immutable configuration snapshot consumed by registries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::sinks::SinkBuilder;

/// Per-identifier recipe: ordered sink builders plus the permanent flag.
pub(crate) struct ChannelSpec {
    pub(crate) builders: Vec<Arc<dyn SinkBuilder>>,
    pub(crate) permanent: bool,
}

/// Frozen mapping from channel identifiers to sink recipes.
///
/// Produced by [`OutputConfigBuilder`](crate::OutputConfigBuilder) and applied
/// to a registry, which get-or-creates a fan-out writer per identifier. The
/// snapshot holds builders, not sinks: nothing is opened until a channel is
/// first written to.
pub struct OutputConfig {
    entries: HashMap<String, ChannelSpec>,
}

impl OutputConfig {
    pub(crate) fn from_entries(entries: HashMap<String, ChannelSpec>) -> Self {
        Self { entries }
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &ChannelSpec)> {
        self.entries.iter()
    }

    /// Sorted list of configured identifiers.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Whether `id` is configured as permanent; `None` for unknown ids.
    pub fn is_permanent(&self, id: &str) -> Option<bool> {
        self.entries.get(id).map(|spec| spec.permanent)
    }

    /// Number of sink builders recorded for `id`; `None` for unknown ids.
    pub fn sink_count(&self, id: &str) -> Option<usize> {
        self.entries.get(id).map(|spec| spec.builders.len())
    }

    /// True if the snapshot configures nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of configured identifiers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
