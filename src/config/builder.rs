//! # Declarative configuration builder.
//!
//! [`OutputConfigBuilder`] accumulates, per channel identifier: whether the
//! console streams are attached, an ordered list of file outputs, optional
//! custom sinks, and the permanent flag. [`OutputConfigBuilder::build`] takes
//! `&self` and freezes an independent [`OutputConfig`] snapshot, so the same
//! builder can be reused — combined with late-bound file paths this lets one
//! builder describe per-run output files whose names differ at each build.
//!
//! ## Console redirection
//! Console targets are captured at build time. [`redirect_stdout`] /
//! [`redirect_stderr`] swap the process streams for an arbitrary writer,
//! which is how tests capture "console" traffic without touching the real
//! stdout.
//!
//! ## Example
//! ```
//! use outmux::{OutputConfigBuilder, OutputManager};
//!
//! let manager = OutputManager::process_wide();
//! let config = OutputConfigBuilder::new()
//!     .attach_stdout("progress")
//!     .make_permanent("progress")
//!     .build();
//! manager.apply(&config);
//! ```
//!
//! [`redirect_stdout`]: OutputConfigBuilder::redirect_stdout
//! [`redirect_stderr`]: OutputConfigBuilder::redirect_stderr

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use super::snapshot::{ChannelSpec, OutputConfig};
use crate::sinks::{ConsoleSinkBuilder, ConsoleTarget, FileSinkBuilder, PathSource, SinkBuilder};

#[derive(Clone)]
struct FileDraft {
    source: PathSource,
    append: bool,
}

#[derive(Default)]
struct EntryDraft {
    stdout: bool,
    stderr: bool,
    files: Vec<FileDraft>,
    customs: Vec<Arc<dyn SinkBuilder>>,
    permanent: bool,
}

/// Accumulates channel descriptions and freezes them into [`OutputConfig`]s.
pub struct OutputConfigBuilder {
    entries: HashMap<String, EntryDraft>,
    stdout: ConsoleTarget,
    stderr: ConsoleTarget,
}

impl Default for OutputConfigBuilder {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            stdout: ConsoleTarget::Stdout,
            stderr: ConsoleTarget::Stderr,
        }
    }
}

impl OutputConfigBuilder {
    /// Creates an empty builder targeting the real process streams.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, id: impl Into<String>) -> &mut EntryDraft {
        self.entries.entry(id.into()).or_default()
    }

    /// Attaches the console output stream to `id`.
    pub fn attach_stdout(mut self, id: impl Into<String>) -> Self {
        self.entry(id).stdout = true;
        self
    }

    /// Attaches the console error stream to `id`.
    pub fn attach_stderr(mut self, id: impl Into<String>) -> Self {
        self.entry(id).stderr = true;
        self
    }

    /// Attaches a file output to `id`, appending to the file.
    pub fn attach_file(self, id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.attach_file_mode(id, path, true)
    }

    /// Attaches a file output to `id` with an explicit append/truncate flag.
    pub fn attach_file_mode(
        mut self,
        id: impl Into<String>,
        path: impl Into<PathBuf>,
        append: bool,
    ) -> Self {
        self.entry(id).files.push(FileDraft {
            source: PathSource::Fixed(path.into()),
            append,
        });
        self
    }

    /// Attaches a file output whose path is produced by `supplier` when the
    /// sink materializes, not now.
    pub fn attach_file_source(
        mut self,
        id: impl Into<String>,
        supplier: impl Fn() -> PathBuf + Send + Sync + 'static,
        append: bool,
    ) -> Self {
        self.entry(id).files.push(FileDraft {
            source: PathSource::Late(Arc::new(supplier)),
            append,
        });
        self
    }

    /// Attaches an arbitrary sink builder to `id`.
    pub fn attach_sink(mut self, id: impl Into<String>, builder: Arc<dyn SinkBuilder>) -> Self {
        self.entry(id).customs.push(builder);
        self
    }

    /// Marks `id` permanent: bulk clears spare it and `close` becomes a no-op.
    pub fn make_permanent(mut self, id: impl Into<String>) -> Self {
        self.entry(id).permanent = true;
        self
    }

    /// Replaces the console output stream for every snapshot built from here.
    pub fn redirect_stdout(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stdout = ConsoleTarget::shared(writer);
        self
    }

    /// Replaces the console error stream for every snapshot built from here.
    pub fn redirect_stderr(mut self, writer: impl Write + Send + 'static) -> Self {
        self.stderr = ConsoleTarget::shared(writer);
        self
    }

    /// Freezes an immutable snapshot.
    ///
    /// Each call produces an independent snapshot; the builder stays usable.
    /// Sink order per channel: console out, console err, then file and custom
    /// sinks in attachment order.
    pub fn build(&self) -> OutputConfig {
        let mut entries = HashMap::with_capacity(self.entries.len());

        for (id, draft) in &self.entries {
            let mut builders: Vec<Arc<dyn SinkBuilder>> = Vec::new();

            if draft.stdout {
                builders.push(Arc::new(ConsoleSinkBuilder::new(self.stdout.clone())));
            }
            if draft.stderr {
                builders.push(Arc::new(ConsoleSinkBuilder::new(self.stderr.clone())));
            }
            for file in &draft.files {
                builders.push(Arc::new(
                    FileSinkBuilder::from_path_source(file.source.clone()).append(file.append),
                ));
            }
            builders.extend(draft.customs.iter().cloned());

            entries.insert(
                id.clone(),
                ChannelSpec {
                    builders,
                    permanent: draft.permanent,
                },
            );
        }

        OutputConfig::from_entries(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_attachments() {
        let builder = OutputConfigBuilder::new()
            .attach_stdout("both")
            .attach_file("both", "out/a.log")
            .attach_file("both", "out/b.log")
            .attach_stderr("errors")
            .make_permanent("errors");

        let config = builder.build();
        assert_eq!(config.ids(), vec!["both", "errors"]);
        assert_eq!(config.sink_count("both"), Some(3));
        assert_eq!(config.is_permanent("both"), Some(false));
        assert_eq!(config.is_permanent("errors"), Some(true));
        assert_eq!(config.is_permanent("absent"), None);
    }

    #[test]
    fn builds_are_independent_snapshots() {
        let mut builder = OutputConfigBuilder::new().attach_stdout("a");
        let first = builder.build();

        builder = builder.attach_stdout("b").make_permanent("a");
        let second = builder.build();

        assert_eq!(first.len(), 1);
        assert_eq!(first.is_permanent("a"), Some(false));
        assert_eq!(second.len(), 2);
        assert_eq!(second.is_permanent("a"), Some(true));
    }

    #[test]
    fn empty_builder_builds_empty_config() {
        let config = OutputConfigBuilder::new().build();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
    }
}
