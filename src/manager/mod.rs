//! # Output manager: scope strategy over channel registries.
//!
//! [`OutputManager`] is the front door of the crate. It owns either one
//! process-wide [`Registry`] or one registry per calling thread, chosen once
//! at construction via [`ScopeKind`] and fixed for the manager's lifetime.
//!
//! ## Architecture
//! ```text
//!                 OutputManager (explicit handle, no global state)
//!                    │
//!        ┌───────────┴───────────────┐
//!        ▼                           ▼
//!  ScopeKind::Process          ScopeKind::PerThread
//!  one shared Registry         ThreadId → Registry, lazily created,
//!  (writers serialize          released explicitly via
//!   on their own locks)        release_current_thread()
//!        │                           │
//!        ▼                           ▼
//!     Registry ──► FanoutWriter ──► sinks (console / files / custom)
//! ```
//!
//! ## Rules
//! - All per-id operations resolve "the current thread's registry" first in
//!   the per-thread scope; two threads using the same identifier therefore
//!   never share a fan-out writer.
//! - Print operations on an unconfigured identifier are silent no-ops and
//!   never fail.
//! - The manager is an explicit dependency: pass it (or an `Arc` of it) to
//!   the code that prints. There is no process-global instance.

mod printer;

pub use printer::Printer;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::channels::{ChannelWriter, Registry};
use crate::config::OutputConfig;
use crate::error::OutputError;

/// Conventional identifier for general output.
pub const DEFAULT_ID: &str = "default";

/// Conventional identifier for error output.
pub const DEFAULT_ERROR_ID: &str = "default-error";

/// How a manager (or a [`RandomHub`](crate::RandomHub)) scopes its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeKind {
    /// One registry shared by every caller.
    Process,
    /// One registry per calling thread, created lazily on first access.
    PerThread,
}

enum Scope {
    Process(Arc<Registry>),
    PerThread(Mutex<HashMap<ThreadId, Arc<Registry>>>),
}

/// Entry point for configuring and printing to output channels.
pub struct OutputManager {
    scope: Scope,
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::process_wide()
    }
}

impl OutputManager {
    /// Creates a manager with the given scope strategy.
    pub fn new(kind: ScopeKind) -> Self {
        let scope = match kind {
            ScopeKind::Process => Scope::Process(Arc::new(Registry::new())),
            ScopeKind::PerThread => Scope::PerThread(Mutex::new(HashMap::new())),
        };
        Self { scope }
    }

    /// Manager with a single registry shared by all threads.
    pub fn process_wide() -> Self {
        Self::new(ScopeKind::Process)
    }

    /// Manager with one lazily-created registry per calling thread.
    pub fn per_thread() -> Self {
        Self::new(ScopeKind::PerThread)
    }

    /// The scope strategy this manager was built with.
    pub fn scope_kind(&self) -> ScopeKind {
        match self.scope {
            Scope::Process(_) => ScopeKind::Process,
            Scope::PerThread(_) => ScopeKind::PerThread,
        }
    }

    /// Resolves the registry for the calling thread.
    pub fn registry(&self) -> Arc<Registry> {
        match &self.scope {
            Scope::Process(registry) => Arc::clone(registry),
            Scope::PerThread(map) => {
                let mut map = map.lock();
                Arc::clone(
                    map.entry(thread::current().id())
                        .or_insert_with(|| Arc::new(Registry::new())),
                )
            }
        }
    }

    /// Applies a configuration snapshot to the calling thread's registry.
    pub fn apply(&self, config: &OutputConfig) {
        self.registry().apply(config);
    }

    /// Returns the print wrapper for `id`, or `None` if unconfigured here.
    pub fn get_output(&self, id: &str) -> Option<ChannelWriter> {
        self.registry().get_output(id)
    }

    /// Returns a [`Printer`] bound to `id`, resolving the channel on every
    /// call. Safe to create for identifiers that are never configured.
    pub fn printer(&self, id: impl Into<Cow<'static, str>>) -> Printer<'_> {
        Printer::new(self, id.into())
    }

    /// Prints a value on `id` without a line break; no-op if unconfigured.
    pub fn print(&self, id: &str, value: impl fmt::Display) -> Result<(), OutputError> {
        match self.get_output(id) {
            Some(writer) => writer.print(value),
            None => Ok(()),
        }
    }

    /// Prints a value on `id` followed by a line break; no-op if unconfigured.
    pub fn println(&self, id: &str, value: impl fmt::Display) -> Result<(), OutputError> {
        match self.get_output(id) {
            Some(writer) => writer.println(value),
            None => Ok(()),
        }
    }

    /// Prints an empty line on `id`; no-op if unconfigured.
    pub fn newline(&self, id: &str) -> Result<(), OutputError> {
        match self.get_output(id) {
            Some(writer) => writer.newline(),
            None => Ok(()),
        }
    }

    /// Prints pre-formatted arguments on `id`; no-op if unconfigured.
    ///
    /// ```
    /// # let manager = outmux::OutputManager::process_wide();
    /// manager.format("stats", format_args!("mean={:.3}", 0.25)).unwrap();
    /// ```
    pub fn format(&self, id: &str, args: fmt::Arguments<'_>) -> Result<(), OutputError> {
        match self.get_output(id) {
            Some(writer) => writer.format(args),
            None => Ok(()),
        }
    }

    /// Closes every channel of the calling thread's registry.
    pub fn close_all(&self) -> Result<(), OutputError> {
        self.registry().close_all()
    }

    /// Closes one channel; absent ids are ignored.
    pub fn close(&self, id: &str) -> Result<(), OutputError> {
        self.registry().close(id)
    }

    /// Removes every non-permanent channel of the calling thread's registry.
    pub fn clear_all(&self) {
        self.registry().clear_all();
    }

    /// Removes one non-permanent channel.
    pub fn clear(&self, id: &str) {
        self.registry().clear(id);
    }

    /// Drops the calling thread's registry (per-thread scope only).
    ///
    /// Replaces the garbage-collected weak map of thread registries with an
    /// explicit disposal point: call this before a worker thread exits if the
    /// manager outlives it. A no-op in the process-wide scope.
    pub fn release_current_thread(&self) {
        if let Scope::PerThread(map) = &self.scope {
            map.lock().remove(&thread::current().id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputConfigBuilder;
    use crate::sinks::{MemoryBuffer, MemorySinkBuilder};

    fn memory_config(id: &str, buffer: &MemoryBuffer) -> OutputConfig {
        OutputConfigBuilder::new()
            .attach_sink(id, Arc::new(MemorySinkBuilder::new(buffer.clone())))
            .build()
    }

    #[test]
    fn one_println_reaches_console_and_two_files() {
        let console = MemoryBuffer::new();
        let dir = tempfile::tempdir().unwrap();
        let file_a = dir.path().join("a.log");
        let file_b = dir.path().join("b.log");

        let manager = OutputManager::process_wide();
        let config = OutputConfigBuilder::new()
            .redirect_stdout(console.clone())
            .attach_stdout("results")
            .attach_file("results", &file_a)
            .attach_file("results", &file_b)
            .build();
        manager.apply(&config);

        manager.println("results", "the same line").unwrap();
        manager.close_all().unwrap();

        assert_eq!(console.contents(), "the same line\n");
        assert_eq!(std::fs::read_to_string(&file_a).unwrap(), "the same line\n");
        assert_eq!(std::fs::read_to_string(&file_b).unwrap(), "the same line\n");
    }

    #[test]
    fn unconfigured_id_never_fails() {
        let manager = OutputManager::process_wide();
        let printer = manager.printer("ghost");
        for _ in 0..100 {
            printer.print("x").unwrap();
            printer.println("y").unwrap();
            printer.newline().unwrap();
            printer.format(format_args!("{}", 1)).unwrap();
        }
        manager.println("ghost", "still nothing").unwrap();
        assert!(manager.get_output("ghost").is_none());
    }

    #[test]
    fn close_on_permanent_keeps_file_open_disposable_closes() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("kept.log");
        let dropped = dir.path().join("dropped.log");

        let manager = OutputManager::process_wide();
        let config = OutputConfigBuilder::new()
            .attach_file("kept", &kept)
            .make_permanent("kept")
            .attach_file("dropped", &dropped)
            .build();
        manager.apply(&config);

        manager.println("kept", "one").unwrap();
        manager.println("dropped", "one").unwrap();

        manager.close("kept").unwrap();
        manager.close("dropped").unwrap();

        // Permanent channel is still writable after close.
        manager.println("kept", "two").unwrap();
        // Disposable channel lost its file handle.
        let err = manager.println("dropped", "two").unwrap_err();
        assert_eq!(err.as_label(), "channel_write");

        assert_eq!(std::fs::read_to_string(&kept).unwrap(), "one\ntwo\n");
        assert_eq!(std::fs::read_to_string(&dropped).unwrap(), "one\n");
    }

    #[test]
    fn late_bound_paths_resolve_per_materialization() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();
        let run = Arc::new(Mutex::new("run-1".to_string()));

        let supplier = {
            let run = run.clone();
            let base = base.clone();
            move || base.join(format!("{}.log", run.lock()))
        };
        let builder = OutputConfigBuilder::new().attach_file_source("runs", supplier, true);

        let first_manager = OutputManager::process_wide();
        first_manager.apply(&builder.build());
        first_manager.println("runs", "first").unwrap();

        *run.lock() = "run-2".to_string();

        let second_manager = OutputManager::process_wide();
        second_manager.apply(&builder.build());
        second_manager.println("runs", "second").unwrap();

        assert_eq!(
            std::fs::read_to_string(base.join("run-1.log")).unwrap(),
            "first\n"
        );
        assert_eq!(
            std::fs::read_to_string(base.join("run-2.log")).unwrap(),
            "second\n"
        );
    }

    #[test]
    fn per_thread_scope_isolates_same_identifier() {
        let manager = Arc::new(OutputManager::per_thread());

        let spawn = |tag: &'static str| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || {
                let buffer = MemoryBuffer::new();
                manager.apply(&memory_config("log", &buffer));
                for i in 0..5 {
                    manager.println("log", format!("{tag}-{i}")).unwrap();
                }
                manager.release_current_thread();
                buffer.contents()
            })
        };

        let left = spawn("left");
        let right = spawn("right");
        let left = left.join().unwrap();
        let right = right.join().unwrap();

        assert!(left.lines().all(|l| l.starts_with("left-")), "{left}");
        assert!(right.lines().all(|l| l.starts_with("right-")), "{right}");
        assert_eq!(left.lines().count(), 5);
        assert_eq!(right.lines().count(), 5);

        // The spawning thread never configured anything.
        assert!(manager.get_output("log").is_none());
    }

    #[test]
    fn release_current_thread_forgets_configuration() {
        let manager = OutputManager::per_thread();
        let buffer = MemoryBuffer::new();
        manager.apply(&memory_config("tmp", &buffer));
        assert!(manager.get_output("tmp").is_some());

        manager.release_current_thread();
        assert!(manager.get_output("tmp").is_none());
    }

    #[test]
    fn scope_kind_is_fixed_at_construction() {
        assert_eq!(
            OutputManager::process_wide().scope_kind(),
            ScopeKind::Process
        );
        assert_eq!(OutputManager::per_thread().scope_kind(), ScopeKind::PerThread);
        assert_eq!(OutputManager::default().scope_kind(), ScopeKind::Process);
    }
}
