//! # outmux
//!
//! **outmux** is a small library of host-framework utilities centered on
//! multiplexed text output: one logical channel identifier fans out to any
//! number of destinations (console, files, custom sinks), with
//! permanent-vs-disposable lifecycle and process-wide or per-thread scoping.
//! It also ships a replicable seeded RNG hub and a manifest-based bundle
//! (plugin) discovery table, which share the same scoping conventions.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   OutputConfigBuilder ──build()──► OutputConfig (frozen snapshot)
//!                                        │ apply()
//!                                        ▼
//!   OutputManager ──scope──► Registry (id → FanoutWriter)
//!     │                         │
//!     │ printer(id) / println   │ get_output(id)
//!     ▼                         ▼
//!   Printer (no-op when      ChannelWriter (1:1 with a writer)
//!   id unconfigured)            │
//!                               ▼
//!                        FanoutWriter ──► [sink 1] [sink 2] … [sink N]
//!                        (lazy build,      console    file     custom
//!                         write+flush
//!                         in order)
//! ```
//!
//! ### Lifecycle
//! ```text
//! builder.attach_*(id) ──► config = builder.build()   (builder stays usable)
//! manager.apply(&config)                              (no I/O yet)
//! manager.println(id, …)                              (sinks materialize on
//!                                                      first write, at most
//!                                                      once per writer)
//! manager.clear_all()                                 (drops disposable ids;
//!                                                      permanent ones stay)
//! manager.close_all()                                 (closes sinks; no-op
//!                                                      for permanent ids)
//! ```
//!
//! ## Features
//! | Area            | Description                                                  | Key types                                   |
//! |-----------------|--------------------------------------------------------------|---------------------------------------------|
//! | **Channels**    | Fan-out writers replicating each write to all sinks.         | [`FanoutWriter`], [`ChannelWriter`]         |
//! | **Registry**    | Identifier-keyed channels, permanent/disposable lifecycle.   | [`Registry`]                                |
//! | **Scoping**     | Process-wide or per-thread registries behind one handle.     | [`OutputManager`], [`ScopeKind`]            |
//! | **Config**      | Reusable builder freezing immutable snapshots.               | [`OutputConfigBuilder`], [`OutputConfig`]   |
//! | **Sinks**       | Console, file (late-bound paths), in-memory capture.         | [`Sink`], [`SinkBuilder`], [`FileSinkBuilder`] |
//! | **Randomness**  | Seeded, replicable RNG with the same scoping split.          | [`RandomHub`]                               |
//! | **Bundles**     | Manifest discovery + explicit factory registration.          | [`BundleLibrary`], [`BundleRegistry`]       |
//!
//! ## Optional features
//! - `bundles` *(default)*: manifest discovery and the plugin registration
//!   table (pulls in `serde` and `toml`).
//!
//! ## Example
//! ```rust
//! use outmux::{OutputConfigBuilder, OutputManager};
//!
//! fn main() -> Result<(), outmux::OutputError> {
//!     let manager = OutputManager::process_wide();
//!
//!     let config = OutputConfigBuilder::new()
//!         .attach_stdout("report")
//!         .make_permanent("report")
//!         .build();
//!     manager.apply(&config);
//!
//!     manager.println("report", "run finished")?;
//!
//!     // Unconfigured identifiers are silent no-ops, never errors.
//!     manager.println("debug", "dropped quietly")?;
//!
//!     manager.close_all()?;
//!     Ok(())
//! }
//! ```

mod channels;
mod config;
mod error;
mod manager;
mod random;
mod sinks;

// ---- Public re-exports ----

pub use channels::{ChannelWriter, FanoutWriter, Registry};
pub use config::{OutputConfig, OutputConfigBuilder};
pub use error::OutputError;
pub use manager::{OutputManager, Printer, ScopeKind, DEFAULT_ERROR_ID, DEFAULT_ID};
pub use random::RandomHub;
pub use sinks::{
    ConsoleSink, ConsoleSinkBuilder, ConsoleTarget, FileSink, FileSinkBuilder, MemoryBuffer,
    MemorySink, MemorySinkBuilder, PathSource, SharedWriter, Sink, SinkBuilder,
};

// Optional: bundle discovery and the plugin registration table.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "bundles")]
mod bundles;
#[cfg(feature = "bundles")]
pub use bundles::{BundleInfo, BundleLibrary, BundleRegistry};
#[cfg(feature = "bundles")]
pub use error::BundleError;
