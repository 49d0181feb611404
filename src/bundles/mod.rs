//! # Bundles: discoverable plugin units.
//!
//! A *bundle* is a plugin unit advertising its identity and capabilities
//! through a manifest. Discovery and construction are split in two:
//!
//! - [`BundleLibrary`] walks directories for `*.bundle` manifest files and
//!   collects their [`BundleInfo`] metadata.
//! - [`BundleRegistry`] is an explicit registration table mapping a bundle
//!   name to a factory function. The host registers factories for the
//!   bundles it knows how to build, then instantiates them by name.
//!
//! There is no dynamic loading: a discovered manifest without a registered
//! factory is just metadata, and instantiating it fails with
//! [`BundleError::Unknown`](crate::BundleError::Unknown).
//!
//! ## Manifest format
//! ```toml
//! [bundle]
//! name = "hill-climber"
//! title = "Hill climbing search"
//! version = "1.2.0"
//! description = "Basic local search"
//!
//! [capabilities]
//! kind = "search"
//! ```

mod library;
mod registry;

pub use library::{BundleInfo, BundleLibrary};
pub use registry::BundleRegistry;
