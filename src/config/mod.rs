//! Output configuration: builder and frozen snapshot.

mod builder;
mod snapshot;

pub use builder::OutputConfigBuilder;
pub use snapshot::OutputConfig;
