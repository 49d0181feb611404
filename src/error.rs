//! Error types used across the output channels and the bundle subsystem.
//!
//! Two enums cover the crate:
//!
//! - [`OutputError`] — sink construction and I/O failures on output channels.
//! - [`BundleError`] — bundle discovery and registration failures.
//!
//! Both provide `as_label()` returning a short stable snake_case string for
//! logs and metrics.
//!
//! Looking up an unconfigured channel id is **not** an error anywhere in the
//! crate: lookups return `Option`, and print operations on an unconfigured
//! channel are silent no-ops.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// # Errors produced by output channels.
///
/// Construction variants ([`OutputError::CreateDir`], [`OutputError::OpenFile`])
/// name the offending path; I/O variants name the channel the failure occurred
/// on. There are no retries: every failure surfaces synchronously to the caller
/// of the triggering operation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum OutputError {
    /// Parent directories for a file sink could not be created.
    ///
    /// Reported distinctly from [`OutputError::OpenFile`] so a permission
    /// problem on the directory is not mistaken for a bad file name.
    #[error("cannot create parent directories for '{path}': {source}")]
    CreateDir {
        /// The file path whose parents could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A file sink could not be opened.
    #[error("cannot open output file '{path}': {source}")]
    OpenFile {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A write to one of a channel's sinks failed.
    ///
    /// Sinks later in registration order were skipped for that call.
    #[error("write failed on channel '{channel}': {source}")]
    Write {
        /// The channel identifier.
        channel: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A flush on one of a channel's sinks failed.
    #[error("flush failed on channel '{channel}': {source}")]
    Flush {
        /// The channel identifier.
        channel: String,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Closing one of a channel's sinks failed.
    #[error("close failed on channel '{channel}': {source}")]
    Close {
        /// The channel identifier.
        channel: String,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl OutputError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            OutputError::CreateDir { .. } => "sink_create_dir",
            OutputError::OpenFile { .. } => "sink_open_file",
            OutputError::Write { .. } => "channel_write",
            OutputError::Flush { .. } => "channel_flush",
            OutputError::Close { .. } => "channel_close",
        }
    }

    /// True for sink-construction failures (directory or file open), false
    /// for I/O failures on an already-built sink.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            OutputError::CreateDir { .. } | OutputError::OpenFile { .. }
        )
    }
}

/// # Errors produced by bundle discovery and registration.
#[cfg(feature = "bundles")]
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum BundleError {
    /// A discovery path could not be read or created.
    #[error("cannot scan bundle path '{path}': {source}")]
    Scan {
        /// The directory that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A manifest file was unreadable or malformed.
    #[error("invalid bundle manifest '{path}': {message}")]
    Manifest {
        /// The manifest file path.
        path: PathBuf,
        /// Parser or I/O detail.
        message: String,
    },

    /// A factory was already registered under the given name.
    #[error("bundle '{name}' is already registered")]
    Duplicate {
        /// The conflicting bundle name.
        name: String,
    },

    /// No factory is registered under the given name.
    #[error("unknown bundle '{name}'")]
    Unknown {
        /// The requested bundle name.
        name: String,
    },
}

#[cfg(feature = "bundles")]
impl BundleError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            BundleError::Scan { .. } => "bundle_scan",
            BundleError::Manifest { .. } => "bundle_manifest",
            BundleError::Duplicate { .. } => "bundle_duplicate",
            BundleError::Unknown { .. } => "bundle_unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_labels_are_stable() {
        let err = OutputError::Write {
            channel: "trace".into(),
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        };
        assert_eq!(err.as_label(), "channel_write");
        assert!(!err.is_construction());

        let err = OutputError::CreateDir {
            path: PathBuf::from("/tmp/x/y.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.as_label(), "sink_create_dir");
        assert!(err.is_construction());
    }

    #[test]
    fn messages_name_the_subject() {
        let err = OutputError::Close {
            channel: "results".into(),
            source: io::Error::new(io::ErrorKind::Other, "late"),
        };
        let text = err.to_string();
        assert!(text.contains("results"), "message should name the channel: {text}");
    }
}
