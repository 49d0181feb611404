//! File sinks with late-bound paths.
//!
//! The path of a file sink is resolved through a [`PathSource`] at
//! materialization time, not when the configuration is assembled. A fixed
//! path and a supplier closure behave identically except for *when* the
//! value is produced; suppliers make it possible to reuse one configuration
//! builder across runs that write to, say, timestamped files.
//!
//! Parent directories are created on demand. A directory-creation failure is
//! reported distinctly from a file-open failure.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use super::{Sink, SinkBuilder};
use crate::error::OutputError;

/// Produces the filesystem path of a file sink on demand.
#[derive(Clone)]
pub enum PathSource {
    /// A path known when the configuration is assembled.
    Fixed(PathBuf),
    /// A closure invoked at materialization time.
    Late(Arc<dyn Fn() -> PathBuf + Send + Sync>),
}

impl PathSource {
    /// Resolves the path now.
    pub fn resolve(&self) -> PathBuf {
        match self {
            PathSource::Fixed(path) => path.clone(),
            PathSource::Late(supplier) => supplier(),
        }
    }
}

/// Open file sink. Closing drops the handle; further writes fail.
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    fn handle(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "file sink is closed"))
    }

    /// The resolved path this sink writes to.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.handle()?.write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.handle()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Builder opening a file at a fixed or late-bound path.
#[derive(Clone)]
pub struct FileSinkBuilder {
    path: PathSource,
    append: bool,
}

impl FileSinkBuilder {
    /// Builder for a fixed path, appending by default.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: PathSource::Fixed(path.into()),
            append: true,
        }
    }

    /// Builder resolving its path through a supplier at materialization time.
    pub fn from_source(supplier: impl Fn() -> PathBuf + Send + Sync + 'static) -> Self {
        Self {
            path: PathSource::Late(Arc::new(supplier)),
            append: true,
        }
    }

    /// Builder for an already-wrapped [`PathSource`].
    pub fn from_path_source(path: PathSource) -> Self {
        Self { path, append: true }
    }

    /// Append (`true`, default) or truncate (`false`) the file on open.
    pub fn append(mut self, enable: bool) -> Self {
        self.append = enable;
        self
    }
}

impl SinkBuilder for FileSinkBuilder {
    fn build(&self) -> Result<Box<dyn Sink>, OutputError> {
        let path = self.path.resolve();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| OutputError::CreateDir {
                path: path.clone(),
                source,
            })?;
        }

        let mut options = OpenOptions::new();
        options.create(true).write(true);
        if self.append {
            options.append(true);
        } else {
            options.truncate(true);
        }

        let file = options.open(&path).map_err(|source| OutputError::OpenFile {
            path: path.clone(),
            source,
        })?;

        Ok(Box::new(FileSink {
            path,
            file: Some(file),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deep/run.log");

        let mut sink = FileSinkBuilder::new(&path).build().unwrap();
        sink.write_text("line\n").unwrap();
        sink.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\n");
    }

    #[test]
    fn truncate_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old contents").unwrap();

        let mut sink = FileSinkBuilder::new(&path).append(false).build().unwrap();
        sink.write_text("new").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn append_keeps_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "first|").unwrap();

        let mut sink = FileSinkBuilder::new(&path).build().unwrap();
        sink.write_text("second").unwrap();
        sink.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first|second");
    }

    #[test]
    fn open_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        // The path is itself a directory, so opening as a file must fail.
        let err = FileSinkBuilder::new(dir.path()).build().unwrap_err();
        match err {
            OutputError::OpenFile { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("expected OpenFile, got {other:?}"),
        }
    }

    #[test]
    fn writes_after_close_fail() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSinkBuilder::new(dir.path().join("x.log")).build().unwrap();
        sink.close().unwrap();
        assert!(sink.write_text("late").is_err());
    }

    #[test]
    fn late_bound_path_resolves_at_build_time() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().to_path_buf();
        let current = std::sync::Arc::new(parking_lot::Mutex::new("a.log".to_string()));

        let source = {
            let current = current.clone();
            move || base.join(current.lock().as_str())
        };
        let builder = FileSinkBuilder::from_source(source);

        let mut first = builder.build().unwrap();
        first.write_text("to-a").unwrap();
        first.close().unwrap();

        *current.lock() = "b.log".to_string();
        let mut second = builder.build().unwrap();
        second.write_text("to-b").unwrap();
        second.close().unwrap();

        assert_eq!(std::fs::read_to_string(dir.path().join("a.log")).unwrap(), "to-a");
        assert_eq!(std::fs::read_to_string(dir.path().join("b.log")).unwrap(), "to-b");
    }
}
