//! # Fan-out writer: one logical channel, many sinks.
//!
//! [`FanoutWriter`] owns an ordered sequence of sinks and replicates every
//! write to all of them, in registration order, flushing each sink right
//! after writing so output is immediately visible everywhere.
//!
//! ## Lifecycle
//! ```text
//! new(id) ──► set_builders([...]) ──► first write/flush ──► materialized
//!                                      (builders invoked    (at most once
//!                                       in order)            per instance)
//! ```
//!
//! ## Rules
//! - Sinks are materialized lazily, at most once per writer instance. A
//!   builder failure aborts the whole materialization; no sink from that
//!   attempt is kept.
//! - A failure on one sink mid-iteration aborts the remaining sinks of that
//!   call. There is no rollback and no per-sink isolation; the first error
//!   propagates to the caller.
//! - `mark_permanent` is idempotent and one-directional; a permanent writer
//!   treats `close` as a no-op for the rest of its lifetime.

use std::sync::Arc;

use tracing::debug;

use crate::error::OutputError;
use crate::sinks::{Sink, SinkBuilder};

/// Replicates writes on one channel to all of its sinks.
pub struct FanoutWriter {
    channel: String,
    builders: Option<Vec<Arc<dyn SinkBuilder>>>,
    sinks: Vec<Box<dyn Sink>>,
    built: bool,
    permanent: bool,
}

impl FanoutWriter {
    /// Creates an empty writer for the given channel identifier.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            builders: None,
            sinks: Vec::new(),
            built: false,
            permanent: false,
        }
    }

    /// The channel identifier this writer belongs to.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Records the sink recipes for this writer.
    ///
    /// Has no effect on already-materialized sinks: materialization happens
    /// at most once per instance.
    pub fn set_builders(&mut self, builders: Vec<Arc<dyn SinkBuilder>>) {
        self.builders = Some(builders);
    }

    /// Marks this writer permanent. One-directional; never cleared.
    pub fn mark_permanent(&mut self) {
        self.permanent = true;
    }

    /// True once [`FanoutWriter::mark_permanent`] has been called.
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }

    /// True once sinks have been materialized.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of materialized sinks (0 before first use).
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    fn ensure_built(&mut self) -> Result<(), OutputError> {
        if self.built {
            return Ok(());
        }
        let Some(builders) = &self.builders else {
            return Ok(());
        };

        let mut sinks = Vec::with_capacity(builders.len());
        for builder in builders {
            sinks.push(builder.build()?);
        }

        debug!(channel = %self.channel, sinks = sinks.len(), "materialized output sinks");
        self.sinks = sinks;
        self.built = true;
        Ok(())
    }

    /// Writes `text` to every sink in registration order, flushing each sink
    /// immediately after its write.
    ///
    /// Materializes sinks on first call. The first failing sink aborts the
    /// remaining sinks of this call.
    pub fn write_text(&mut self, text: &str) -> Result<(), OutputError> {
        self.ensure_built()?;

        for sink in &mut self.sinks {
            sink.write_text(text).map_err(|source| OutputError::Write {
                channel: self.channel.clone(),
                source,
            })?;
            sink.flush().map_err(|source| OutputError::Write {
                channel: self.channel.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Flushes every materialized sink in order.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.ensure_built()?;

        for sink in &mut self.sinks {
            sink.flush().map_err(|source| OutputError::Flush {
                channel: self.channel.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Closes every sink in order; a no-op for permanent writers and for
    /// writers that never materialized.
    ///
    /// The first failing sink aborts the remaining closes.
    pub fn close(&mut self) -> Result<(), OutputError> {
        if self.permanent || !self.built {
            return Ok(());
        }

        for sink in &mut self.sinks {
            sink.close().map_err(|source| OutputError::Close {
                channel: self.channel.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
