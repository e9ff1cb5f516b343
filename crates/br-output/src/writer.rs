//! The `OutputWriter` trait implemented by log backends.

use crate::{EpochRow, EventRow, OutputResult};

/// Trait implemented by event-log backends.
///
/// Errors are returned here and stored by [`EventLogObserver`][crate::EventLogObserver].
pub trait OutputWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_epoch(&mut self, row: &EpochRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
