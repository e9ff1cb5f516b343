//! `EventLogObserver<W>` — bridges `CrossingObserver` to an `OutputWriter`.

use br_sim::{CrossingEvent, CrossingObserver, EpochSummary, RunReport, Snapshot};

use crate::writer::OutputWriter;
use crate::{EpochRow, EventRow, OutputError, OutputResult};

/// A [`CrossingObserver`] that records every event and every epoch through
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct EventLogObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> CrossingObserver for EventLogObserver<W> {
    fn on_event(&mut self, event: &CrossingEvent, snapshot: &Snapshot) {
        let row = EventRow {
            elapsed_secs:  snapshot.elapsed_secs,
            kind:          event.kind(),
            side:          event.side().as_str(),
            occupant:      event.occupant().map(|o| o.0),
            direction:     snapshot.direction.as_str(),
            window:        snapshot.window,
            in_transit:    snapshot.in_transit,
            completed:     snapshot.completed,
            left_waiting:  snapshot.left.waiting,
            right_waiting: snapshot.right.waiting,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_epoch_end(&mut self, summary: &EpochSummary) {
        let row = EpochRow {
            epoch:         summary.epoch.0,
            direction:     summary.direction.as_str(),
            window:        summary.window,
            admitted:      summary.admitted,
            crossed:       summary.crossed,
            stopped_early: summary.stopped_early,
            next_window:   summary.next_window,
            completed:     summary.completed,
        };
        let result = self.writer.write_epoch(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _report: &RunReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
