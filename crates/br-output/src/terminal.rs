//! `TerminalRenderer` — the status-line display.
//!
//! Each event produces one line:
//!
//! ```text
//! T:  1.2500s  Dir:L→R  Window: 3  Crossing: 2  Done:  7   Wait: 4 ________________XXXX   ________XX   XXXXX_______________ Wait: 5   someone entered the crossing from the left
//! ```
//!
//! The left queue is drawn with its front nearest the crossing, the transit
//! area in the direction of travel, and the right queue front-first.

use std::io::Write;

use br_core::Side;
use br_sim::{CrossingEvent, CrossingObserver, QueueView, RunReport, Snapshot};

use crate::{OutputError, OutputResult};

const OCCUPIED_CHAR: char = 'X';
const EMPTY_CHAR: char = '_';

/// A [`CrossingObserver`] that prints one status line per event.
pub struct TerminalRenderer<W: Write> {
    out:        W,
    last_error: Option<OutputError>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write and flush one line, so each event shows up as it happens.
    fn write_line(&mut self, line: &str) {
        if self.last_error.is_some() {
            return;
        }
        let result = writeln!(self.out, "{line}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            self.last_error = Some(e.into());
        }
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Render a queue's occupancy as `X`/`_`.
pub fn render_pattern(view: &QueueView) -> String {
    view.occupancy
        .iter()
        .map(|&occupied| if occupied { OCCUPIED_CHAR } else { EMPTY_CHAR })
        .collect()
}

/// The counters and three queue patterns, without a message.
pub fn render_state(snapshot: &Snapshot) -> String {
    format!(
        "T:{:8.4}s  Dir:{}  Window:{:2}  Crossing:{:2}  Done:{:3}   Wait:{:2} {}   {}   {} Wait:{:2}",
        snapshot.elapsed_secs,
        snapshot.direction.arrow(),
        snapshot.window,
        snapshot.in_transit,
        snapshot.completed,
        snapshot.left.waiting,
        render_pattern(&snapshot.left),
        render_pattern(&snapshot.transit),
        render_pattern(&snapshot.right),
        snapshot.right.waiting,
    )
}

/// One-sentence description of `event`.
pub fn describe(event: &CrossingEvent) -> String {
    match event {
        CrossingEvent::Arrived { side, .. } => {
            format!("a new person is waiting on the {side}")
        }
        CrossingEvent::Refused { side, .. } => {
            format!("the {side} queue is full, a new arrival was turned away")
        }
        CrossingEvent::LeftQueue { side, .. } => {
            format!("someone left the {side} queue")
        }
        CrossingEvent::EnteredTransit { side, .. } => {
            format!("someone entered the crossing from the {side}")
        }
        CrossingEvent::AdmissionStopped { side, .. } => {
            format!("nobody else is waiting on the {side}")
        }
        CrossingEvent::Crossed { side, .. } => {
            let to = side.opposite();
            format!("someone reached the {to} side")
        }
        CrossingEvent::Switched { direction, window, .. } => {
            format!("direction is now {}, window {window}", direction.arrow())
        }
    }
}

impl<W: Write> CrossingObserver for TerminalRenderer<W> {
    fn on_start(&mut self, snapshot: &Snapshot) {
        let line = format!("{}   simulation started", render_state(snapshot));
        self.write_line(&line);
    }

    fn on_event(&mut self, event: &CrossingEvent, snapshot: &Snapshot) {
        let line = format!("{}   {}", render_state(snapshot), describe(event));
        self.write_line(&line);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        let line = format!(
            "done: {} crossings in {} epochs ({} from the left, {} from the right)",
            report.completed,
            report.epochs.len(),
            report.crossed_from(Side::Left),
            report.crossed_from(Side::Right),
        );
        self.write_line(&line);
        if let Err(e) = self.flush() {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
