//! Observer trait for display and data collection, plus the value types it
//! receives.

use br_core::{EpochId, OccupantId, Side};
use parking_lot::Mutex;

use crate::SimContext;

// ── Events ────────────────────────────────────────────────────────────────────

/// Every state change the display collaborator is told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrossingEvent {
    /// A new occupant joined the back of `side`'s queue.
    Arrived { side: Side, occupant: OccupantId },
    /// `side`'s queue was full; the occupant was turned away.
    Refused { side: Side, occupant: OccupantId },
    /// The front occupant left `side`'s queue.
    LeftQueue { side: Side, occupant: OccupantId },
    /// That occupant entered the transit area.
    EnteredTransit { side: Side, occupant: OccupantId },
    /// `side` ran dry before the window was filled.
    AdmissionStopped { side: Side, admitted: usize },
    /// An occupant from `side` finished crossing.
    Crossed { side: Side, occupant: OccupantId },
    /// Epoch `epoch` ended; `direction` and `window` apply to the next one.
    Switched { epoch: EpochId, direction: Side, window: usize },
}

impl CrossingEvent {
    /// Stable label, used as a CSV column value.
    pub fn kind(&self) -> &'static str {
        match self {
            CrossingEvent::Arrived { .. }          => "arrived",
            CrossingEvent::Refused { .. }          => "refused",
            CrossingEvent::LeftQueue { .. }        => "left_queue",
            CrossingEvent::EnteredTransit { .. }   => "entered_transit",
            CrossingEvent::AdmissionStopped { .. } => "admission_stopped",
            CrossingEvent::Crossed { .. }          => "crossed",
            CrossingEvent::Switched { .. }         => "switched",
        }
    }

    /// The side the event concerns.  For `Switched`, the newly active side.
    pub fn side(&self) -> Side {
        match *self {
            CrossingEvent::Arrived { side, .. }
            | CrossingEvent::Refused { side, .. }
            | CrossingEvent::LeftQueue { side, .. }
            | CrossingEvent::EnteredTransit { side, .. }
            | CrossingEvent::AdmissionStopped { side, .. }
            | CrossingEvent::Crossed { side, .. } => side,
            CrossingEvent::Switched { direction, .. } => direction,
        }
    }

    pub fn occupant(&self) -> Option<OccupantId> {
        match *self {
            CrossingEvent::Arrived { occupant, .. }
            | CrossingEvent::Refused { occupant, .. }
            | CrossingEvent::LeftQueue { occupant, .. }
            | CrossingEvent::EnteredTransit { occupant, .. }
            | CrossingEvent::Crossed { occupant, .. } => Some(occupant),
            CrossingEvent::AdmissionStopped { .. } | CrossingEvent::Switched { .. } => None,
        }
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Occupancy of one queue, oriented as it is drawn left-to-right on screen.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct QueueView {
    pub waiting:   usize,
    pub occupancy: Vec<bool>,
}

/// Read-only system state taken right after an event.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Simulated seconds since the run started.
    pub elapsed_secs: f64,
    pub direction:    Side,
    pub window:       usize,
    pub in_transit:   usize,
    pub completed:    u64,
    pub left:         QueueView,
    pub transit:      QueueView,
    pub right:        QueueView,
}

impl Snapshot {
    pub fn queue(&self, side: Side) -> &QueueView {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }
}

// ── Summaries ─────────────────────────────────────────────────────────────────

/// What one epoch did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochSummary {
    pub epoch:         EpochId,
    /// Side served this epoch.
    pub direction:     Side,
    /// Window in force when admission started.
    pub window:        usize,
    pub admitted:      usize,
    pub crossed:       usize,
    /// Admission ended before `window` because the queue ran dry.
    pub stopped_early: bool,
    /// Window computed for the following epoch.
    pub next_window:   usize,
    /// Completion count after this epoch's transit drained.
    pub completed:     u64,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub epochs:        Vec<EpochSummary>,
    pub completed:     u64,
    pub target:        u64,
    /// Accepted arrivals per side (index with `Side::index()`).
    pub arrivals:      [u64; 2],
    /// Refused arrivals per side.
    pub refused:       [u64; 2],
    /// Occupants still waiting per side when the run ended.
    pub waiting:       [usize; 2],
    pub elapsed_secs:  f64,
}

impl RunReport {
    pub(crate) fn collect(ctx: &SimContext, epochs: Vec<EpochSummary>) -> Self {
        Self {
            epochs,
            completed:    ctx.completed.count(),
            target:       ctx.completed.target(),
            arrivals:     Side::BOTH.map(|s| ctx.arrivals(s)),
            refused:      Side::BOTH.map(|s| ctx.refused(s)),
            waiting:      Side::BOTH.map(|s| ctx.gate(s).waiting()),
            elapsed_secs: ctx.clock.elapsed_secs(),
        }
    }

    /// Epochs that served `side`.
    pub fn epochs_for(&self, side: Side) -> impl Iterator<Item = &EpochSummary> + '_ {
        self.epochs.iter().filter(move |e| e.direction == side)
    }

    /// Occupants carried across from `side`.
    pub fn crossed_from(&self, side: Side) -> usize {
        self.epochs_for(side).map(|e| e.crossed).sum()
    }
}

// ── Observer trait ────────────────────────────────────────────────────────────

/// Callbacks invoked by [`Simulation`][crate::Simulation] as the run unfolds.
///
/// All methods default to no-ops.  Calls are serialised under one lock, so an
/// implementation never sees two callbacks at once; it must not block for
/// long because the scheduler waits on the same lock.
///
/// # Example — epoch printer
///
/// ```rust,ignore
/// struct EpochPrinter;
///
/// impl CrossingObserver for EpochPrinter {
///     fn on_epoch_end(&mut self, s: &EpochSummary) {
///         println!("{}: {} crossed from {}", s.epoch, s.crossed, s.direction);
///     }
/// }
/// ```
pub trait CrossingObserver {
    /// Called once before any thread starts.
    fn on_start(&mut self, _snapshot: &Snapshot) {}

    /// Called after every state-changing event.
    fn on_event(&mut self, _event: &CrossingEvent, _snapshot: &Snapshot) {}

    /// Called when an epoch finishes switching.
    fn on_epoch_end(&mut self, _summary: &EpochSummary) {}

    /// Called once after all threads have been joined.
    fn on_sim_end(&mut self, _report: &RunReport) {}
}

/// A [`CrossingObserver`] that does nothing.
pub struct NoopObserver;

impl CrossingObserver for NoopObserver {}

impl<A: CrossingObserver, B: CrossingObserver> CrossingObserver for (A, B) {
    fn on_start(&mut self, snapshot: &Snapshot) {
        self.0.on_start(snapshot);
        self.1.on_start(snapshot);
    }

    fn on_event(&mut self, event: &CrossingEvent, snapshot: &Snapshot) {
        self.0.on_event(event, snapshot);
        self.1.on_event(event, snapshot);
    }

    fn on_epoch_end(&mut self, summary: &EpochSummary) {
        self.0.on_epoch_end(summary);
        self.1.on_epoch_end(summary);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        self.0.on_sim_end(report);
        self.1.on_sim_end(report);
    }
}

impl<O: CrossingObserver + ?Sized> CrossingObserver for &mut O {
    fn on_start(&mut self, snapshot: &Snapshot) {
        (**self).on_start(snapshot);
    }

    fn on_event(&mut self, event: &CrossingEvent, snapshot: &Snapshot) {
        (**self).on_event(event, snapshot);
    }

    fn on_epoch_end(&mut self, summary: &EpochSummary) {
        (**self).on_epoch_end(summary);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        (**self).on_sim_end(report);
    }
}

// ── Reporter ──────────────────────────────────────────────────────────────────

/// The single print lock: owns the observer for the duration of a run and
/// pairs every event with a fresh snapshot.
pub(crate) struct Reporter<'o, O: CrossingObserver + ?Sized> {
    observer: Mutex<&'o mut O>,
}

impl<'o, O: CrossingObserver + ?Sized> Reporter<'o, O> {
    pub(crate) fn new(observer: &'o mut O) -> Self {
        Self { observer: Mutex::new(observer) }
    }

    pub(crate) fn start(&self, ctx: &SimContext) {
        let mut observer = self.observer.lock();
        observer.on_start(&ctx.snapshot());
    }

    /// Deliver `event`.  The caller must not hold any gate or transit lock.
    pub(crate) fn emit(&self, ctx: &SimContext, event: CrossingEvent) {
        let mut observer = self.observer.lock();
        let snapshot = ctx.snapshot();
        observer.on_event(&event, &snapshot);
    }

    pub(crate) fn epoch_end(&self, summary: &EpochSummary) {
        self.observer.lock().on_epoch_end(summary);
    }

    pub(crate) fn finish(&self, report: &RunReport) {
        self.observer.lock().on_sim_end(report);
    }
}
