//! `SimContext` — every piece of state shared between the scheduler and the
//! arrival processes.
//!
//! # Lock order
//!
//! `observer → left gate → right gate → transit`.  Snapshots take them in
//! that order; every other path takes at most one lock at a time and never
//! calls into the observer while holding one.

use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};

use br_core::{CrossingConfig, OccupantId, OccupantIssuer, Pacer, Side, SimClock};
use br_queue::{BoundedQueue, Order};
use parking_lot::Mutex;

use crate::{
    CompletionCounter, CrossingPermit, QueueView, ShutdownSignal, SideGate, Snapshot,
    WindowController,
};

pub struct SimContext {
    pub config:     CrossingConfig,
    pub pacer:      Pacer,
    pub clock:      SimClock,
    pub controller: WindowController,

    /// Approach queues, indexed by `Side::index()`.
    gates:          [SideGate; 2],

    /// Transit area.  Mutated only by the scheduler; the lock exists so that
    /// snapshots taken on arrival threads can read it.
    transit:        Mutex<BoundedQueue<OccupantId>>,

    pub permit:     CrossingPermit,
    pub completed:  CompletionCounter,
    pub shutdown:   ShutdownSignal,
    pub issuer:     OccupantIssuer,

    direction:      AtomicU8,
    window:         AtomicUsize,
    arrivals:       [AtomicU64; 2],
    refused:        [AtomicU64; 2],
}

impl SimContext {
    pub(crate) fn new(
        config:     CrossingConfig,
        controller: WindowController,
        left:       BoundedQueue<OccupantId>,
        right:      BoundedQueue<OccupantId>,
        transit:    BoundedQueue<OccupantId>,
        issuer:     OccupantIssuer,
    ) -> Self {
        Self {
            pacer:      config.pacer(),
            clock:      SimClock::start(config.time_scale),
            controller,
            gates:      [SideGate::new(Side::Left, left), SideGate::new(Side::Right, right)],
            transit:    Mutex::new(transit),
            permit:     CrossingPermit::new(),
            completed:  CompletionCounter::new(config.target_crossings),
            shutdown:   ShutdownSignal::new(),
            issuer,
            direction:  AtomicU8::new(config.initial_direction.index() as u8),
            window:     AtomicUsize::new(config.initial_window),
            arrivals:   [AtomicU64::new(0), AtomicU64::new(0)],
            refused:    [AtomicU64::new(0), AtomicU64::new(0)],
            config,
        }
    }

    // ── Gates and transit ─────────────────────────────────────────────────

    #[inline]
    pub fn gate(&self, side: Side) -> &SideGate {
        &self.gates[side.index()]
    }

    pub fn in_transit(&self) -> usize {
        self.transit.lock().len()
    }

    pub(crate) fn enter_transit(&self, occupant: OccupantId) -> br_queue::QueueResult<()> {
        self.transit.lock().enqueue(occupant)
    }

    pub(crate) fn leave_transit(&self) -> br_queue::QueueResult<OccupantId> {
        self.transit.lock().dequeue()
    }

    /// Realign the drained transit area so the next epoch draws from slot 0.
    pub(crate) fn rewind_transit(&self) -> bool {
        self.transit.lock().rewind()
    }

    // ── Direction and window ──────────────────────────────────────────────

    #[inline]
    pub fn direction(&self) -> Side {
        Side::from_index(self.direction.load(Ordering::Acquire) as usize)
    }

    pub(crate) fn set_direction(&self, side: Side) {
        self.direction.store(side.index() as u8, Ordering::Release);
    }

    #[inline]
    pub fn window(&self) -> usize {
        self.window.load(Ordering::Acquire)
    }

    pub(crate) fn set_window(&self, window: usize) {
        self.window.store(window, Ordering::Release);
    }

    // ── Arrival statistics ────────────────────────────────────────────────

    pub(crate) fn record_arrival(&self, side: Side) {
        self.arrivals[side.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_refusal(&self, side: Side) {
        self.refused[side.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Arrivals accepted into `side`'s queue (preload excluded).
    pub fn arrivals(&self, side: Side) -> u64 {
        self.arrivals[side.index()].load(Ordering::Relaxed)
    }

    /// Arrivals turned away because `side`'s queue was full.
    pub fn refused(&self, side: Side) -> u64 {
        self.refused[side.index()].load(Ordering::Relaxed)
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// Read-only picture of the whole system for the display collaborator.
    ///
    /// The transit area is drawn in the direction of travel: reversed while
    /// traffic flows left → right.
    pub fn snapshot(&self) -> Snapshot {
        let direction = self.direction();
        let left = self.gate(Side::Left).view();
        let right = self.gate(Side::Right).view();
        let transit = {
            let order = match direction {
                Side::Left  => Order::Reverse,
                Side::Right => Order::Forward,
            };
            let queue = self.transit.lock();
            QueueView { waiting: queue.len(), occupancy: queue.pattern(order).collect() }
        };
        Snapshot {
            elapsed_secs: self.clock.elapsed_secs(),
            direction,
            window:       self.window(),
            in_transit:   transit.waiting,
            completed:    self.completed.count(),
            left,
            transit,
            right,
        }
    }
}
