//! Plain data row types written by output backends.

use serde::Serialize;

/// One event with the counters it left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    /// Simulated seconds since start.
    pub elapsed_secs:  f64,
    pub kind:          &'static str,
    pub side:          &'static str,
    /// Empty for events that concern no single occupant.
    pub occupant:      Option<u64>,
    pub direction:     &'static str,
    pub window:        usize,
    pub in_transit:    usize,
    pub completed:     u64,
    pub left_waiting:  usize,
    pub right_waiting: usize,
}

/// One finished epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EpochRow {
    pub epoch:         u32,
    pub direction:     &'static str,
    pub window:        usize,
    pub admitted:      usize,
    pub crossed:       usize,
    pub stopped_early: bool,
    pub next_window:   usize,
    pub completed:     u64,
}
