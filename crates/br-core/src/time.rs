//! Simulated time and delay pacing.
//!
//! # Design
//!
//! Every simulated delay is expressed in *units*.  One unit is
//! `unit_latency` of simulated time (the time one occupant needs to cross).
//! The mapping to wall-clock time is held in `Pacer`:
//!
//!   real_sleep = units * unit_latency * time_scale
//!
//! `time_scale = 1.0` runs in real time, `0.5` twice as fast, and `0.0`
//! collapses every delay to nothing, which is what the test suites use.
//! `SimClock` applies the inverse mapping so elapsed time always reads in
//! simulated seconds.

use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

// ── Pacer ─────────────────────────────────────────────────────────────────────

/// Converts unit counts into real sleeps.
///
/// `Pacer` is `Copy` and holds no heap data, so every thread keeps its own.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pacer {
    /// Simulated duration of one unit.
    pub unit_latency: Duration,
    /// Real seconds per simulated second.  `0.0` disables sleeping.
    pub time_scale:   f64,
}

impl Pacer {
    pub fn new(unit_latency: Duration, time_scale: f64) -> Self {
        Self { unit_latency, time_scale }
    }

    /// A pacer that never sleeps.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, 0.0)
    }

    /// Simulated duration of `units`.  Saturates at `Duration::MAX`.
    #[inline]
    pub fn simulated(&self, units: f64) -> Duration {
        scale(self.unit_latency, units)
    }

    /// Real (wall-clock) duration of `units`.
    #[inline]
    pub fn real(&self, units: f64) -> Duration {
        if self.time_scale <= 0.0 {
            return Duration::ZERO;
        }
        scale(self.simulated(units), self.time_scale)
    }

    /// Block the calling thread for `units` of simulated time.
    ///
    /// Not cancellable; callers that must react to shutdown wait on a
    /// signal with [`Pacer::real`] as the timeout instead.
    pub fn pause(&self, units: f64) {
        let real = self.real(units);
        if !real.is_zero() {
            thread::sleep(real);
        }
    }
}

/// `d * factor`, clamped to `[0, Duration::MAX]` instead of panicking.
fn scale(d: Duration, factor: f64) -> Duration {
    Duration::try_from_secs_f64(d.as_secs_f64() * factor.max(0.0)).unwrap_or(Duration::MAX)
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Measures elapsed simulated time since the run started.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    started:    Instant,
    time_scale: f64,
}

impl SimClock {
    /// Start a clock now.
    pub fn start(time_scale: f64) -> Self {
        Self { started: Instant::now(), time_scale }
    }

    /// Real time since start.
    #[inline]
    pub fn wall_elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Simulated seconds since start.
    ///
    /// With `time_scale == 0` no simulated time passes between events, so
    /// the wall clock is reported unchanged.
    pub fn elapsed_secs(&self) -> f64 {
        let wall = self.wall_elapsed().as_secs_f64();
        if self.time_scale > 0.0 { wall / self.time_scale } else { wall }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:8.4}s", self.elapsed_secs())
    }
}
