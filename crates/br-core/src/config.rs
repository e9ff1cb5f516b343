//! Simulation configuration.
//!
//! Defaults reproduce the classic two-queue bridge set-up: 20-slot approach
//! queues, a 10-slot crossing, a seed window of 3, and 150 crossings before
//! shutdown.  Typically loaded from a TOML file by the application crate and
//! then overridden from the command line.
//!
//! ```toml
//! approach_capacity = 20
//! transit_capacity  = 10
//! target_crossings  = 40
//! time_scale        = 0.25
//!
//! [right]
//! preload = 2
//! arrivals = { base_units = 1.0, spread_units = 3.0 }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Pacer, Side};

// ── ArrivalProfile ────────────────────────────────────────────────────────────

/// Uniform inter-arrival distribution `[base, base + spread)`, in units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalProfile {
    pub base_units:   f64,
    pub spread_units: f64,
}

impl ArrivalProfile {
    pub fn new(base_units: f64, spread_units: f64) -> Self {
        Self { base_units, spread_units }
    }

    /// Mean gap between arrivals, in units.
    pub fn mean_units(&self) -> f64 {
        self.base_units + self.spread_units / 2.0
    }
}

impl Default for ArrivalProfile {
    fn default() -> Self {
        Self::new(2.0, 7.0)
    }
}

// ── SideConfig ────────────────────────────────────────────────────────────────

/// Per-side settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideConfig {
    /// Inter-arrival distribution for this side's arrival process.
    pub arrivals: ArrivalProfile,
    /// Occupants placed in the approach queue before any thread starts.
    pub preload:  usize,
    /// `false` runs no arrival process for this side; only the preload is
    /// ever served.
    pub enabled:  bool,
}

impl Default for SideConfig {
    fn default() -> Self {
        Self { arrivals: ArrivalProfile::default(), preload: 0, enabled: true }
    }
}

// ── CrossingConfig ────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingConfig {
    /// Slots in each approach queue.
    pub approach_capacity:   usize,
    /// Slots in the transit area; also the upper bound of the window.
    pub transit_capacity:    usize,
    /// Window used for the first epoch.
    pub initial_window:      usize,
    /// Completed crossings after which the run shuts down.
    pub target_crossings:    u64,
    /// Simulated time of one unit, in milliseconds.
    pub unit_latency_ms:     u64,
    /// Real seconds per simulated second.  `0.0` disables all sleeping.
    pub time_scale:          f64,
    /// Units the scheduler waits before its first epoch.
    pub startup_delay_units: f64,
    /// Master RNG seed.  The same seed always yields the same arrival gaps.
    pub seed:                u64,
    /// Side served by the first epoch.
    pub initial_direction:   Side,
    pub left:                SideConfig,
    pub right:               SideConfig,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            approach_capacity:   20,
            transit_capacity:    10,
            initial_window:      3,
            target_crossings:    150,
            unit_latency_ms:     50,
            time_scale:          1.0,
            startup_delay_units: 3.0,
            seed:                42,
            initial_direction:   Side::Left,
            left: SideConfig {
                arrivals: ArrivalProfile::new(2.0, 7.0),
                preload:  5,
                enabled:  true,
            },
            right: SideConfig {
                arrivals: ArrivalProfile::new(2.0, 5.0),
                preload:  6,
                enabled:  true,
            },
        }
    }
}

impl CrossingConfig {
    /// Parse a TOML document.  Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn side(&self, side: Side) -> &SideConfig {
        match side {
            Side::Left  => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideConfig {
        match side {
            Side::Left  => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Pacer configured for this run.
    pub fn pacer(&self) -> Pacer {
        Pacer::new(Duration::from_millis(self.unit_latency_ms), self.time_scale)
    }

    /// Check every cross-field constraint.  Called by the simulation builder.
    pub fn validate(&self) -> CoreResult<()> {
        if self.approach_capacity == 0 {
            return Err(CoreError::Config("approach_capacity must be at least 1".into()));
        }
        if self.transit_capacity == 0 {
            return Err(CoreError::Config("transit_capacity must be at least 1".into()));
        }
        if self.initial_window == 0 || self.initial_window > self.transit_capacity {
            return Err(CoreError::Config(format!(
                "initial_window {} must lie in [1, {}]",
                self.initial_window, self.transit_capacity
            )));
        }
        if self.target_crossings == 0 {
            return Err(CoreError::Config("target_crossings must be at least 1".into()));
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(CoreError::Config(format!(
                "time_scale {} must be a finite, non-negative number",
                self.time_scale
            )));
        }
        if !self.startup_delay_units.is_finite() || self.startup_delay_units < 0.0 {
            return Err(CoreError::Config("startup_delay_units must be non-negative".into()));
        }
        for side in Side::BOTH {
            let cfg = self.side(side);
            if cfg.preload > self.approach_capacity {
                return Err(CoreError::Config(format!(
                    "{side} preload {} exceeds approach_capacity {}",
                    cfg.preload, self.approach_capacity
                )));
            }
            let p = &cfg.arrivals;
            if !p.base_units.is_finite() || !p.spread_units.is_finite()
                || p.base_units < 0.0 || p.spread_units < 0.0
            {
                return Err(CoreError::Config(format!(
                    "{side} arrival profile must be finite and non-negative"
                )));
            }
            if cfg.enabled && p.base_units + p.spread_units <= 0.0 {
                return Err(CoreError::Config(format!(
                    "{side} arrival profile must have a positive base or spread"
                )));
            }
        }
        Ok(())
    }
}
