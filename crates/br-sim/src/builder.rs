//! Fluent builder for constructing a [`Simulation`].

use br_core::{CrossingConfig, OccupantIssuer, Side};
use br_queue::BoundedQueue;
use tracing::debug;

use crate::{CrossingScheduler, SimContext, SimError, SimResult, Simulation, WindowController};

/// Fluent builder for [`Simulation`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.controller(c)`       | `WindowController::new(transit_capacity)`      |
/// | `.preload(side, n)`    | `config.<side>.preload`                        |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(config)
///     .preload(Side::Right, 0)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     CrossingConfig,
    controller: Option<WindowController>,
}

impl SimBuilder {
    pub fn new(config: CrossingConfig) -> Self {
        Self { config, controller: None }
    }

    /// Replace the default window controller (e.g. a different bias).
    pub fn controller(mut self, controller: WindowController) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Override how many occupants wait on `side` before the run starts.
    pub fn preload(mut self, side: Side, count: usize) -> Self {
        self.config.side_mut(side).preload = count;
        self
    }

    /// Validate the configuration, allocate and preload the queues, and
    /// return a ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        let config = self.config;
        config.validate()?;

        let supplied = Side::BOTH.iter().any(|&s| config.side(s).enabled);
        let preloaded: u64 = Side::BOTH.iter().map(|&s| config.side(s).preload as u64).sum();
        if !supplied && preloaded < config.target_crossings {
            return Err(SimError::Config(format!(
                "no arrival process is enabled and the preload ({preloaded}) cannot reach \
                 target_crossings ({})",
                config.target_crossings
            )));
        }

        let controller = self
            .controller
            .unwrap_or_else(|| WindowController::new(config.transit_capacity));
        if controller.transit_capacity() != config.transit_capacity {
            return Err(SimError::Config(format!(
                "window controller capacity {} does not match transit_capacity {}",
                controller.transit_capacity(),
                config.transit_capacity
            )));
        }

        let issuer = OccupantIssuer::new();
        let mut left = BoundedQueue::new(config.approach_capacity)?;
        let mut right = BoundedQueue::new(config.approach_capacity)?;
        let transit = BoundedQueue::new(config.transit_capacity)?;
        for _ in 0..config.left.preload {
            left.enqueue(issuer.issue())?;
        }
        for _ in 0..config.right.preload {
            right.enqueue(issuer.issue())?;
        }
        debug!(left = left.len(), right = right.len(), "approach queues preloaded");

        let ctx = SimContext::new(config, controller, left, right, transit, issuer);
        Ok(Simulation::new(ctx, CrossingScheduler::new()))
    }
}
