//! Adaptive batch-size ("window") control.
//!
//! The next window is a weighted average of both queue lengths, biased
//! toward the side about to become active:
//!
//!   avg    = (bias * own + other) / (bias + 1)
//!   window = clamp(min(avg, own), 1, transit_capacity)
//!
//! Capping at `own` keeps the scheduler from planning more admissions than
//! there are occupants; the clamp keeps at least one slot open so an empty
//! side still gets its (short) epoch.

use br_core::Side;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WindowController {
    transit_capacity: usize,
    bias:             usize,
}

impl WindowController {
    /// Weight of the active side's own queue relative to the opposing one.
    pub const DEFAULT_BIAS: usize = 4;

    pub fn new(transit_capacity: usize) -> Self {
        Self::with_bias(transit_capacity, Self::DEFAULT_BIAS)
    }

    pub fn with_bias(transit_capacity: usize, bias: usize) -> Self {
        Self { transit_capacity: transit_capacity.max(1), bias }
    }

    #[inline]
    pub fn transit_capacity(&self) -> usize {
        self.transit_capacity
    }

    /// Window for the next epoch, given both queue lengths and the side that
    /// will be active.  Always in `[1, transit_capacity]`.
    pub fn next_window(&self, left: usize, right: usize, active: Side) -> usize {
        let (own, other) = match active {
            Side::Left  => (left, right),
            Side::Right => (right, left),
        };
        let weighted = self.bias.saturating_mul(own).saturating_add(other);
        let avg = weighted / self.bias.saturating_add(1);
        avg.min(own).clamp(1, self.transit_capacity)
    }
}
