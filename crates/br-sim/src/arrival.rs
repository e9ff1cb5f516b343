//! `ArrivalProcess` — the per-side producer.

use br_core::{ArrivalProfile, ArrivalRng, Side};
use br_queue::QueueError;
use tracing::{debug, trace, warn};

use crate::observer::Reporter;
use crate::{CrossingEvent, CrossingObserver, SimContext, SimResult};

/// Periodically adds one occupant to its side's queue.
///
/// Gaps are drawn from the side's [`ArrivalProfile`] with an RNG seeded from
/// the run seed, so both sides are reproducible independently of thread
/// interleaving.
pub struct ArrivalProcess {
    side:    Side,
    profile: ArrivalProfile,
    rng:     ArrivalRng,
}

impl ArrivalProcess {
    pub fn new(side: Side, profile: ArrivalProfile, seed: u64) -> Self {
        Self { side, profile, rng: ArrivalRng::new(seed, side) }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Loop until the shutdown signal fires.
    ///
    /// Each iteration waits one gap, then enqueues one arrival.  The wait is
    /// the only suspension point that observes shutdown, and it wakes early
    /// on cancellation.
    pub(crate) fn run<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>) -> SimResult<()>
    where
        O: CrossingObserver + ?Sized,
    {
        debug!(side = %self.side, mean_units = self.profile.mean_units(), "arrival process started");
        while !ctx.shutdown.is_cancelled() {
            let gap = self.rng.next_gap(&self.profile);
            if ctx.shutdown.wait_for(ctx.pacer.real(gap)) {
                break;
            }
            self.arrive(ctx, reporter)?;
        }
        debug!(side = %self.side, arrivals = ctx.arrivals(self.side), "arrival process stopped");
        Ok(())
    }

    /// Enqueue one new occupant.  A full queue refuses the arrival; any other
    /// queue fault is returned.
    pub(crate) fn arrive<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>) -> SimResult<()>
    where
        O: CrossingObserver + ?Sized,
    {
        let side = self.side;
        let occupant = ctx.issuer.issue();
        match ctx.gate(side).admit(occupant) {
            Ok(()) => {
                ctx.record_arrival(side);
                trace!(%side, %occupant, "arrived");
                reporter.emit(ctx, CrossingEvent::Arrived { side, occupant });
                Ok(())
            }
            Err(QueueError::CapacityExceeded { capacity }) => {
                ctx.record_refusal(side);
                warn!(%side, %occupant, capacity, "approach queue full, arrival refused");
                reporter.emit(ctx, CrossingEvent::Refused { side, occupant });
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
