//! `CrossingScheduler` — the consumer side of the simulation, written as an
//! explicit state machine so it can be driven one transition at a time.

use br_core::{EpochId, Side};
use br_queue::QueueError;
use tracing::{debug, info, trace};

use crate::observer::Reporter;
use crate::{CrossingEvent, CrossingObserver, EpochSummary, SimContext, SimResult};

/// Admission is split into two half-unit pauses: leaving the queue, then
/// stepping into the transit area.
const HALF_UNIT: f64 = 0.5;
/// One occupant needs one unit to cross.
const CROSSING_UNITS: f64 = 1.0;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SchedulerState {
    /// Before the first epoch.
    Idle,
    /// Moving occupants from the active side into the transit area.
    Admitting,
    /// Draining the transit area.
    Transiting,
    /// Flipping direction and recomputing the window.
    Switching,
    /// Target reached (or run cancelled); no further epochs.
    Done,
}

/// Bookkeeping for the epoch in progress.
#[derive(Clone, Debug)]
struct EpochProgress {
    epoch:         EpochId,
    direction:     Side,
    window:        usize,
    admitted:      usize,
    crossed:       usize,
    stopped_early: bool,
}

pub struct CrossingScheduler {
    state:   SchedulerState,
    epoch:   EpochId,
    current: Option<EpochProgress>,
    history: Vec<EpochSummary>,
}

impl CrossingScheduler {
    pub fn new() -> Self {
        Self {
            state:   SchedulerState::Idle,
            epoch:   EpochId::FIRST,
            current: None,
            history: Vec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Summaries of every finished epoch, oldest first.
    pub fn history(&self) -> &[EpochSummary] {
        &self.history
    }

    pub(crate) fn take_history(&mut self) -> Vec<EpochSummary> {
        std::mem::take(&mut self.history)
    }

    /// Run transitions until `Done`.
    pub(crate) fn run<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>) -> SimResult<()>
    where
        O: CrossingObserver + ?Sized,
    {
        while self.state != SchedulerState::Done {
            self.step(ctx, reporter)?;
        }
        Ok(())
    }

    /// Perform exactly one state transition and return the new state.
    ///
    /// On error the state is left unchanged and the crossing permit is
    /// released.
    pub(crate) fn step<O>(
        &mut self,
        ctx:      &SimContext,
        reporter: &Reporter<'_, O>,
    ) -> SimResult<SchedulerState>
    where
        O: CrossingObserver + ?Sized,
    {
        self.state = match self.state {
            SchedulerState::Idle => {
                let startup = ctx.pacer.real(ctx.config.startup_delay_units);
                if ctx.shutdown.wait_for(startup) || ctx.completed.is_reached() {
                    self.finish(ctx)
                } else {
                    SchedulerState::Admitting
                }
            }
            SchedulerState::Admitting => {
                self.admit(ctx, reporter).inspect_err(|_| ctx.permit.release())?;
                SchedulerState::Transiting
            }
            SchedulerState::Transiting => {
                self.transit(ctx, reporter).inspect_err(|_| ctx.permit.release())?;
                SchedulerState::Switching
            }
            SchedulerState::Switching => {
                self.switch(ctx, reporter);
                if ctx.completed.is_reached() || ctx.shutdown.is_cancelled() {
                    self.finish(ctx)
                } else {
                    SchedulerState::Admitting
                }
            }
            SchedulerState::Done => SchedulerState::Done,
        };
        Ok(self.state)
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Admit up to `window` occupants from the active side.  An empty queue
    /// ends admission early; it never blocks waiting for arrivals.
    fn admit<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>) -> SimResult<()>
    where
        O: CrossingObserver + ?Sized,
    {
        ctx.permit.acquire();
        let side = ctx.direction();
        let window = ctx.window();
        let mut progress = EpochProgress {
            epoch: self.epoch,
            direction: side,
            window,
            admitted: 0,
            crossed: 0,
            stopped_early: false,
        };

        for _ in 0..window {
            ctx.pacer.pause(HALF_UNIT);
            let occupant = match ctx.gate(side).release_front() {
                Ok(occupant) => occupant,
                Err(QueueError::Empty) => {
                    progress.stopped_early = true;
                    debug!(%side, admitted = progress.admitted, window, "queue ran dry, admission stopped");
                    reporter.emit(ctx, CrossingEvent::AdmissionStopped {
                        side,
                        admitted: progress.admitted,
                    });
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            reporter.emit(ctx, CrossingEvent::LeftQueue { side, occupant });

            ctx.pacer.pause(HALF_UNIT);
            ctx.enter_transit(occupant)?;
            progress.admitted += 1;
            trace!(%side, %occupant, "entered transit");
            reporter.emit(ctx, CrossingEvent::EnteredTransit { side, occupant });
        }

        self.current = Some(progress);
        Ok(())
    }

    /// Drain the transit area completely.
    fn transit<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>) -> SimResult<()>
    where
        O: CrossingObserver + ?Sized,
    {
        let side = ctx.direction();
        let mut crossed = 0;
        while ctx.in_transit() > 0 {
            ctx.pacer.pause(CROSSING_UNITS);
            let occupant = ctx.leave_transit()?;
            let total = ctx.completed.record();
            crossed += 1;
            trace!(%side, %occupant, total, "crossed");
            reporter.emit(ctx, CrossingEvent::Crossed { side, occupant });
        }
        ctx.rewind_transit();
        if let Some(progress) = self.current.as_mut() {
            progress.crossed = crossed;
        }
        Ok(())
    }

    /// Flip direction, compute the next window, release the permit.
    fn switch<O>(&mut self, ctx: &SimContext, reporter: &Reporter<'_, O>)
    where
        O: CrossingObserver + ?Sized,
    {
        let served = ctx.direction();
        let next = served.opposite();
        ctx.set_direction(next);

        let left = ctx.gate(Side::Left).waiting();
        let right = ctx.gate(Side::Right).waiting();
        let window = ctx.controller.next_window(left, right, next);
        ctx.set_window(window);
        ctx.permit.release();

        let progress = self.current.take().unwrap_or(EpochProgress {
            epoch:         self.epoch,
            direction:     served,
            window,
            admitted:      0,
            crossed:       0,
            stopped_early: false,
        });
        let summary = EpochSummary {
            epoch:         progress.epoch,
            direction:     progress.direction,
            window:        progress.window,
            admitted:      progress.admitted,
            crossed:       progress.crossed,
            stopped_early: progress.stopped_early,
            next_window:   window,
            completed:     ctx.completed.count(),
        };
        debug!(
            epoch = summary.epoch.0,
            served = %served,
            admitted = summary.admitted,
            left_waiting = left,
            right_waiting = right,
            next_window = window,
            "epoch finished"
        );
        reporter.emit(ctx, CrossingEvent::Switched { epoch: self.epoch, direction: next, window });
        reporter.epoch_end(&summary);
        self.history.push(summary);
        self.epoch = self.epoch.next();
    }

    /// Enter `Done`: tell the arrival processes to stop.
    fn finish(&mut self, ctx: &SimContext) -> SchedulerState {
        ctx.shutdown.cancel();
        info!(
            completed = ctx.completed.count(),
            target = ctx.completed.target(),
            epochs = self.history.len(),
            "crossing scheduler done"
        );
        SchedulerState::Done
    }
}

impl Default for CrossingScheduler {
    fn default() -> Self {
        Self::new()
    }
}
