//! The `Simulation` struct and its thread layout.

use std::thread;

use br_core::Side;
use tracing::{error, info};

use crate::arrival::ArrivalProcess;
use crate::observer::Reporter;
use crate::signal::CancelOnDrop;
use crate::{
    CrossingObserver, CrossingScheduler, RunReport, SchedulerState, SimContext, SimError,
    SimResult,
};

/// A built, not-yet-finished simulation.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    ctx:       SimContext,
    scheduler: CrossingScheduler,
}

impl Simulation {
    pub(crate) fn new(ctx: SimContext, scheduler: CrossingScheduler) -> Self {
        Self { ctx, scheduler }
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &CrossingScheduler {
        &self.scheduler
    }

    /// Run to completion: one scheduler thread plus one arrival thread per
    /// enabled side.  Returns once every thread has been joined.
    ///
    /// If any thread fails, the shutdown signal is raised so the others wind
    /// down, and the first error is returned.
    pub fn run<O>(mut self, observer: &mut O) -> SimResult<RunReport>
    where
        O: CrossingObserver + Send + ?Sized,
    {
        let reporter = Reporter::new(observer);
        reporter.start(&self.ctx);
        info!(
            target_crossings = self.ctx.config.target_crossings,
            direction = %self.ctx.direction(),
            window = self.ctx.window(),
            left_waiting = self.ctx.gate(Side::Left).waiting(),
            right_waiting = self.ctx.gate(Side::Right).waiting(),
            "simulation starting"
        );

        let outcome = run_threads(&self.ctx, &mut self.scheduler, &reporter);

        let report = RunReport::collect(&self.ctx, self.scheduler.take_history());
        match &outcome {
            Ok(()) => info!(
                completed = report.completed,
                epochs = report.epochs.len(),
                elapsed_secs = report.elapsed_secs,
                "simulation finished"
            ),
            Err(e) => error!(error = %e, "simulation aborted"),
        }
        outcome?;
        reporter.finish(&report);
        Ok(report)
    }

    /// Advance the scheduler by one state transition on the calling thread.
    ///
    /// No arrival processes run; only preloaded occupants are served.  Useful
    /// for tests and for inspecting the state machine.
    pub fn step<O>(&mut self, observer: &mut O) -> SimResult<SchedulerState>
    where
        O: CrossingObserver + ?Sized,
    {
        let reporter = Reporter::new(observer);
        self.scheduler.step(&self.ctx, &reporter)
    }

    /// Summarise what has happened so far.
    pub fn report(&self) -> RunReport {
        RunReport::collect(&self.ctx, self.scheduler.history().to_vec())
    }
}

fn run_threads<O>(
    ctx:       &SimContext,
    scheduler: &mut CrossingScheduler,
    reporter:  &Reporter<'_, O>,
) -> SimResult<()>
where
    O: CrossingObserver + Send + ?Sized,
{
    thread::scope(|s| -> SimResult<()> {
        let crossing = thread::Builder::new()
            .name("crossing".into())
            .spawn_scoped(s, move || {
                let _cancel = CancelOnDrop(&ctx.shutdown);
                scheduler.run(ctx, reporter)
            })?;

        let mut producers = Vec::with_capacity(2);
        for side in Side::BOTH {
            let cfg = ctx.config.side(side);
            if !cfg.enabled {
                continue;
            }
            let mut process = ArrivalProcess::new(side, cfg.arrivals.clone(), ctx.config.seed);
            let spawned = thread::Builder::new()
                .name(format!("arrivals-{side}"))
                .spawn_scoped(s, move || {
                    let _cancel = CancelOnDrop(&ctx.shutdown);
                    process.run(ctx, reporter)
                });
            match spawned {
                Ok(handle) => producers.push((side, handle)),
                Err(e) => {
                    ctx.shutdown.cancel();
                    return Err(SimError::Spawn(e));
                }
            }
        }

        let mut outcome = crossing
            .join()
            .map_err(|_| SimError::ThreadPanicked("crossing".into()))
            .and_then(|r| r);
        for (side, handle) in producers {
            let result = handle
                .join()
                .map_err(|_| SimError::ThreadPanicked(format!("arrivals-{side}")))
                .and_then(|r| r);
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    })
}
