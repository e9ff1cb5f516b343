//! `br-sim` — the crossing simulation: two arrival producers, one crossing
//! scheduler, one shared single-lane transit area.
//!
//! # Epoch loop
//!
//! ```text
//! Idle ──► Admitting ──► Transiting ──► Switching ──┐
//!              ▲                                     │
//!              └──────────── target not reached ◄────┘
//!                                    │
//!                                    ▼ target reached
//!                                   Done
//!
//!   Admitting   — move up to `window` occupants from the active side's
//!                 queue into the transit area; stop early if it runs dry.
//!   Transiting  — drain the transit area, one crossing per occupant.
//!   Switching   — flip direction, recompute the window from both queue
//!                 lengths, release the crossing permit.
//! ```
//!
//! Direction flips every epoch whatever the queue contents, so neither side
//! waits longer than one opposing epoch.
//!
//! # Threads
//!
//! [`Simulation::run`] spawns one scheduler thread and one arrival thread per
//! enabled side inside a `std::thread::scope`.  All shared state lives in a
//! single [`SimContext`]; cancellation is cooperative via
//! [`ShutdownSignal`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use br_core::CrossingConfig;
//! use br_sim::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(CrossingConfig::default()).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! println!("{} crossings in {} epochs", report.completed, report.epochs.len());
//! ```

pub mod arrival;
pub mod builder;
pub mod context;
pub mod counter;
pub mod error;
pub mod gate;
pub mod observer;
pub mod scheduler;
pub mod signal;
pub mod sim;
pub mod window;


pub use arrival::ArrivalProcess;
pub use builder::SimBuilder;
pub use context::SimContext;
pub use counter::CompletionCounter;
pub use error::{SimError, SimResult};
pub use gate::SideGate;
pub use observer::{
    CrossingEvent, CrossingObserver, EpochSummary, NoopObserver, QueueView, RunReport, Snapshot,
};
pub use scheduler::{CrossingScheduler, SchedulerState};
pub use signal::{CrossingPermit, ShutdownSignal};
pub use sim::Simulation;
pub use window::WindowController;
