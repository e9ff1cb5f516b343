//! `br-core` — foundational types for the `rust_bridge` crossing simulator.
//!
//! This crate is a dependency of every other `br-*` crate.  It has no `br-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `OccupantId`, `EpochId`, `OccupantIssuer`                  |
//! | [`side`]   | `Side` — the two approach directions                       |
//! | [`time`]   | `SimClock` (elapsed simulated time), `Pacer` (delays)      |
//! | [`rng`]    | `ArrivalRng` (per side), `SimRng` (global)                 |
//! | [`config`] | `CrossingConfig`, `ArrivalProfile`, `SideConfig`           |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod side;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalProfile, CrossingConfig, SideConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{EpochId, OccupantId, OccupantIssuer};
pub use rng::{ArrivalRng, SimRng};
pub use side::Side;
pub use time::{Pacer, SimClock};
