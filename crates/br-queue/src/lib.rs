//! `br-queue` — the bounded circular queue behind every approach queue and
//! the transit area.
//!
//! Slots are `Option<T>`: emptiness is an explicit state, never a reserved
//! token value.  Capacity is fixed at construction and enforced on every
//! enqueue.

pub mod bounded;
pub mod error;

#[cfg(test)]
mod tests;

pub use bounded::{BoundedQueue, Order};
pub use error::{QueueError, QueueResult};
