//! Strongly typed identifier wrappers.
//!
//! Occupant tokens are never zero: the issuer starts at 1 and the queue slots
//! track emptiness with `Option`, so an id value carries no "empty" meaning.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[derive(serde::Serialize, serde::Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// The first id handed out in a run.
            pub const FIRST: $name = $name(1);

            /// The id immediately after `self`.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Token of one occupant (pedestrian or vehicle) waiting or crossing.
    pub struct OccupantId(u64);
}

typed_id! {
    /// Sequence number of one admit → transit → switch cycle.
    pub struct EpochId(u32);
}

/// Thread-safe source of fresh `OccupantId`s, shared by both arrival sides
/// and the preload step.
#[derive(Debug)]
pub struct OccupantIssuer {
    next: AtomicU64,
}

impl OccupantIssuer {
    pub fn new() -> Self {
        Self { next: AtomicU64::new(OccupantId::FIRST.0) }
    }

    /// Hand out the next id.  Ids are unique and strictly increasing in the
    /// order `issue` calls linearize.
    pub fn issue(&self) -> OccupantId {
        OccupantId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed).saturating_sub(OccupantId::FIRST.0)
    }
}

impl Default for OccupantIssuer {
    fn default() -> Self {
        Self::new()
    }
}
