//! The two approach sides of the crossing.
//!
//! A `Side` doubles as a direction: the active side is the one whose
//! occupants are moving across, so `Side::Left` means traffic flows
//! left → right.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left approach; crossing direction left → right.
    #[default]
    Left,
    /// Right approach; crossing direction right → left.
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// The opposing side.
    #[inline]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left  => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Position in two-element per-side arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left  => 0,
            Side::Right => 1,
        }
    }

    /// Inverse of [`Side::index`], used for atomic storage.
    #[inline]
    pub fn from_index(index: usize) -> Side {
        if index == 0 { Side::Left } else { Side::Right }
    }

    /// Human-readable label, used in CSV columns.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left  => "left",
            Side::Right => "right",
        }
    }

    /// Arrow describing the direction of travel when this side is active.
    pub fn arrow(self) -> &'static str {
        match self {
            Side::Left  => "L→R",
            Side::Right => "R→L",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
