//! Simulation time model.
//!
//! Time is a monotonically increasing integer `Tick`.  Every deadline, edge
//! weight and agent clock is expressed in ticks, so all arithmetic is exact.
//!
//! `Tick::NEVER` stands in for an infinite deadline (a road nobody blocks).
//! Addition saturates so `Tick::NEVER + w` stays `NEVER` instead of wrapping.

use std::fmt;

/// An absolute simulation tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// No deadline.  Compares greater than every reachable tick.
    pub const NEVER: Tick = Tick(u64::MAX);

    /// Return the tick `n` steps after `self` (saturating at `NEVER`).
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn is_never(self) -> bool {
        self == Tick::NEVER
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl std::ops::AddAssign<u64> for Tick {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        *self = self.offset(rhs);
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_never() {
            f.write_str("T∞")
        } else {
            write!(f, "T{}", self.0)
        }
    }
}
