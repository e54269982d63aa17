//! Simulation time model.
//!
//! Time advances in whole calendar years.  `Year` wraps the calendar year
//! (not an offset) because tables, demolition probabilities and building
//! ages are all keyed by calendar year.

use std::fmt;

// ── Year ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Year(pub i32);

impl Year {
    /// The year `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: i32) -> Year {
        Year(self.0 + n)
    }

    /// Years elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Year) -> i32 {
        self.0 - earlier.0
    }

    #[inline]
    pub fn next(self) -> Year {
        Year(self.0 + 1)
    }
}

impl std::ops::Add<i32> for Year {
    type Output = Year;
    #[inline]
    fn add(self, rhs: i32) -> Year {
        Year(self.0 + rhs)
    }
}

impl std::ops::Sub for Year {
    type Output = i32;
    #[inline]
    fn sub(self, rhs: Year) -> i32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Run horizon and master seed.
///
/// Typically embedded in the scenario file loaded by the application crate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// First simulated year (the base year of the input population).
    pub start_year: Year,

    /// Last simulated year, inclusive.
    pub end_year: Year,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl RunConfig {
    /// Number of simulated years (`start..=end`); zero if the range is empty.
    pub fn year_count(&self) -> usize {
        (self.end_year.since(self.start_year) + 1).max(0) as usize
    }

    /// Every simulated year in order.
    pub fn years(&self) -> impl Iterator<Item = Year> {
        (self.start_year.0..=self.end_year.0).map(Year)
    }
}
