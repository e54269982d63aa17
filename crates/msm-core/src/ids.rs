//! Strongly typed, zero-cost identifier wrappers and the monotonic counter
//! that hands them out.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Unlike array indices, entity IDs
//! are sparse: dwellings and households come and go every simulated year, so
//! they live in ordered maps rather than dense `Vec`s.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> $name {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identifier of a dwelling.  Allocated monotonically; never reused.
    pub struct DwellingId(u32);
}

typed_id! {
    /// Identifier of a household.  Allocated monotonically; never reused.
    pub struct HouseholdId(u32);
}

typed_id! {
    /// Identifier of a person.
    pub struct PersonId(u32);
}

typed_id! {
    /// Identifier of a traffic-analysis zone.
    pub struct ZoneId(u32);
}

typed_id! {
    /// Identifier of a region (aggregation of zones).
    pub struct RegionId(u32);
}

typed_id! {
    /// Identifier of a job (workplace reference held by persons).
    pub struct JobId(u32);
}

// ── IdCounter ─────────────────────────────────────────────────────────────────

/// Monotonic id allocator.
///
/// Allocation goes through `&self` so ids can be handed out while the owning
/// registry is only borrowed shared (e.g. while in-migrants are sampled from
/// a start-of-year snapshot).  The counter only ever moves forward, which is
/// what guarantees ids are never reused within a run.
#[derive(Debug, Default)]
pub struct IdCounter(AtomicU32);

impl IdCounter {
    /// A counter whose first allocation returns `first`.
    pub fn starting_at(first: u32) -> Self {
        IdCounter(AtomicU32::new(first))
    }

    /// Allocate the next id.
    #[inline]
    pub fn next(&self) -> u32 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Record that `id` is in use, so later allocations return something
    /// strictly greater.
    #[inline]
    pub fn observe(&self, id: u32) {
        self.0.fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }

    /// The value the next call to [`next`](Self::next) will return.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }
}
