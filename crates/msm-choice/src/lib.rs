//! `msm-choice`: where households move.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                      |
//! |-------------------|---------------------------------------------------------------|
//! | [`strategy`]      | `ScoringStrategy` trait, `UtilityInputs`                      |
//! | [`accessibility`] | `Accessibility` trait, `ZoneAccessibility`, `UniformAccessibility` |
//! | [`linear`]        | `LinearScoring`: the configurable default strategy            |
//! | [`search`]        | `RelocationSearch`, `ChoiceContext`, `move_household`         |
//! | [`error`]         | `ChoiceError`, `ChoiceResult<T>`                              |
//!
//! # Design notes
//!
//! A search is split the same way as every other step of the yearly loop:
//!
//! 1. **Score** (read-only, optionally parallel): sample candidate dwellings
//!    per region and turn each into a selection weight.  Everything is read
//!    through `&ChoiceContext`; no mutation, no random draws.
//! 2. **Draw** (sequential): one weighted draw on the shared `SimRng`.
//!
//! The numeric behaviour lives entirely behind [`ScoringStrategy`], so a
//! deployment swaps utility functions without touching the search.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `parallel` | Scores candidates on Rayon's thread pool.             |

pub mod accessibility;
pub mod error;
pub mod linear;
pub mod search;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use accessibility::{Accessibility, UniformAccessibility, ZoneAccessibility};
pub use error::{ChoiceError, ChoiceResult};
pub use linear::{ComponentWeights, DemolitionRates, LinearScoring, LinearScoringConfig, SegmentWeights};
pub use search::{ChoiceContext, RelocationSearch, SearchConfig, move_household};
pub use strategy::{ScoringStrategy, UtilityInputs};
