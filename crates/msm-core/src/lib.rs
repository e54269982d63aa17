//! `msm-core`: foundational types for the housing-market microsimulation.
//!
//! This crate is a dependency of every other `msm-*` crate.  It has no
//! `msm-*` dependencies and few external ones (`rand`, `rustc-hash`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `DwellingId`, `HouseholdId`, `PersonId`, `ZoneId`, `RegionId`, `JobId`, `IdCounter` |
//! | [`categories`]  | `DwellingType`, `IncomeCategory`, `HouseholdType`, person attributes |
//! | [`geo`]         | `Geography` (zone → region lookup)                         |
//! | [`time`]        | `Year`, `RunConfig`                                        |
//! | [`rng`]         | `SimRng` (one shared generator per run)                    |
//! | [`error`]       | `MsmError`, `MsmResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod categories;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use categories::{
    DwellingType, Gender, HouseholdSize, HouseholdType, IncomeCategory, Occupation, PersonRole,
    Race,
};
pub use error::{MsmError, MsmResult};
pub use geo::Geography;
pub use ids::{DwellingId, HouseholdId, IdCounter, JobId, PersonId, RegionId, ZoneId};
pub use rng::SimRng;
pub use time::{RunConfig, Year};
