//! `msm-registry`: entity storage for the housing-market microsimulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`dwelling`]    | `Dwelling` record                                          |
//! | [`household`]   | `Household` and `Person` records                           |
//! | [`vacancy`]     | `VacancyIndex` (region → vacant dwellings)                 |
//! | [`registry`]    | `EntityRegistry`, `Inconsistency`                          |
//! | [`builder`]     | `RegistryBuilder` (fluent construction from a population)  |
//!
//! # Ownership
//!
//! The registry owns every entity plus the `Geography` and the
//! `VacancyIndex`.  Occupancy (`Dwelling::resident`, `Household::dwelling`)
//! and vacancy membership are only changed by registry methods, which keep
//! the two sides of the link and the index in step.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on the entity records.   |

pub mod builder;
pub mod dwelling;
pub mod household;
pub mod registry;
pub mod vacancy;


pub use builder::RegistryBuilder;
pub use dwelling::Dwelling;
pub use household::{Household, Person};
pub use registry::{EntityRegistry, Inconsistency};
pub use vacancy::VacancyIndex;
