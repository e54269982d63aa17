//! `msm-sim`: yearly event loop of the housing-market microsimulation.
//!
//! # Yearly loop
//!
//! ```text
//! for year in start..=end:
//!   ① Begin   : reset tallies, refresh market aggregates.
//!   ② Prepare : every EventModel produces events from the start-of-year
//!                world (demolition: one per dwelling; migration: sampled
//!                households).
//!   ③ Apply   : events handled sequentially, model by model:
//!                  Demolition{d}      → maybe demolish, rehouse or evict
//!                  OutMigration{h}    → remove household and members
//!                  InMigration{h, ..} → add household, search, move in
//!   ④ Finish  : models report (InmigrantsPP, OutmigrantsPP,
//!                DemolishedDwellings); observer receives a YearSummary.
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`world`]      | `World`: registry, market, choice context, tallies        |
//! | [`model`]      | `EventModel` trait                                        |
//! | [`event`]      | `Event`, `PersonTemplate`                                 |
//! | [`migration`]  | `MigrationEngine`                                         |
//! | [`demolition`] | `DemolitionEngine`                                        |
//! | [`tables`]     | `MigrationTable`, `PopulationTargets`, CSV loaders        |
//! | [`config`]     | `ScenarioConfig`, `MigrationPolicy`, `EventRules`         |
//! | [`summary`]    | `YearSummary`, `Tally`, `IssueCounter`, `ReportLine`      |
//! | [`observer`]   | `SimObserver`, `NoopObserver`                             |
//! | [`sim`]        | `Sim`                                                     |
//! | [`builder`]    | `SimBuilder`                                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Scores relocation candidates on Rayon's thread pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use msm_sim::{NoopObserver, ScenarioConfig, SimBuilder};
//!
//! let scenario: ScenarioConfig = serde_json::from_str(&text)?;
//! let mut sim = SimBuilder::from_scenario(&scenario, registry, Path::new("."))?
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod config;
pub mod demolition;
pub mod error;
pub mod event;
pub mod migration;
pub mod model;
pub mod observer;
pub mod sim;
pub mod summary;
pub mod tables;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::{EventRules, MigrationConfig, MigrationPolicy, ScenarioConfig};
pub use demolition::DemolitionEngine;
pub use error::{SimError, SimResult};
pub use event::{Event, PersonTemplate};
pub use migration::MigrationEngine;
pub use model::EventModel;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use summary::{IssueCounter, ReportLine, Tally, YearSummary};
pub use tables::{
    MigrationTable, PopulationTargets, load_migration_table, load_migration_table_reader,
    load_population_targets, load_population_targets_reader,
};
pub use world::World;
