//! Scenario configuration.
//!
//! A scenario is one JSON (or any serde format) document:
//!
//! ```json
//! {
//!   "run":            { "start_year": 2011, "end_year": 2040, "seed": 42 },
//!   "quality_levels": 4,
//!   "search":         { "samples_per_region": 20, "accessibility_scale": 100.0 },
//!   "migration":      { "policy": "populationGrowthRate", "growth_rate_percent": 0.8 },
//!   "event_rules":    { "out_migration": true, "demolition": true, "migration": true },
//!   "scoring":        { "selection_sensitivity": 3.0 }
//! }
//! ```
//!
//! Everything except `run` has a default.  Table paths are resolved against
//! the directory passed to [`SimBuilder::from_scenario`](crate::SimBuilder::from_scenario).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use msm_choice::{LinearScoringConfig, SearchConfig};
use msm_core::RunConfig;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::SimError;

// ── MigrationPolicy ───────────────────────────────────────────────────────────

/// How yearly migration volumes are determined.  Fixed for a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MigrationPolicy {
    /// In/out person counts read from a table.
    Migration,
    /// Counts derived from a target population table.
    Population,
    /// Targets generated from the base-year population and a growth rate.
    PopulationGrowthRate,
}

impl FromStr for MigrationPolicy {
    type Err = SimError;

    /// Case-insensitive.  Unknown names are logged and rejected.
    fn from_str(s: &str) -> Result<Self, SimError> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("migration") {
            Ok(MigrationPolicy::Migration)
        } else if name.eq_ignore_ascii_case("population") {
            Ok(MigrationPolicy::Population)
        } else if name.eq_ignore_ascii_case("populationGrowthRate") {
            Ok(MigrationPolicy::PopulationGrowthRate)
        } else {
            error!(policy = name, "unknown migration policy; expected migration, population or populationGrowthRate");
            Err(SimError::UnknownMigrationPolicy(name.to_string()))
        }
    }
}

impl fmt::Display for MigrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MigrationPolicy::Migration            => "migration",
            MigrationPolicy::Population           => "population",
            MigrationPolicy::PopulationGrowthRate => "populationGrowthRate",
        };
        f.write_str(s)
    }
}

// ── Config sections ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// `"migration"`, `"population"` or `"populationGrowthRate"`.
    pub policy:              String,
    /// CSV `Year,Inmigration,Outmigration`; required by `migration`.
    pub migration_table:     Option<PathBuf>,
    /// CSV `Year,Population`; required by `population`.
    pub population_table:    Option<PathBuf>,
    /// Annual growth in percent; used by `populationGrowthRate`.
    pub growth_rate_percent: f64,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            policy:              "populationGrowthRate".to_string(),
            migration_table:     None,
            population_table:    None,
            growth_rate_percent: 0.0,
        }
    }
}

impl MigrationConfig {
    pub fn policy(&self) -> Result<MigrationPolicy, SimError> {
        self.policy.parse()
    }
}

/// Switches for the event models and discretionary actions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRules {
    /// Allow out-migration that is not forced by another model.
    ///
    /// Only discretionary calls (`World::out_migrate(.., false)`) read this
    /// flag.  The shipped models never make one: migration-table
    /// out-migrants, failed in-migrants and households displaced by
    /// demolition always leave.  It exists for custom `EventModel`s that
    /// remove households on their own initiative.
    pub out_migration: bool,
    /// Register the demolition model.
    pub demolition:    bool,
    /// Register the migration model.
    pub migration:     bool,
}

impl Default for EventRules {
    fn default() -> Self {
        Self { out_migration: true, demolition: true, migration: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub run:               RunConfig,
    #[serde(default = "default_quality_levels")]
    pub quality_levels:    u8,
    #[serde(default)]
    pub search:            SearchConfig,
    #[serde(default)]
    pub migration:         MigrationConfig,
    #[serde(default)]
    pub event_rules:       EventRules,
    #[serde(default)]
    pub scoring:           LinearScoringConfig,
    /// Run the registry consistency check after every year.
    #[serde(default)]
    pub check_consistency: bool,
}

fn default_quality_levels() -> u8 {
    4
}

impl ScenarioConfig {
    /// A scenario with every optional section at its default.
    pub fn new(run: RunConfig) -> Self {
        Self {
            run,
            quality_levels:    default_quality_levels(),
            search:            SearchConfig::default(),
            migration:         MigrationConfig::default(),
            event_rules:       EventRules::default(),
            scoring:           LinearScoringConfig::default(),
            check_consistency: false,
        }
    }
}
