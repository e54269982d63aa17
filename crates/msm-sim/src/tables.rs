//! Year-indexed control tables for the migration model.
//!
//! # CSV formats
//!
//! Migration counts (persons per year):
//!
//! ```csv
//! Year,Inmigration,Outmigration
//! 2011,1200,950
//! 2012,1250,980
//! ```
//!
//! Population targets (total persons per year):
//!
//! ```csv
//! Year,Population
//! 2011,105000
//! 2012,106300
//! ```
//!
//! Extra columns are ignored.  A year listed twice keeps its last row.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use msm_core::{RunConfig, Year};
use serde::Deserialize;

use crate::{SimError, SimResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MigrationRecord {
    #[serde(rename = "Year")]
    year:         i32,
    #[serde(rename = "Inmigration")]
    inmigration:  u64,
    #[serde(rename = "Outmigration")]
    outmigration: u64,
}

#[derive(Deserialize)]
struct PopulationRecord {
    #[serde(rename = "Year")]
    year:       i32,
    #[serde(rename = "Population")]
    population: u64,
}

// ── MigrationTable ────────────────────────────────────────────────────────────

/// Yearly in- and out-migrant person counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationTable {
    rows: BTreeMap<Year, (u64, u64)>,
}

impl MigrationTable {
    pub fn insert(&mut self, year: Year, inmigration: u64, outmigration: u64) {
        self.rows.insert(year, (inmigration, outmigration));
    }

    /// `(inmigration, outmigration)` for `year`.
    ///
    /// # Errors
    /// [`SimError::MissingYear`] if the table has no row for `year`.
    pub fn get(&self, year: Year) -> SimResult<(u64, u64)> {
        self.rows
            .get(&year)
            .copied()
            .ok_or(SimError::MissingYear { table: "migration table", year })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── PopulationTargets ─────────────────────────────────────────────────────────

/// Target total population per year.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopulationTargets {
    rows: BTreeMap<Year, u64>,
}

impl PopulationTargets {
    pub fn insert(&mut self, year: Year, population: u64) {
        self.rows.insert(year, population);
    }

    /// Targets `round(base · (1 + rate/100)^i)` for year `start + i`, for
    /// every year of the run.
    pub fn from_growth_rate(base: u64, rate_percent: f64, run: &RunConfig) -> Self {
        let factor = 1.0 + rate_percent / 100.0;
        let rows = run
            .years()
            .map(|year| {
                let i = year.since(run.start_year);
                let target = (base as f64 * factor.powi(i)).round();
                (year, target.max(0.0) as u64)
            })
            .collect();
        Self { rows }
    }

    /// Target population for `year`.
    ///
    /// # Errors
    /// [`SimError::MissingYear`] if the table has no row for `year`.
    pub fn get(&self, year: Year) -> SimResult<u64> {
        self.rows
            .get(&year)
            .copied()
            .ok_or(SimError::MissingYear { table: "population targets", year })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

/// Load a migration table from a CSV file.
pub fn load_migration_table(path: &Path) -> SimResult<MigrationTable> {
    let file = std::fs::File::open(path).map_err(SimError::Io)?;
    load_migration_table_reader(file)
}

/// Like [`load_migration_table`] but accepts any `Read` source.
pub fn load_migration_table_reader<R: Read>(reader: R) -> SimResult<MigrationTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut table = MigrationTable::default();
    for result in csv_reader.deserialize::<MigrationRecord>() {
        let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
        table.insert(Year(row.year), row.inmigration, row.outmigration);
    }
    Ok(table)
}

/// Load population targets from a CSV file.
pub fn load_population_targets(path: &Path) -> SimResult<PopulationTargets> {
    let file = std::fs::File::open(path).map_err(SimError::Io)?;
    load_population_targets_reader(file)
}

/// Like [`load_population_targets`] but accepts any `Read` source.
pub fn load_population_targets_reader<R: Read>(reader: R) -> SimResult<PopulationTargets> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut targets = PopulationTargets::default();
    for result in csv_reader.deserialize::<PopulationRecord>() {
        let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
        targets.insert(Year(row.year), row.population);
    }
    Ok(targets)
}
