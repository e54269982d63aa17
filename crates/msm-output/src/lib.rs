//! `msm-output`: simulation output writers for the housing-market microsimulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                |
//! |-----------|---------|--------------------------------------------------------------|
//! | *(none)*  | CSV     | `year_summaries.csv`, `market_by_type_region.csv`,           |
//! |           |         | `rent_by_income.csv`, `housing_costs.csv`, `model_reports.csv` |
//! | `sqlite`  | SQLite  | `output.db` (one table per CSV file)                         |
//!
//! Both backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `msm_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use msm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{HousingCostRow, MarketRow, ModelReportRow, RentShareRow, YearSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
