//! The `OutputWriter` trait implemented by all backend writers.

use crate::{HousingCostRow, MarketRow, ModelReportRow, OutputResult, RentShareRow, YearSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write one year summary row.
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()>;

    /// Write the market cells of one year.
    fn write_market(&mut self, rows: &[MarketRow]) -> OutputResult<()>;

    /// Write the rent-by-income distribution.  Called once per run.
    fn write_rent_shares(&mut self, rows: &[RentShareRow]) -> OutputResult<()>;

    /// Write the housing-cost table of one year.
    fn write_housing_costs(&mut self, rows: &[HousingCostRow]) -> OutputResult<()>;

    /// Write the model report lines of one year.
    fn write_reports(&mut self, rows: &[ModelReportRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
