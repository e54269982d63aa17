//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use msm_core::{IncomeCategory, Year};
use msm_market::housing_cost::CLASSES;
use msm_market::{HousingCostTable, RentByIncome};
use msm_sim::{SimObserver, World, YearSummary};
use tracing::warn;

use crate::row::{HousingCostRow, MarketRow, ModelReportRow, RentShareRow, YearSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes yearly summaries, market cells, housing
/// costs and model reports to any [`OutputWriter`] backend.
///
/// The rent-by-income distribution is fixed for a run and is written once,
/// at the end of the first year.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    rents_written: bool,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rents_written: false, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }

    fn write_year(&mut self, summary: &YearSummary, world: &World) -> OutputResult<()> {
        let year = summary.year.0;
        self.writer.write_year_summary(&summary_row(summary))?;

        let market: Vec<MarketRow> = world
            .market
            .cells()
            .map(|cell| MarketRow {
                year,
                dwelling_type: cell.kind.to_string(),
                region:        cell.region.0,
                dwellings:     cell.dwellings as u64,
                vacant:        cell.vacant as u64,
                vacancy_rate:  cell.vacancy_rate,
                average_price: cell.average_price,
            })
            .collect();
        self.writer.write_market(&market)?;

        if !self.rents_written {
            self.writer.write_rent_shares(&rent_rows(&world.rents))?;
            self.rents_written = true;
        }

        let costs = housing_cost_rows(year, &HousingCostTable::from_registry(&world.registry));
        self.writer.write_housing_costs(&costs)?;

        let reports: Vec<ModelReportRow> = summary
            .reports
            .iter()
            .map(|r| ModelReportRow {
                year,
                model: r.model.to_string(),
                key:   r.key.clone(),
                value: r.value,
            })
            .collect();
        self.writer.write_reports(&reports)
    }
}

fn summary_row(summary: &YearSummary) -> YearSummaryRow {
    YearSummaryRow {
        year:                 summary.year.0,
        population:           summary.population as u64,
        households:           summary.households as u64,
        dwellings:            summary.dwellings as u64,
        vacant:               summary.vacant as u64,
        vacancy_rate:         summary.vacancy_rate(),
        inmigrant_persons:    summary.tally.inmigrant_persons as u64,
        outmigrant_persons:   summary.tally.outmigrant_persons as u64,
        demolished_dwellings: summary.tally.demolished_dwellings as u64,
        failed_inmigration:   summary.issues.lack_of_dwelling_failed_inmigration as u64,
        forced_outmigration:  summary.issues.lack_of_dwelling_forced_outmigration as u64,
        events:               summary.events as u64,
        events_changed:       summary.events_changed as u64,
    }
}

/// Every (income, bucket) pair with at least one observation.
fn rent_rows(rents: &RentByIncome) -> Vec<RentShareRow> {
    let mut rows = Vec::new();
    for income in IncomeCategory::ALL {
        for bucket in 0..RentByIncome::bucket_count() {
            let count = rents.count(income, bucket);
            if count == 0 {
                continue;
            }
            rows.push(RentShareRow {
                income: income.to_string(),
                bucket: bucket as u32,
                count:  count as u64,
                share:  rents.share(income, bucket),
            });
        }
    }
    rows
}

/// All `CLASSES × CLASSES` cells, empty ones included.
fn housing_cost_rows(year: i32, table: &HousingCostTable) -> Vec<HousingCostRow> {
    let mut rows = Vec::with_capacity(CLASSES * CLASSES);
    for (income_class, counts) in table.counts.iter().enumerate() {
        let label = HousingCostTable::income_label(income_class);
        for (rent_class, &households) in counts.iter().enumerate() {
            rows.push(HousingCostRow {
                year,
                income_class: label.clone(),
                rent_class:   rent_class as u32,
                households:   households as u64,
            });
        }
    }
    rows
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_year_end(&mut self, summary: &YearSummary, world: &World) {
        let result = self.write_year(summary, world);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_year: Year) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
