//! CSV output backend.
//!
//! Creates five files in the configured output directory:
//! - `year_summaries.csv`
//! - `market_by_type_region.csv`
//! - `rent_by_income.csv`
//! - `housing_costs.csv`
//! - `model_reports.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{HousingCostRow, MarketRow, ModelReportRow, OutputResult, RentShareRow, YearSummaryRow};

/// Writes simulation output to five CSV files.
pub struct CsvWriter {
    summaries:     Writer<File>,
    market:        Writer<File>,
    rents:         Writer<File>,
    housing_costs: Writer<File>,
    reports:       Writer<File>,
    finished:      bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("year_summaries.csv"))?;
        summaries.write_record([
            "year",
            "population",
            "households",
            "dwellings",
            "vacant",
            "vacancy_rate",
            "inmigrant_persons",
            "outmigrant_persons",
            "demolished_dwellings",
            "failed_inmigration",
            "forced_outmigration",
            "events",
            "events_changed",
        ])?;

        let mut market = Writer::from_path(dir.join("market_by_type_region.csv"))?;
        market.write_record([
            "year", "dwelling_type", "region", "dwellings", "vacant", "vacancy_rate", "average_price",
        ])?;

        let mut rents = Writer::from_path(dir.join("rent_by_income.csv"))?;
        rents.write_record(["income", "bucket", "count", "share"])?;

        let mut housing_costs = Writer::from_path(dir.join("housing_costs.csv"))?;
        housing_costs.write_record(["year", "income_class", "rent_class", "households"])?;

        let mut reports = Writer::from_path(dir.join("model_reports.csv"))?;
        reports.write_record(["year", "model", "key", "value"])?;

        Ok(Self {
            summaries,
            market,
            rents,
            housing_costs,
            reports,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.year.to_string(),
            row.population.to_string(),
            row.households.to_string(),
            row.dwellings.to_string(),
            row.vacant.to_string(),
            format!("{:.6}", row.vacancy_rate),
            row.inmigrant_persons.to_string(),
            row.outmigrant_persons.to_string(),
            row.demolished_dwellings.to_string(),
            row.failed_inmigration.to_string(),
            row.forced_outmigration.to_string(),
            row.events.to_string(),
            row.events_changed.to_string(),
        ])?;
        Ok(())
    }

    fn write_market(&mut self, rows: &[MarketRow]) -> OutputResult<()> {
        for row in rows {
            self.market.write_record(&[
                row.year.to_string(),
                row.dwelling_type.clone(),
                row.region.to_string(),
                row.dwellings.to_string(),
                row.vacant.to_string(),
                format!("{:.6}", row.vacancy_rate),
                format!("{:.2}", row.average_price),
            ])?;
        }
        Ok(())
    }

    fn write_rent_shares(&mut self, rows: &[RentShareRow]) -> OutputResult<()> {
        for row in rows {
            self.rents.write_record(&[
                row.income.clone(),
                row.bucket.to_string(),
                row.count.to_string(),
                format!("{:.6}", row.share),
            ])?;
        }
        Ok(())
    }

    fn write_housing_costs(&mut self, rows: &[HousingCostRow]) -> OutputResult<()> {
        for row in rows {
            self.housing_costs.write_record(&[
                row.year.to_string(),
                row.income_class.clone(),
                row.rent_class.to_string(),
                row.households.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_reports(&mut self, rows: &[ModelReportRow]) -> OutputResult<()> {
        for row in rows {
            self.reports.write_record(&[
                row.year.to_string(),
                row.model.clone(),
                row.key.clone(),
                row.value.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.market.flush()?;
        self.rents.flush()?;
        self.housing_costs.flush()?;
        self.reports.flush()?;
        Ok(())
    }
}
