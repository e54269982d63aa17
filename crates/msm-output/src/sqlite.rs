//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! one table per CSV file of the CSV backend: `year_summaries`,
//! `market_by_type_region`, `rent_by_income`, `housing_costs` and
//! `model_reports`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{HousingCostRow, MarketRow, ModelReportRow, OutputResult, RentShareRow, YearSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS year_summaries (
                 year                 INTEGER PRIMARY KEY,
                 population           INTEGER NOT NULL,
                 households           INTEGER NOT NULL,
                 dwellings            INTEGER NOT NULL,
                 vacant               INTEGER NOT NULL,
                 vacancy_rate         REAL    NOT NULL,
                 inmigrant_persons    INTEGER NOT NULL,
                 outmigrant_persons   INTEGER NOT NULL,
                 demolished_dwellings INTEGER NOT NULL,
                 failed_inmigration   INTEGER NOT NULL,
                 forced_outmigration  INTEGER NOT NULL,
                 events               INTEGER NOT NULL,
                 events_changed       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS market_by_type_region (
                 year          INTEGER NOT NULL,
                 dwelling_type TEXT    NOT NULL,
                 region        INTEGER NOT NULL,
                 dwellings     INTEGER NOT NULL,
                 vacant        INTEGER NOT NULL,
                 vacancy_rate  REAL    NOT NULL,
                 average_price REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS rent_by_income (
                 income TEXT    NOT NULL,
                 bucket INTEGER NOT NULL,
                 count  INTEGER NOT NULL,
                 share  REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS housing_costs (
                 year         INTEGER NOT NULL,
                 income_class TEXT    NOT NULL,
                 rent_class   INTEGER NOT NULL,
                 households   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS model_reports (
                 year  INTEGER NOT NULL,
                 model TEXT    NOT NULL,
                 key   TEXT    NOT NULL,
                 value REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO year_summaries \
             (year, population, households, dwellings, vacant, vacancy_rate, \
              inmigrant_persons, outmigrant_persons, demolished_dwellings, \
              failed_inmigration, forced_outmigration, events, events_changed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            rusqlite::params![
                row.year,
                row.population as i64,
                row.households as i64,
                row.dwellings as i64,
                row.vacant as i64,
                row.vacancy_rate,
                row.inmigrant_persons as i64,
                row.outmigrant_persons as i64,
                row.demolished_dwellings as i64,
                row.failed_inmigration as i64,
                row.forced_outmigration as i64,
                row.events as i64,
                row.events_changed as i64,
            ],
        )?;
        Ok(())
    }

    fn write_market(&mut self, rows: &[MarketRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO market_by_type_region \
                 (year, dwelling_type, region, dwellings, vacant, vacancy_rate, average_price) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.year,
                    row.dwelling_type,
                    row.region,
                    row.dwellings as i64,
                    row.vacant as i64,
                    row.vacancy_rate,
                    row.average_price,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_rent_shares(&mut self, rows: &[RentShareRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO rent_by_income (income, bucket, count, share) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.income, row.bucket, row.count as i64, row.share])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_housing_costs(&mut self, rows: &[HousingCostRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO housing_costs (year, income_class, rent_class, households) \
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.year,
                    row.income_class,
                    row.rent_class,
                    row.households as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_reports(&mut self, rows: &[ModelReportRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO model_reports (year, model, key, value) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.year, row.model, row.key, row.value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
