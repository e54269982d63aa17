//! Per-year counters, model reports and the summary handed to observers.

use msm_core::Year;

/// One `key = value` line reported by a model in `finish_year`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub model: &'static str,
    pub key:   String,
    pub value: f64,
}

impl ReportLine {
    pub fn new(model: &'static str, key: impl Into<String>, value: f64) -> Self {
        Self { model, key: key.into(), value }
    }
}

/// Person and dwelling flows of the current year.
///
/// Reset by the simulation at the start of every year; incremented by
/// whichever handler causes the flow.  Forced out-migration of a demolished
/// dwelling's resident counts as out-migration, as does the removal of an
/// in-migrant that found nowhere to live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub inmigrant_persons:    usize,
    pub outmigrant_persons:   usize,
    pub demolished_dwellings: usize,
}

/// Diagnostics for situations the models resolve by falling back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssueCounter {
    /// In-migrants removed again because no dwelling was found.
    pub lack_of_dwelling_failed_inmigration:  usize,
    /// Residents of a demolished dwelling who had to leave the area.
    pub lack_of_dwelling_forced_outmigration: usize,
}

impl IssueCounter {
    pub fn is_empty(&self) -> bool {
        *self == IssueCounter::default()
    }
}

/// State of the world at the end of a simulated year.
#[derive(Clone, Debug, PartialEq)]
pub struct YearSummary {
    pub year:           Year,
    pub population:     usize,
    pub households:     usize,
    pub dwellings:      usize,
    pub vacant:         usize,
    /// Events handled this year.
    pub events:         usize,
    /// Events whose handler reported a change.
    pub events_changed: usize,
    pub tally:          Tally,
    pub issues:         IssueCounter,
    pub reports:        Vec<ReportLine>,
}

impl YearSummary {
    /// Share of dwellings without a resident; 0 when there are none.
    pub fn vacancy_rate(&self) -> f64 {
        if self.dwellings == 0 { 0.0 } else { self.vacant as f64 / self.dwellings as f64 }
    }

    /// Value of the first report line with `key`.
    pub fn report(&self, key: &str) -> Option<f64> {
        self.reports.iter().find(|r| r.key == key).map(|r| r.value)
    }
}
