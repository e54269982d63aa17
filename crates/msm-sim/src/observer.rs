//! Simulation observer trait for progress reporting and data collection.

use msm_core::Year;

use crate::{Event, World, YearSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// yearly loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_year_end(&mut self, summary: &YearSummary, _world: &World) {
///         println!("{}: {} persons in {} households",
///                  summary.year, summary.population, summary.households);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of each year, before any model prepares events.
    fn on_year_start(&mut self, _year: Year) {}

    /// Called after each event is handled.  `changed` is the handler's result.
    fn on_event(&mut self, _year: Year, _model: &str, _event: &Event, _changed: bool) {}

    /// Called after every model has finished the year.
    ///
    /// Provides read-only access to the world so that output writers can
    /// record market tables without the sim knowing about any format.
    fn on_year_end(&mut self, _summary: &YearSummary, _world: &World) {}

    /// Called once after the final year completes.
    fn on_sim_end(&mut self, _final_year: Year) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
