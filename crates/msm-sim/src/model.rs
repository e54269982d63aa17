//! The `EventModel` trait, implemented once per yearly sub-model.

use msm_core::{SimRng, Year};

use crate::{Event, ReportLine, SimResult, World};

/// A sub-model of the yearly loop.
///
/// Each year [`Sim`](crate::Sim) calls, in order:
///
/// 1. `prepare_year` on every model, all against the same start-of-year
///    `World`.  No event is applied until every model has produced its list.
/// 2. `handle_event` for every event, model by model in registration order,
///    events in the order produced.
/// 3. `finish_year` on every model.
///
/// Models share one `SimRng`, so the registration order is part of the
/// model definition: changing it changes results.
///
/// # Example
///
/// ```rust,ignore
/// /// Reports the number of vacant dwellings; never changes anything.
/// struct VacancyReport;
///
/// impl EventModel for VacancyReport {
///     fn name(&self) -> &'static str { "vacancy_report" }
///     fn prepare_year(&mut self, _y: Year, _w: &World, _rng: &mut SimRng) -> SimResult<Vec<Event>> {
///         Ok(Vec::new())
///     }
///     fn handle_event(&mut self, _e: &Event, _w: &mut World, _rng: &mut SimRng) -> SimResult<bool> {
///         Ok(false)
///     }
///     fn finish_year(&mut self, _y: Year, world: &mut World) -> Vec<ReportLine> {
///         vec![ReportLine::new(self.name(), "VacantDwellings", world.registry.vacancy().total() as f64)]
///     }
/// }
/// ```
pub trait EventModel {
    /// Stable identifier used in logs, reports and observer callbacks.
    fn name(&self) -> &'static str;

    /// Produce this year's events from the start-of-year state.
    fn prepare_year(&mut self, year: Year, world: &World, rng: &mut SimRng) -> SimResult<Vec<Event>>;

    /// Apply one event.  Returns whether the world changed.
    ///
    /// Events may be stale by the time they are applied (an earlier event
    /// removed the household or dwelling); that is not an error and returns
    /// `Ok(false)`.
    fn handle_event(&mut self, event: &Event, world: &mut World, rng: &mut SimRng) -> SimResult<bool>;

    /// Report on the year.  Default: nothing to report.
    fn finish_year(&mut self, _year: Year, _world: &mut World) -> Vec<ReportLine> {
        Vec::new()
    }
}
