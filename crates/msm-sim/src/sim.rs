//! The `Sim` struct and its yearly loop.

use msm_core::{RunConfig, SimRng, Year};
use tracing::{info, warn};

use crate::{Event, EventModel, SimObserver, SimResult, World, YearSummary};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each year runs in three phases:
///
/// 1. **Prepare**: every model produces its events from the start-of-year
///    world, in registration order.
/// 2. **Apply** (sequential): each model's events are handled in the order
///    produced, model by model.
/// 3. **Finish**: every model reports on the year.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub run:               RunConfig,

    /// Entities, market figures and choice context.
    pub world:             World,

    /// Event models in execution order.
    pub models:            Vec<Box<dyn EventModel>>,

    /// The single run-wide RNG, lent to every model in turn.
    pub rng:               SimRng,

    /// Next year to simulate.
    pub current:           Year,

    /// Run [`EntityRegistry::check_consistency`](msm_registry::EntityRegistry::check_consistency)
    /// after every year.
    pub check_consistency: bool,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current year through `run.end_year`.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let mut last = self.current;
        while self.current <= self.run.end_year {
            last = self.current;
            self.step_year(observer)?;
        }
        observer.on_sim_end(last);
        Ok(())
    }

    /// Run exactly `n` years from the current position (ignores `end_year`).
    pub fn run_years<O: SimObserver>(&mut self, n: u32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_year(observer)?;
        }
        Ok(())
    }

    /// Simulate the current year and advance to the next.
    pub fn step_year<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<YearSummary> {
        let year = self.current;
        observer.on_year_start(year);
        self.world.begin_year(year);

        // ── Phase 1: prepare ──────────────────────────────────────────────
        //
        // Every model sees the same start-of-year world.
        let mut scheduled: Vec<Vec<Event>> = Vec::with_capacity(self.models.len());
        for model in &mut self.models {
            scheduled.push(model.prepare_year(year, &self.world, &mut self.rng)?);
        }

        // ── Phase 2: apply ────────────────────────────────────────────────
        let mut events = 0;
        let mut events_changed = 0;
        for (model, model_events) in self.models.iter_mut().zip(scheduled) {
            for event in &model_events {
                let changed = model.handle_event(event, &mut self.world, &mut self.rng)?;
                events += 1;
                events_changed += usize::from(changed);
                observer.on_event(year, model.name(), event, changed);
            }
        }

        // ── Phase 3: finish ───────────────────────────────────────────────
        let mut reports = Vec::new();
        for model in &mut self.models {
            reports.extend(model.finish_year(year, &mut self.world));
        }

        let registry = &self.world.registry;
        let summary = YearSummary {
            year,
            population:     registry.person_count(),
            households:     registry.household_count(),
            dwellings:      registry.dwelling_count(),
            vacant:         registry.vacancy().total(),
            events,
            events_changed,
            tally:          self.world.tally,
            issues:         self.world.issues,
            reports,
        };
        info!(
            %year,
            population = summary.population,
            households = summary.households,
            dwellings = summary.dwellings,
            vacant = summary.vacant,
            events,
            "year complete"
        );
        if !summary.issues.is_empty() {
            info!(
                %year,
                failed_inmigration = summary.issues.lack_of_dwelling_failed_inmigration,
                forced_outmigration = summary.issues.lack_of_dwelling_forced_outmigration,
                "households that could not be housed"
            );
        }

        if self.check_consistency {
            for problem in self.world.registry.check_consistency() {
                warn!(%year, "Consistency error: {problem}");
            }
        }

        observer.on_year_end(&summary, &self.world);
        self.current = year.next();
        Ok(summary)
    }
}
