//! `World`: the simulation state shared by every event model.

use msm_choice::{Accessibility, ChoiceContext, RelocationSearch, ScoringStrategy, move_household};
use msm_core::{DwellingId, HouseholdId, SimRng, Year};
use msm_market::{MarketAggregator, RentByIncome};
use msm_registry::EntityRegistry;
use tracing::debug;

use crate::{EventRules, IssueCounter, SimResult, Tally};

/// Entities plus the market and choice context derived from them.
///
/// Market aggregates are refreshed once at the start of each year; models
/// consult them as start-of-year figures while events change the registry.
pub struct World {
    pub year:          Year,
    pub registry:      EntityRegistry,
    pub market:        MarketAggregator,
    /// Rent distribution by income of the base-year population.
    pub rents:         RentByIncome,
    pub accessibility: Box<dyn Accessibility>,
    pub strategy:      Box<dyn ScoringStrategy>,
    pub search:        RelocationSearch,
    pub rules:         EventRules,
    pub tally:         Tally,
    pub issues:        IssueCounter,
}

impl World {
    pub fn new(
        year:           Year,
        registry:       EntityRegistry,
        quality_levels: u8,
        accessibility:  Box<dyn Accessibility>,
        strategy:       Box<dyn ScoringStrategy>,
        search:         RelocationSearch,
        rules:          EventRules,
    ) -> Self {
        let rents = RentByIncome::from_registry(&registry);
        let mut market = MarketAggregator::new(quality_levels);
        market.update(&registry);
        Self {
            year,
            registry,
            market,
            rents,
            accessibility,
            strategy,
            search,
            rules,
            tally: Tally::default(),
            issues: IssueCounter::default(),
        }
    }

    /// Enter `year`: reset the yearly counters and refresh market figures.
    pub fn begin_year(&mut self, year: Year) {
        self.year = year;
        self.tally = Tally::default();
        self.issues = IssueCounter::default();
        self.market.update(&self.registry);
    }

    pub fn choice_context(&self) -> ChoiceContext<'_> {
        ChoiceContext::new(
            &self.registry,
            &self.market,
            &self.rents,
            self.accessibility.as_ref(),
            self.strategy.as_ref(),
        )
    }

    /// Run a relocation search for `household` against the current state.
    pub fn search_for(&self, household: HouseholdId, rng: &mut SimRng) -> SimResult<Option<DwellingId>> {
        let ctx = self.choice_context();
        Ok(self.search.search_for_new_dwelling(household, &ctx, rng)?)
    }

    pub fn move_household(
        &mut self,
        household: HouseholdId,
        old: Option<DwellingId>,
        new: DwellingId,
    ) -> SimResult<()> {
        move_household(&mut self.registry, household, old, new)?;
        Ok(())
    }

    /// Remove `household` and its members from the study area.
    ///
    /// Discretionary calls (`forced = false`) do nothing when out-migration
    /// is switched off in the event rules.  Forced calls always apply.
    /// Returns whether the household was removed.
    pub fn out_migrate(&mut self, household: HouseholdId, forced: bool) -> bool {
        if !forced && !self.rules.out_migration {
            debug!(%household, "out-migration disabled by event rules");
            return false;
        }
        match self.registry.remove_household(household) {
            Some((_, persons)) => {
                self.tally.outmigrant_persons += persons.len();
                debug!(%household, persons = persons.len(), forced, "household out-migrated");
                true
            }
            None => false,
        }
    }

    /// Total persons in the study area.
    pub fn population(&self) -> usize {
        self.registry.person_count()
    }
}
