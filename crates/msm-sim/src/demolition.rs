//! Yearly demolition of dwellings.

use msm_core::{SimRng, Year};
use tracing::{debug, info};

use crate::{Event, EventModel, ReportLine, SimResult, World};

/// Considers every dwelling once a year and demolishes it with the
/// strategy's demolition probability.
///
/// A resident household is relocated first; if no vacant dwelling fits it
/// leaves the study area.
#[derive(Clone, Debug, Default)]
pub struct DemolitionEngine;

impl DemolitionEngine {
    pub fn new() -> Self {
        Self
    }
}

impl EventModel for DemolitionEngine {
    fn name(&self) -> &'static str {
        "demolition"
    }

    fn prepare_year(&mut self, _year: Year, world: &World, _rng: &mut SimRng) -> SimResult<Vec<Event>> {
        Ok(world.registry.dwelling_ids().map(|dwelling| Event::Demolition { dwelling }).collect())
    }

    fn handle_event(&mut self, event: &Event, world: &mut World, rng: &mut SimRng) -> SimResult<bool> {
        let Event::Demolition { dwelling } = *event else {
            return Ok(false);
        };
        let Some(d) = world.registry.dwelling(dwelling) else {
            return Ok(false);
        };
        let probability = world.strategy.demolition_probability(d, world.year);
        let resident = d.resident;
        // A non-finite probability never demolishes.
        let demolish = rng.uniform() < probability;
        if !demolish {
            return Ok(false);
        }

        if let Some(household) = resident {
            match world.search_for(household, rng)? {
                Some(new) => world.move_household(household, None, new)?,
                None => {
                    world.out_migrate(household, true);
                    world.issues.lack_of_dwelling_forced_outmigration += 1;
                }
            }
        }
        world.registry.remove_dwelling(dwelling);
        world.tally.demolished_dwellings += 1;
        debug!(%dwelling, ?resident, "dwelling demolished");
        Ok(true)
    }

    fn finish_year(&mut self, year: Year, world: &mut World) -> Vec<ReportLine> {
        let demolished = world.tally.demolished_dwellings;
        info!(%year, demolished, "demolition");
        vec![ReportLine::new(self.name(), "DemolishedDwellings", demolished as f64)]
    }
}
