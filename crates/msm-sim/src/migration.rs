//! In- and out-migration of whole households.
//!
//! Yearly volumes come from the [`MigrationPolicy`]:
//!
//! | Policy                 | In-migrants              | Out-migrants             |
//! |------------------------|--------------------------|--------------------------|
//! | `migration`            | table column             | table column             |
//! | `population`           | `max(target − pop, 0)`   | `max(pop − target, 0)`   |
//! | `populationGrowthRate` | as `population`, with targets grown from the base year |
//!
//! Volumes are in persons.  Households are sampled whole until the running
//! person count meets or exceeds the volume, so the last household usually
//! overshoots.

use std::path::Path;

use msm_core::{HouseholdId, RunConfig, SimRng, Year};
use msm_registry::{Household, Person};
use tracing::{debug, info, warn};

use crate::tables::{load_migration_table, load_population_targets};
use crate::{
    Event, EventModel, MigrationConfig, MigrationPolicy, MigrationTable, PersonTemplate,
    PopulationTargets, ReportLine, SimError, SimResult, World,
};

/// Where the yearly volumes come from.
#[derive(Clone, Debug)]
enum Control {
    Counts(MigrationTable),
    Targets(PopulationTargets),
}

pub struct MigrationEngine {
    policy:  MigrationPolicy,
    control: Control,
}

impl MigrationEngine {
    /// Engine driven by explicit yearly in/out counts.
    pub fn with_counts(table: MigrationTable) -> Self {
        Self { policy: MigrationPolicy::Migration, control: Control::Counts(table) }
    }

    /// Engine driven by a target population series.
    pub fn with_targets(policy: MigrationPolicy, targets: PopulationTargets) -> Self {
        Self { policy, control: Control::Targets(targets) }
    }

    /// Build the engine a [`MigrationConfig`] describes.
    ///
    /// Table paths are resolved against `base_dir`.  `base_population` seeds
    /// the growth-rate series.
    ///
    /// # Errors
    /// - [`SimError::UnknownMigrationPolicy`] for an unrecognised policy name.
    /// - [`SimError::Config`] if the policy needs a table that is not set.
    /// - I/O and parse errors from loading the table.
    pub fn from_config(
        config:          &MigrationConfig,
        run:             &RunConfig,
        base_population: u64,
        base_dir:        &Path,
    ) -> SimResult<Self> {
        let policy = config.policy()?;
        let engine = match policy {
            MigrationPolicy::Migration => {
                let path = config.migration_table.as_ref().ok_or_else(|| {
                    SimError::Config("policy `migration` requires `migration_table`".to_string())
                })?;
                Self::with_counts(load_migration_table(&base_dir.join(path))?)
            }
            MigrationPolicy::Population => {
                let path = config.population_table.as_ref().ok_or_else(|| {
                    SimError::Config("policy `population` requires `population_table`".to_string())
                })?;
                Self::with_targets(policy, load_population_targets(&base_dir.join(path))?)
            }
            MigrationPolicy::PopulationGrowthRate => {
                let targets =
                    PopulationTargets::from_growth_rate(base_population, config.growth_rate_percent, run);
                Self::with_targets(policy, targets)
            }
        };
        info!(%policy, "migration model initialised");
        Ok(engine)
    }

    pub fn policy(&self) -> MigrationPolicy {
        self.policy
    }

    /// `(inmigrant persons, outmigrant persons)` wanted in `year`.
    fn volumes(&self, year: Year, population: u64) -> SimResult<(u64, u64)> {
        match &self.control {
            Control::Counts(table) => table.get(year),
            Control::Targets(targets) => {
                let target = targets.get(year)?;
                Ok((target.saturating_sub(population), population.saturating_sub(target)))
            }
        }
    }
}

// ── Sampling ──────────────────────────────────────────────────────────────────

/// Households with at least one member, with their sizes, ascending by id.
fn household_pool(world: &World) -> Vec<(HouseholdId, usize)> {
    world
        .registry
        .households()
        .filter(|h| h.size() > 0)
        .map(|h| (h.id, h.size()))
        .collect()
}

fn out_migration_events(pool: &[(HouseholdId, usize)], persons: u64, rng: &mut SimRng) -> Vec<Event> {
    let mut events = Vec::new();
    if persons == 0 {
        return events;
    }
    let mut selected = 0u64;
    for i in rng.sample_indices(pool.len(), pool.len()) {
        let (household, size) = pool[i];
        events.push(Event::OutMigration { household });
        selected += size as u64;
        if selected >= persons {
            return events;
        }
    }
    warn!(wanted = persons, selected, "out-migration exhausted the population");
    events
}

fn in_migration_events(
    world:   &World,
    pool:    &[(HouseholdId, usize)],
    persons: u64,
    rng:     &mut SimRng,
) -> Vec<Event> {
    let mut events = Vec::new();
    if persons == 0 {
        return events;
    }
    if pool.is_empty() {
        warn!(wanted = persons, "no households to sample in-migrants from");
        return events;
    }
    let mut selected = 0u64;
    while selected < persons {
        let (source, size) = pool[rng.gen_range(0..pool.len())];
        let template = world
            .registry
            .persons_of(source)
            .map(|p| PersonTemplate { age: p.age, gender: p.gender, race: p.race, role: p.role })
            .collect();
        events.push(Event::InMigration { household: world.registry.next_household_id(), template });
        selected += size as u64;
    }
    events
}

// ── Handlers ──────────────────────────────────────────────────────────────────

impl MigrationEngine {
    /// Returns `false` when no dwelling was found and the household left
    /// again.
    fn in_migrate(
        &self,
        household: HouseholdId,
        template:  &[PersonTemplate],
        world:     &mut World,
        rng:       &mut SimRng,
    ) -> SimResult<bool> {
        let persons: Vec<Person> = template
            .iter()
            .map(|t| {
                Person::new(world.registry.next_person_id(), household, t.age, t.gender, t.race, t.role)
            })
            .collect();
        let size = persons.len();
        world.registry.add_household(Household::new(household), persons)?;

        match world.search_for(household, rng)? {
            Some(dwelling) => {
                world.move_household(household, None, dwelling)?;
                world.tally.inmigrant_persons += size;
                debug!(%household, %dwelling, persons = size, "in-migrant housed");
                Ok(true)
            }
            None => {
                world.issues.lack_of_dwelling_failed_inmigration += 1;
                world.out_migrate(household, true);
                debug!(%household, "in-migrant found no dwelling and left again");
                Ok(false)
            }
        }
    }
}

impl EventModel for MigrationEngine {
    fn name(&self) -> &'static str {
        "migration"
    }

    fn prepare_year(&mut self, year: Year, world: &World, rng: &mut SimRng) -> SimResult<Vec<Event>> {
        let population = world.population() as u64;
        let (inmigrants, outmigrants) = self.volumes(year, population)?;
        let pool = household_pool(world);

        let mut events = out_migration_events(&pool, outmigrants, rng);
        events.extend(in_migration_events(world, &pool, inmigrants, rng));
        debug!(%year, inmigrants, outmigrants, events = events.len(), "migration events prepared");
        Ok(events)
    }

    fn handle_event(&mut self, event: &Event, world: &mut World, rng: &mut SimRng) -> SimResult<bool> {
        match event {
            Event::OutMigration { household } => Ok(world.out_migrate(*household, true)),
            Event::InMigration { household, template } => self.in_migrate(*household, template, world, rng),
            Event::Demolition { .. } => Ok(false),
        }
    }

    fn finish_year(&mut self, year: Year, world: &mut World) -> Vec<ReportLine> {
        let inmigrants = world.tally.inmigrant_persons;
        let outmigrants = world.tally.outmigrant_persons;
        info!(%year, inmigrants, outmigrants, "migration");
        vec![
            ReportLine::new(self.name(), "InmigrantsPP", inmigrants as f64),
            ReportLine::new(self.name(), "OutmigrantsPP", outmigrants as f64),
        ]
    }
}
