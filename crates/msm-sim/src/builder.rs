//! Fluent builder for constructing a [`Sim`].

use std::path::Path;

use msm_choice::{
    Accessibility, LinearScoring, LinearScoringConfig, RelocationSearch, ScoringStrategy,
    SearchConfig, UniformAccessibility,
};
use msm_core::{RunConfig, SimRng};
use msm_registry::EntityRegistry;

use crate::{
    DemolitionEngine, EventModel, EventRules, MigrationEngine, ScenarioConfig, Sim, SimError,
    SimResult, World,
};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RunConfig`]: years and seed
/// - [`EntityRegistry`]: the base-year population, e.g. from
///   [`msm_registry::RegistryBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                      |
/// |------------------------|----------------------------------------------|
/// | `.quality_levels(q)`   | 4                                            |
/// | `.search(c)`           | `SearchConfig::default()`                    |
/// | `.strategy(s)`         | `LinearScoring` with default weights         |
/// | `.accessibility(a)`    | `UniformAccessibility::default()` (all zero) |
/// | `.event_rules(r)`      | everything enabled                           |
/// | `.model(m)`            | no models                                    |
/// | `.check_consistency()` | off                                          |
///
/// Models run in the order they are added.
///
/// # Example
///
/// ```rust,ignore
/// let registry = RegistryBuilder::new().geography(geo).dwellings(d).build()?;
/// let mut sim = SimBuilder::new(run, registry)
///     .model(Box::new(DemolitionEngine::new()))
///     .model(Box::new(MigrationEngine::with_counts(table)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    run:               RunConfig,
    registry:          EntityRegistry,
    quality_levels:    u8,
    search:            SearchConfig,
    strategy:          Option<Box<dyn ScoringStrategy>>,
    accessibility:     Option<Box<dyn Accessibility>>,
    rules:             EventRules,
    models:            Vec<Box<dyn EventModel>>,
    check_consistency: bool,
}

impl SimBuilder {
    pub fn new(run: RunConfig, registry: EntityRegistry) -> Self {
        Self {
            run,
            registry,
            quality_levels:    4,
            search:            SearchConfig::default(),
            strategy:          None,
            accessibility:     None,
            rules:             EventRules::default(),
            models:            Vec::new(),
            check_consistency: false,
        }
    }

    /// Builder for a scenario: demolition then migration, each only if its
    /// event rule is on, scored by `LinearScoring` from the scenario.
    ///
    /// Table paths in the scenario are resolved against `base_dir`.
    ///
    /// # Errors
    /// Unknown migration policy, missing or malformed tables, and invalid
    /// scoring weights are reported here, before any year runs.
    pub fn from_scenario(
        scenario: &ScenarioConfig,
        registry: EntityRegistry,
        base_dir: &Path,
    ) -> SimResult<Self> {
        let strategy = LinearScoring::new(scenario.scoring.clone(), scenario.quality_levels)?;
        let base_population = registry.person_count() as u64;

        let mut builder = Self::new(scenario.run.clone(), registry)
            .quality_levels(scenario.quality_levels)
            .search(scenario.search.clone())
            .strategy(strategy)
            .event_rules(scenario.event_rules);
        if scenario.check_consistency {
            builder = builder.check_consistency();
        }
        if scenario.event_rules.demolition {
            builder = builder.model(Box::new(DemolitionEngine::new()));
        }
        if scenario.event_rules.migration {
            let engine =
                MigrationEngine::from_config(&scenario.migration, &scenario.run, base_population, base_dir)?;
            builder = builder.model(Box::new(engine));
        }
        Ok(builder)
    }

    /// Number of dwelling quality levels (`quality ∈ 1..=q`).
    pub fn quality_levels(mut self, levels: u8) -> Self {
        self.quality_levels = levels;
        self
    }

    pub fn search(mut self, config: SearchConfig) -> Self {
        self.search = config;
        self
    }

    pub fn strategy(mut self, strategy: impl ScoringStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    pub fn accessibility(mut self, accessibility: impl Accessibility + 'static) -> Self {
        self.accessibility = Some(Box::new(accessibility));
        self
    }

    pub fn event_rules(mut self, rules: EventRules) -> Self {
        self.rules = rules;
        self
    }

    /// Append an event model.  Models run in the order they are added.
    pub fn model(mut self, model: Box<dyn EventModel>) -> Self {
        self.models.push(model);
        self
    }

    /// Check registry consistency after every year and log what is found.
    pub fn check_consistency(mut self) -> Self {
        self.check_consistency = true;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`] positioned at the
    /// start year.
    pub fn build(self) -> SimResult<Sim> {
        if self.run.year_count() == 0 {
            return Err(SimError::Config(format!(
                "end year {} is before start year {}",
                self.run.end_year, self.run.start_year
            )));
        }
        if self.quality_levels == 0 {
            return Err(SimError::Config("quality_levels must be at least 1".to_string()));
        }
        if self.search.samples_per_region == 0 {
            return Err(SimError::Config("samples_per_region must be at least 1".to_string()));
        }

        let strategy: Box<dyn ScoringStrategy> = match self.strategy {
            Some(s) => s,
            None => Box::new(LinearScoring::new(LinearScoringConfig::default(), self.quality_levels)?),
        };
        let accessibility = self
            .accessibility
            .unwrap_or_else(|| Box::new(UniformAccessibility::default()));

        let world = World::new(
            self.run.start_year,
            self.registry,
            self.quality_levels,
            accessibility,
            strategy,
            RelocationSearch::new(self.search),
            self.rules,
        );

        Ok(Sim {
            rng:               SimRng::new(self.run.seed),
            current:           self.run.start_year,
            run:               self.run,
            world,
            models:            self.models,
            check_consistency: self.check_consistency,
        })
    }
}
