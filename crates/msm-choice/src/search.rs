//! Relocation search: pick a vacant dwelling for a household.
//!
//! # Algorithm
//!
//! 1. Classify the household (`HouseholdType`).
//! 2. For every region (ascending id) take its vacant dwellings that the
//!    household may occupy; if there are more than `samples_per_region`,
//!    draw that many without replacement.
//! 3. Score each candidate: component utilities → strategy utility →
//!    selection weight.  Non-finite or negative weights become 0.
//! 4. One weighted draw over the candidates.  `None` when there are no
//!    candidates or every weight is 0.
//!
//! Step 3 is read-only and runs on Rayon with the `parallel` feature; all
//! random draws happen in steps 2 and 4 on the calling thread, so results do
//! not depend on the feature.

use msm_core::{DwellingId, HouseholdId, HouseholdType, IncomeCategory, MsmError, SimRng};
use msm_market::{MarketAggregator, RentByIncome};
use msm_registry::{Dwelling, EntityRegistry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Accessibility, ChoiceResult, ScoringStrategy, UtilityInputs};

// ── SearchConfig ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum candidates drawn from each region.
    pub samples_per_region:  usize,
    /// Accessibility value that maps to utility 1.
    pub accessibility_scale: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { samples_per_region: 20, accessibility_scale: 100.0 }
    }
}

// ── ChoiceContext ─────────────────────────────────────────────────────────────

/// Read-only view of everything a search consults.
///
/// Built per search from the `World`'s fields; holds no owned data.
pub struct ChoiceContext<'a> {
    pub registry:      &'a EntityRegistry,
    pub market:        &'a MarketAggregator,
    pub rents:         &'a RentByIncome,
    pub accessibility: &'a dyn Accessibility,
    pub strategy:      &'a dyn ScoringStrategy,
}

impl<'a> ChoiceContext<'a> {
    #[inline]
    pub fn new(
        registry:      &'a EntityRegistry,
        market:        &'a MarketAggregator,
        rents:         &'a RentByIncome,
        accessibility: &'a dyn Accessibility,
        strategy:      &'a dyn ScoringStrategy,
    ) -> Self {
        Self { registry, market, rents, accessibility, strategy }
    }
}

// ── RelocationSearch ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct RelocationSearch {
    config: SearchConfig,
}

impl RelocationSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Choose a vacant dwelling for `household`, or `None` if nothing fits.
    ///
    /// # Errors
    /// `MsmError::HouseholdNotFound` if the household does not exist.
    pub fn search_for_new_dwelling(
        &self,
        household: HouseholdId,
        ctx: &ChoiceContext<'_>,
        rng: &mut SimRng,
    ) -> ChoiceResult<Option<DwellingId>> {
        let household_type = ctx
            .registry
            .household_type(household)
            .ok_or(MsmError::HouseholdNotFound(household))?;

        let candidates = self.candidates(household_type, ctx, rng);
        if candidates.is_empty() {
            debug!(%household, "no vacant dwelling available");
            return Ok(None);
        }

        let weights = self.score_all(household_type, &candidates, ctx);
        let chosen = weighted_draw(&candidates, &weights, rng);
        debug!(%household, candidates = candidates.len(), chosen = ?chosen, "relocation search");
        Ok(chosen)
    }

    /// Sampled candidate dwellings, grouped by ascending region.
    pub fn candidates(
        &self,
        household_type: HouseholdType,
        ctx: &ChoiceContext<'_>,
        rng: &mut SimRng,
    ) -> Vec<DwellingId> {
        let vacancy = ctx.registry.vacancy();
        let mut candidates = Vec::new();
        for &region in ctx.registry.geography().regions() {
            let eligible: Vec<DwellingId> = vacancy
                .list(region)
                .into_iter()
                .filter(|&d| {
                    ctx.registry
                        .dwelling(d)
                        .is_some_and(|dw| may_occupy(household_type, dw))
                })
                .collect();
            if eligible.len() <= self.config.samples_per_region {
                candidates.extend(eligible);
            } else {
                let picked = rng.sample_indices(eligible.len(), self.config.samples_per_region);
                candidates.extend(picked.into_iter().map(|i| eligible[i]));
            }
        }
        candidates
    }

    /// Component utilities of `dwelling` for a household of `household_type`.
    pub fn utility_inputs(
        &self,
        household_type: HouseholdType,
        dwelling: &Dwelling,
        ctx: &ChoiceContext<'_>,
    ) -> UtilityInputs {
        let largest = f64::from(ctx.market.largest_bedrooms().max(1));
        let ideal = (household_type.size.index() + 1) as f64;
        let size = 1.0 - ((f64::from(dwelling.bedrooms) - ideal).abs() / largest);

        // Share of same-income households paying at least this bucket.
        let bucket = RentByIncome::rent_bucket(dwelling.price);
        let price = match bucket.checked_sub(1) {
            Some(below) => 1.0 - ctx.rents.cumulative_share(household_type.income, below),
            None => 1.0,
        };

        let regional_price = match ctx.registry.geography().region_of(dwelling.zone) {
            Some(region) => {
                let average = ctx.market.average_price(dwelling.kind, region);
                if average > 0.0 { 1.0 / (1.0 + f64::from(dwelling.price) / average) } else { 0.5 }
            }
            None => 0.5,
        };

        let quality = f64::from(dwelling.quality) / f64::from(ctx.market.quality_levels());
        let scale = self.config.accessibility_scale;
        let access = |v: f64| if scale > 0.0 { (v / scale).clamp(0.0, 1.0) } else { 0.0 };

        UtilityInputs {
            size:           size.clamp(0.0, 1.0),
            price:          price.clamp(0.0, 1.0),
            regional_price: regional_price.clamp(0.0, 1.0),
            quality:        quality.clamp(0.0, 1.0),
            auto_access:    access(ctx.accessibility.auto_accessibility(dwelling.zone)),
            transit_access: access(ctx.accessibility.transit_accessibility(dwelling.zone)),
        }
    }

    fn score(&self, household_type: HouseholdType, dwelling: DwellingId, ctx: &ChoiceContext<'_>) -> f64 {
        let Some(d) = ctx.registry.dwelling(dwelling) else {
            return 0.0;
        };
        let inputs = self.utility_inputs(household_type, d, ctx);
        let utility = ctx.strategy.dwelling_utility(household_type, &inputs);
        let p = ctx.strategy.selection_probability(utility);
        if p.is_finite() && p > 0.0 { p } else { 0.0 }
    }

    fn score_all(
        &self,
        household_type: HouseholdType,
        candidates: &[DwellingId],
        ctx: &ChoiceContext<'_>,
    ) -> Vec<f64> {
        #[cfg(not(feature = "parallel"))]
        {
            candidates.iter().map(|&d| self.score(household_type, d, ctx)).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            candidates.par_iter().map(|&d| self.score(household_type, d, ctx)).collect()
        }
    }
}

/// Income-restricted dwellings are reserved for low-income households.
#[inline]
fn may_occupy(household_type: HouseholdType, dwelling: &Dwelling) -> bool {
    !dwelling.restricted || household_type.income == IncomeCategory::Low
}

/// One draw proportional to `weights`; `None` if the total weight is 0.
fn weighted_draw(candidates: &[DwellingId], weights: &[f64], rng: &mut SimRng) -> Option<DwellingId> {
    let total: f64 = weights.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return None;
    }
    let target = rng.uniform() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (&d, &w) in candidates.iter().zip(weights) {
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_positive = Some(d);
        if target < cumulative {
            return Some(d);
        }
    }
    // Rounding can leave `target` a hair above the final sum.
    last_positive
}

/// Move `household` from `old` into `new`, keeping both occupancy links and
/// the vacancy index consistent.
///
/// Validates first and changes nothing on error.  `old = None` skips the
/// vacate step (in-migrants, residents of a dwelling being demolished).
pub fn move_household(
    registry: &mut EntityRegistry,
    household: HouseholdId,
    old: Option<DwellingId>,
    new: DwellingId,
) -> ChoiceResult<()> {
    registry.relocate_household(household, old, new)?;
    debug!(%household, ?old, %new, "household moved");
    Ok(())
}
