//! The `ScoringStrategy` trait: the injected numeric behaviour.

use msm_core::{HouseholdType, Year};
use msm_registry::Dwelling;

/// Component utilities of one candidate dwelling, each in `[0, 1]`.
///
/// Computed by [`RelocationSearch`](crate::RelocationSearch) from the
/// registry, market statistics and accessibility service, then handed to
/// [`ScoringStrategy::dwelling_utility`] to be combined.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UtilityInputs {
    /// Fit of the bedroom count to the household size.
    pub size:           f64,
    /// Share of same-income households observed paying at least this rent.
    pub price:          f64,
    /// Price relative to the (type, region) average; 0.5 at the average.
    pub regional_price: f64,
    /// `quality / Q`.
    pub quality:        f64,
    pub auto_access:    f64,
    pub transit_access: f64,
}

/// Pluggable utility, selection and demolition functions.
///
/// Implementations must be `Send + Sync`: with the `parallel` feature the
/// search calls `dwelling_utility` and `selection_probability` from Rayon
/// workers.  They must not hold per-call mutable state.
pub trait ScoringStrategy: Send + Sync {
    /// Combine component utilities into one desirability value.
    fn dwelling_utility(&self, household: HouseholdType, inputs: &UtilityInputs) -> f64;

    /// Map a utility to a selection weight in `[0, 1]`.
    ///
    /// Non-finite or negative results are treated as 0 by the search.
    fn selection_probability(&self, utility: f64) -> f64;

    /// Probability in `[0, 1]` that `dwelling` is demolished in `year`.
    fn demolition_probability(&self, dwelling: &Dwelling, year: Year) -> f64;
}
