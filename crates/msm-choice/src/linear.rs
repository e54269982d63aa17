//! `LinearScoring`: weighted-mean utilities configured from data.
//!
//! ```json
//! {
//!   "weights":  { "size": 1.0, "price": 2.0, "quality": 1.0 },
//!   "segments": [
//!     { "income": "low", "weights": { "price": 4.0, "quality": 0.5 } }
//!   ],
//!   "selection_sensitivity": 3.0,
//!   "demolition": { "base": 0.001, "age_threshold": 60 }
//! }
//! ```
//!
//! The first segment whose `size` and `income` filters both match a
//! household type supplies its weights; otherwise the top-level `weights`
//! apply.  Omitted fields take their defaults.

use msm_core::{HouseholdSize, HouseholdType, IncomeCategory, Year};
use msm_registry::Dwelling;
use serde::{Deserialize, Serialize};

use crate::{ChoiceError, ChoiceResult, ScoringStrategy, UtilityInputs};

// ── Config ────────────────────────────────────────────────────────────────────

/// Non-negative weight per utility component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentWeights {
    pub size:           f64,
    pub price:          f64,
    pub regional_price: f64,
    pub quality:        f64,
    pub auto_access:    f64,
    pub transit_access: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            size:           1.0,
            price:          1.0,
            regional_price: 0.5,
            quality:        1.0,
            auto_access:    0.5,
            transit_access: 0.25,
        }
    }
}

impl ComponentWeights {
    fn as_array(&self) -> [f64; 6] {
        [
            self.size,
            self.price,
            self.regional_price,
            self.quality,
            self.auto_access,
            self.transit_access,
        ]
    }

    /// Weighted mean of the inputs; 0 when every weight is 0.
    pub fn combine(&self, inputs: &UtilityInputs) -> f64 {
        let values = [
            inputs.size,
            inputs.price,
            inputs.regional_price,
            inputs.quality,
            inputs.auto_access,
            inputs.transit_access,
        ];
        let weights = self.as_array();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        weights.iter().zip(values).map(|(w, v)| w * v).sum::<f64>() / total
    }

    fn validate(&self, context: &str) -> ChoiceResult<()> {
        if self.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ChoiceError::Config(format!(
                "{context}: weights must be finite and non-negative"
            )));
        }
        Ok(())
    }
}

/// Weights for the household types matching both filters (`None` matches all).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentWeights {
    #[serde(default)]
    pub size:    Option<HouseholdSize>,
    #[serde(default)]
    pub income:  Option<IncomeCategory>,
    pub weights: ComponentWeights,
}

impl SegmentWeights {
    fn matches(&self, household: HouseholdType) -> bool {
        self.size.is_none_or(|s| s == household.size)
            && self.income.is_none_or(|i| i == household.income)
    }
}

/// Annual demolition probability terms.
///
/// `p = base + per_year_over · max(age − age_threshold, 0)
///        + per_quality_below_top · (Q − quality)`, capped at `max`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemolitionRates {
    pub base:                  f64,
    pub per_year_over:         f64,
    pub age_threshold:         u32,
    pub per_quality_below_top: f64,
    pub max:                   f64,
}

impl Default for DemolitionRates {
    fn default() -> Self {
        Self {
            base:                  0.001,
            per_year_over:         0.000_1,
            age_threshold:         50,
            per_quality_below_top: 0.000_5,
            max:                   0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearScoringConfig {
    pub weights:               ComponentWeights,
    pub segments:              Vec<SegmentWeights>,
    /// `k` in `1 − exp(−k · u)`.
    pub selection_sensitivity: f64,
    pub demolition:            DemolitionRates,
}

impl Default for LinearScoringConfig {
    fn default() -> Self {
        Self {
            weights:               ComponentWeights::default(),
            segments:              Vec::new(),
            selection_sensitivity: 3.0,
            demolition:            DemolitionRates::default(),
        }
    }
}

// ── LinearScoring ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct LinearScoring {
    config:         LinearScoringConfig,
    quality_levels: u8,
}

impl LinearScoring {
    /// Validate `config` and build the strategy for quality levels `1..=Q`.
    pub fn new(config: LinearScoringConfig, quality_levels: u8) -> ChoiceResult<Self> {
        config.weights.validate("weights")?;
        for (i, segment) in config.segments.iter().enumerate() {
            segment.weights.validate(&format!("segments[{i}]"))?;
        }
        if !config.selection_sensitivity.is_finite() || config.selection_sensitivity <= 0.0 {
            return Err(ChoiceError::Config(format!(
                "selection_sensitivity must be positive, got {}",
                config.selection_sensitivity
            )));
        }
        let d = &config.demolition;
        if [d.base, d.per_year_over, d.per_quality_below_top, d.max]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(ChoiceError::Config(
                "demolition rates must be finite and non-negative".into(),
            ));
        }
        Ok(Self { config, quality_levels: quality_levels.max(1) })
    }

    pub fn config(&self) -> &LinearScoringConfig {
        &self.config
    }

    /// Weights applied to `household`.
    pub fn weights_for(&self, household: HouseholdType) -> &ComponentWeights {
        self.config
            .segments
            .iter()
            .find(|s| s.matches(household))
            .map_or(&self.config.weights, |s| &s.weights)
    }
}

impl ScoringStrategy for LinearScoring {
    fn dwelling_utility(&self, household: HouseholdType, inputs: &UtilityInputs) -> f64 {
        self.weights_for(household).combine(inputs)
    }

    fn selection_probability(&self, utility: f64) -> f64 {
        1.0 - (-self.config.selection_sensitivity * utility.max(0.0)).exp()
    }

    fn demolition_probability(&self, dwelling: &Dwelling, year: Year) -> f64 {
        let rates = &self.config.demolition;
        let years_over = dwelling.age(year).saturating_sub(rates.age_threshold);
        let below_top = self.quality_levels.saturating_sub(dwelling.quality);
        let p = rates.base
            + rates.per_year_over * f64::from(years_over)
            + rates.per_quality_below_top * f64::from(below_top);
        p.min(rates.max).clamp(0.0, 1.0)
    }
}
