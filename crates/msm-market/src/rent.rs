//! Distribution of rent buckets paid by each income category.
//!
//! Rents are bucketed as `min(price / 200, 25)`.  The distribution is taken
//! once from the initial population and then held fixed: it describes what
//! households of a given income are *observed* to pay, which the relocation
//! search turns into a price utility.
//!
//! One synthetic observation is added to the top bucket of the highest
//! income category so that the most expensive dwellings always remain
//! affordable to someone.

use msm_core::IncomeCategory;
use msm_registry::EntityRegistry;

use crate::share;

/// Width of a rent bucket in price units.
pub const RENT_BUCKET_WIDTH: u32 = 200;

/// Highest rent bucket; every price at or above `25 * 200` lands here.
pub const MAX_RENT_BUCKET: usize = 25;

const BUCKETS: usize = MAX_RENT_BUCKET + 1;

#[derive(Clone, Debug)]
pub struct RentByIncome {
    counts: [[usize; BUCKETS]; IncomeCategory::ALL.len()],
    shares: [[f64; BUCKETS]; IncomeCategory::ALL.len()],
}

impl RentByIncome {
    /// Bucket of a monthly price.
    #[inline]
    pub fn rent_bucket(price: u32) -> usize {
        ((price / RENT_BUCKET_WIDTH) as usize).min(MAX_RENT_BUCKET)
    }

    /// Observe every occupied dwelling and its resident's income category.
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        let mut counts = [[0usize; BUCKETS]; IncomeCategory::ALL.len()];
        for dwelling in registry.dwellings() {
            let Some(hh) = dwelling.resident else { continue };
            let Some(income) = registry.household_income(hh) else { continue };
            let category = IncomeCategory::from_income(income);
            counts[category.index()][Self::rent_bucket(dwelling.price)] += 1;
        }
        counts[IncomeCategory::HIGHEST.index()][MAX_RENT_BUCKET] += 1;
        Self::from_counts(counts)
    }

    fn from_counts(counts: [[usize; BUCKETS]; IncomeCategory::ALL.len()]) -> Self {
        let mut shares = [[0.0; BUCKETS]; IncomeCategory::ALL.len()];
        for (row, out) in counts.iter().zip(shares.iter_mut()) {
            let total: usize = row.iter().sum();
            for (n, s) in row.iter().zip(out.iter_mut()) {
                *s = share(*n, total);
            }
        }
        Self { counts, shares }
    }

    /// Share of `income` households paying in `bucket` (0 beyond the last bucket).
    pub fn share(&self, income: IncomeCategory, bucket: usize) -> f64 {
        self.shares[income.index()].get(bucket).copied().unwrap_or(0.0)
    }

    /// All bucket shares for `income`, in bucket order.
    pub fn shares(&self, income: IncomeCategory) -> &[f64] {
        &self.shares[income.index()]
    }

    /// Share of `income` households paying in buckets `0..=bucket`.
    pub fn cumulative_share(&self, income: IncomeCategory, bucket: usize) -> f64 {
        let end = bucket.min(MAX_RENT_BUCKET) + 1;
        self.shares[income.index()][..end].iter().sum()
    }

    /// Observation count for `(income, bucket)`, including the synthetic one.
    pub fn count(&self, income: IncomeCategory, bucket: usize) -> usize {
        self.counts[income.index()].get(bucket).copied().unwrap_or(0)
    }

    /// Number of rent buckets.
    pub const fn bucket_count() -> usize {
        BUCKETS
    }
}
