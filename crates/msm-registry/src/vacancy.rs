//! Region-bucketed index of vacant dwellings.
//!
//! Relocation search pools candidates per region, so the index is keyed by
//! region rather than zone.  Each bucket is a `BTreeSet` so listing a region
//! yields ascending ids and sampling from it is reproducible.
//!
//! Inconsistent calls (adding an id that is already present, removing one
//! that is not) are logged with `tracing::warn!` and otherwise ignored.

use std::collections::BTreeSet;

use msm_core::{DwellingId, RegionId};
use rustc_hash::FxHashMap;
use tracing::warn;

#[derive(Clone, Debug, Default)]
pub struct VacancyIndex {
    buckets: FxHashMap<RegionId, BTreeSet<DwellingId>>,
}

impl VacancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `dwelling` into `region`'s bucket.
    ///
    /// Returns `false` (and warns) if it was already listed.
    pub fn add(&mut self, dwelling: DwellingId, region: RegionId) -> bool {
        let inserted = self.buckets.entry(region).or_default().insert(dwelling);
        if !inserted {
            warn!(%dwelling, %region, "Consistency error: dwelling already listed as vacant");
        }
        inserted
    }

    /// Remove `dwelling` from `region`'s bucket.
    ///
    /// Returns `false` (and warns) if it was not listed.
    pub fn remove(&mut self, dwelling: DwellingId, region: RegionId) -> bool {
        let removed = self
            .buckets
            .get_mut(&region)
            .is_some_and(|bucket| bucket.remove(&dwelling));
        if !removed {
            warn!(%dwelling, %region, "Consistency error: dwelling not listed as vacant");
        }
        removed
    }

    /// Vacant dwellings of `region`, ascending.
    pub fn list(&self, region: RegionId) -> Vec<DwellingId> {
        self.buckets
            .get(&region)
            .map(|bucket| bucket.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn count(&self, region: RegionId) -> usize {
        self.buckets.get(&region).map_or(0, BTreeSet::len)
    }

    pub fn contains(&self, dwelling: DwellingId, region: RegionId) -> bool {
        self.buckets.get(&region).is_some_and(|bucket| bucket.contains(&dwelling))
    }

    /// Vacant dwellings over all regions.
    pub fn total(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    /// Every `(region, dwelling)` entry, in no particular region order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (RegionId, DwellingId)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(&region, bucket)| bucket.iter().map(move |&d| (region, d)))
    }
}
