//! Zone → region lookup.
//!
//! Zone geometry lives outside the simulation; all the core needs is which
//! region each zone belongs to.  Regions are the spatial unit for vacancy
//! bucketing, market statistics and relocation candidate pooling.

use rustc_hash::FxHashMap;

use crate::{MsmError, MsmResult, RegionId, ZoneId};

/// Immutable zone → region mapping plus the sorted list of regions.
///
/// The region list is kept in ascending id order so every consumer that
/// iterates regions (candidate sampling, reporting) does so deterministically.
#[derive(Clone, Debug, Default)]
pub struct Geography {
    zone_region: FxHashMap<ZoneId, RegionId>,
    regions:     Vec<RegionId>,
}

impl Geography {
    /// Build from `(zone, region)` pairs.
    ///
    /// # Errors
    /// [`MsmError::Config`] if a zone is listed twice with different regions.
    pub fn from_pairs<I>(pairs: I) -> MsmResult<Self>
    where
        I: IntoIterator<Item = (ZoneId, RegionId)>,
    {
        let mut zone_region = FxHashMap::default();
        let mut regions = Vec::new();
        for (zone, region) in pairs {
            match zone_region.insert(zone, region) {
                Some(prev) if prev != region => {
                    return Err(MsmError::Config(format!(
                        "{zone} assigned to both {prev} and {region}"
                    )));
                }
                _ => {}
            }
            regions.push(region);
        }
        regions.sort_unstable();
        regions.dedup();
        Ok(Self { zone_region, regions })
    }

    /// Region of `zone`, or `None` for an unknown zone.
    #[inline]
    pub fn region_of(&self, zone: ZoneId) -> Option<RegionId> {
        self.zone_region.get(&zone).copied()
    }

    /// Like [`region_of`](Self::region_of) but unknown zones are an error.
    pub fn require_region(&self, zone: ZoneId) -> MsmResult<RegionId> {
        self.region_of(zone).ok_or(MsmError::ZoneNotFound(zone))
    }

    /// All regions, ascending.
    #[inline]
    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Position of `region` in [`regions`](Self::regions), for dense tables.
    pub fn region_index(&self, region: RegionId) -> Option<usize> {
        self.regions.binary_search(&region).ok()
    }

    pub fn zone_count(&self) -> usize {
        self.zone_region.len()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn contains_zone(&self, zone: ZoneId) -> bool {
        self.zone_region.contains_key(&zone)
    }
}
