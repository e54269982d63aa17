//! Price and vacancy by dwelling type × region, plus the quality mix.

use std::collections::BTreeMap;

use msm_core::{DwellingType, RegionId};
use msm_registry::EntityRegistry;
use tracing::debug;

use crate::share;

// ── MarketCell ────────────────────────────────────────────────────────────────

/// Statistics for one (dwelling type, region) cell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MarketCell {
    pub kind:          DwellingType,
    pub region:        RegionId,
    pub dwellings:     usize,
    pub vacant:        usize,
    /// `vacant / dwellings`; 0 for an empty cell.
    pub vacancy_rate:  f64,
    /// Mean monthly price; 0 for an empty cell.
    pub average_price: f64,
}

impl MarketCell {
    fn empty(kind: DwellingType, region: RegionId) -> Self {
        Self { kind, region, dwellings: 0, vacant: 0, vacancy_rate: 0.0, average_price: 0.0 }
    }
}

#[derive(Default, Clone, Copy)]
struct Tally {
    dwellings: usize,
    vacant:    usize,
    price_sum: u64,
}

impl Tally {
    fn record(&mut self, price: u32, vacant: bool) {
        self.dwellings += 1;
        self.price_sum += u64::from(price);
        if vacant {
            self.vacant += 1;
        }
    }

    fn average_price(&self) -> f64 {
        if self.dwellings == 0 { 0.0 } else { self.price_sum as f64 / self.dwellings as f64 }
    }

    fn vacancy_rate(&self) -> f64 {
        share(self.vacant, self.dwellings)
    }
}

// ── MarketAggregator ──────────────────────────────────────────────────────────

/// Yearly market statistics.
///
/// Call [`update`](Self::update) once at the start of every simulated year.
/// The first update also fixes the initial quality shares.  Every accessor
/// returns 0 for a cell, type or quality level with no dwellings.
pub struct MarketAggregator {
    quality_levels:   u8,
    cells:            BTreeMap<(DwellingType, RegionId), MarketCell>,
    by_type:          [Tally; DwellingType::ALL.len()],
    by_quality:       Vec<usize>,
    initial_shares:   Option<Vec<f64>>,
    largest_bedrooms: u8,
}

impl MarketAggregator {
    /// An aggregator for quality levels `1..=quality_levels`.
    pub fn new(quality_levels: u8) -> Self {
        let levels = quality_levels.max(1);
        Self {
            quality_levels:   levels,
            cells:            BTreeMap::new(),
            by_type:          [Tally::default(); DwellingType::ALL.len()],
            by_quality:       vec![0; usize::from(levels)],
            initial_shares:   None,
            largest_bedrooms: 0,
        }
    }

    /// Recompute every statistic from the current registry state.
    ///
    /// Out-of-range quality values are clamped into `1..=Q`.
    pub fn update(&mut self, registry: &EntityRegistry) {
        let mut cells: BTreeMap<(DwellingType, RegionId), Tally> = BTreeMap::new();
        for &region in registry.geography().regions() {
            for kind in DwellingType::ALL {
                cells.insert((kind, region), Tally::default());
            }
        }
        let mut by_type = [Tally::default(); DwellingType::ALL.len()];
        let mut by_quality = vec![0usize; usize::from(self.quality_levels)];
        let mut largest_bedrooms = 0u8;

        for dwelling in registry.dwellings() {
            let vacant = dwelling.is_vacant();
            if let Some(region) = registry.geography().region_of(dwelling.zone) {
                cells.entry((dwelling.kind, region)).or_default().record(dwelling.price, vacant);
            }
            by_type[dwelling.kind.index()].record(dwelling.price, vacant);
            let q = dwelling.quality.clamp(1, self.quality_levels);
            by_quality[usize::from(q - 1)] += 1;
            largest_bedrooms = largest_bedrooms.max(dwelling.bedrooms);
        }

        self.cells = cells
            .into_iter()
            .map(|((kind, region), t)| {
                let cell = MarketCell {
                    kind,
                    region,
                    dwellings:     t.dwellings,
                    vacant:        t.vacant,
                    vacancy_rate:  t.vacancy_rate(),
                    average_price: t.average_price(),
                };
                ((kind, region), cell)
            })
            .collect();
        self.by_type = by_type;
        self.by_quality = by_quality;
        self.largest_bedrooms = largest_bedrooms;
        if self.initial_shares.is_none() {
            self.initial_shares = Some(self.current_quality_shares());
        }

        debug!(
            dwellings = registry.dwelling_count(),
            vacant = registry.vacancy().total(),
            "market statistics updated"
        );
    }

    fn cell(&self, kind: DwellingType, region: RegionId) -> Option<&MarketCell> {
        self.cells.get(&(kind, region))
    }

    pub fn vacancy_rate(&self, kind: DwellingType, region: RegionId) -> f64 {
        self.cell(kind, region).map_or(0.0, |c| c.vacancy_rate)
    }

    pub fn average_price(&self, kind: DwellingType, region: RegionId) -> f64 {
        self.cell(kind, region).map_or(0.0, |c| c.average_price)
    }

    pub fn dwelling_count(&self, kind: DwellingType, region: RegionId) -> usize {
        self.cell(kind, region).map_or(0, |c| c.dwellings)
    }

    /// Region-wide average price of `kind`.
    pub fn average_price_by_type(&self, kind: DwellingType) -> f64 {
        self.by_type[kind.index()].average_price()
    }

    /// Region-wide vacancy rate of `kind`.
    pub fn average_vacancy_by_type(&self, kind: DwellingType) -> f64 {
        self.by_type[kind.index()].vacancy_rate()
    }

    /// Dwelling counts indexed by `quality - 1`.
    pub fn dwellings_by_quality(&self) -> &[usize] {
        &self.by_quality
    }

    /// Quality shares at the first update; all zeros before it.
    pub fn initial_quality_shares(&self) -> Vec<f64> {
        self.initial_shares
            .clone()
            .unwrap_or_else(|| vec![0.0; usize::from(self.quality_levels)])
    }

    /// Quality shares at the latest update.
    pub fn current_quality_shares(&self) -> Vec<f64> {
        let total: usize = self.by_quality.iter().sum();
        self.by_quality.iter().map(|&n| share(n, total)).collect()
    }

    pub fn largest_bedrooms(&self) -> u8 {
        self.largest_bedrooms
    }

    pub fn quality_levels(&self) -> u8 {
        self.quality_levels
    }

    /// Every (type, region) cell, ordered by type then region.
    pub fn cells(&self) -> impl Iterator<Item = &MarketCell> + '_ {
        self.cells.values()
    }
}
