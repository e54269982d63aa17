//! Accessibility service contract.
//!
//! Travel-time skims and their accessibility measures are computed outside
//! the simulation.  The search only needs one auto and one transit value per
//! zone, on whatever scale the provider uses; `SearchConfig::accessibility_scale`
//! maps that scale onto `[0, 1]`.

use msm_core::ZoneId;
use rustc_hash::FxHashMap;

pub trait Accessibility: Send + Sync {
    fn auto_accessibility(&self, zone: ZoneId) -> f64;
    fn transit_accessibility(&self, zone: ZoneId) -> f64;
}

// ── ZoneAccessibility ─────────────────────────────────────────────────────────

/// Table of precomputed per-zone accessibilities.  Unknown zones score 0.
#[derive(Clone, Debug, Default)]
pub struct ZoneAccessibility {
    values: FxHashMap<ZoneId, (f64, f64)>,
}

impl ZoneAccessibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `zone`'s auto and transit accessibility, replacing earlier values.
    pub fn insert(&mut self, zone: ZoneId, auto: f64, transit: f64) {
        self.values.insert(zone, (auto, transit));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ZoneId, f64, f64)> for ZoneAccessibility {
    fn from_iter<I: IntoIterator<Item = (ZoneId, f64, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (zone, auto, transit) in iter {
            table.insert(zone, auto, transit);
        }
        table
    }
}

impl Accessibility for ZoneAccessibility {
    fn auto_accessibility(&self, zone: ZoneId) -> f64 {
        self.values.get(&zone).map_or(0.0, |v| v.0)
    }

    fn transit_accessibility(&self, zone: ZoneId) -> f64 {
        self.values.get(&zone).map_or(0.0, |v| v.1)
    }
}

// ── UniformAccessibility ──────────────────────────────────────────────────────

/// The same accessibility everywhere.  Useful when no skim is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformAccessibility {
    pub auto:    f64,
    pub transit: f64,
}

impl Accessibility for UniformAccessibility {
    fn auto_accessibility(&self, _zone: ZoneId) -> f64 {
        self.auto
    }

    fn transit_accessibility(&self, _zone: ZoneId) -> f64 {
        self.transit
    }
}
