//! The dwelling record.

use msm_core::{DwellingId, DwellingType, HouseholdId, Year, ZoneId};

/// One housing unit.
///
/// `resident` is `None` for a vacant dwelling.  Once a dwelling is inside an
/// [`EntityRegistry`](crate::EntityRegistry) its occupancy can only change
/// through registry methods, so the vacancy index never drifts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dwelling {
    pub id:         DwellingId,
    pub zone:       ZoneId,
    pub kind:       DwellingType,
    /// Quality level in `1..=Q`.
    pub quality:    u8,
    pub bedrooms:   u8,
    /// Monthly price.
    pub price:      u32,
    pub resident:   Option<HouseholdId>,
    pub year_built: Year,
    /// Income-restricted (affordable) unit.
    pub restricted: bool,
}

impl Dwelling {
    /// A vacant, unrestricted dwelling.
    pub fn new(
        id: DwellingId,
        zone: ZoneId,
        kind: DwellingType,
        bedrooms: u8,
        quality: u8,
        price: u32,
        year_built: Year,
    ) -> Self {
        Self {
            id,
            zone,
            kind,
            quality,
            bedrooms,
            price,
            resident: None,
            year_built,
            restricted: false,
        }
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.resident.is_none()
    }

    /// Age in years at `year`; never negative.
    pub fn age(&self, year: Year) -> u32 {
        year.since(self.year_built).max(0) as u32
    }
}
