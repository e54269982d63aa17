//! Housing cost by income: how many households of each income decile pay
//! rent in each 250-wide rent class.

use msm_registry::EntityRegistry;

/// Number of income and rent classes.
pub const CLASSES: usize = 10;

/// Width of an income class.
pub const INCOME_CLASS_WIDTH: u32 = 10_000;

/// Width of a rent class.
pub const RENT_CLASS_WIDTH: u32 = 250;

#[derive(Clone, Debug, PartialEq)]
pub struct HousingCostTable {
    /// `counts[income_class][rent_class]`.
    pub counts: [[usize; CLASSES]; CLASSES],
    rent_sums:  [u64; CLASSES],
}

impl HousingCostTable {
    /// Classify every housed household.  Unhoused households are skipped.
    pub fn from_registry(registry: &EntityRegistry) -> Self {
        let mut counts = [[0usize; CLASSES]; CLASSES];
        let mut rent_sums = [0u64; CLASSES];
        for household in registry.households() {
            let Some(dwelling) = household.dwelling.and_then(|d| registry.dwelling(d)) else {
                continue;
            };
            let income = registry.household_income(household.id).unwrap_or(0);
            let income_class = ((income / INCOME_CLASS_WIDTH) as usize).min(CLASSES - 1);
            let rent_class = ((dwelling.price / RENT_CLASS_WIDTH) as usize).min(CLASSES - 1);
            counts[income_class][rent_class] += 1;
            rent_sums[income_class] += u64::from(dwelling.price);
        }
        Self { counts, rent_sums }
    }

    /// Households in `income_class`.
    pub fn households_in(&self, income_class: usize) -> usize {
        self.counts.get(income_class).map_or(0, |row| row.iter().sum())
    }

    /// Mean rent of `income_class`; `None` when the class is empty.
    pub fn average_rent(&self, income_class: usize) -> Option<f64> {
        let n = self.households_in(income_class);
        (n > 0).then(|| self.rent_sums[income_class] as f64 / n as f64)
    }

    /// Upper income bound label of a class (`"<10000"` … `"90000+"`).
    pub fn income_label(income_class: usize) -> String {
        if income_class + 1 >= CLASSES {
            format!("{}+", (CLASSES as u32 - 1) * INCOME_CLASS_WIDTH)
        } else {
            format!("<{}", (income_class as u32 + 1) * INCOME_CLASS_WIDTH)
        }
    }
}
