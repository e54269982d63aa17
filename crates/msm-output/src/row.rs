//! Plain data row types written by output backends.

/// Population, stock and flows at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearSummaryRow {
    pub year:                 i32,
    pub population:           u64,
    pub households:           u64,
    pub dwellings:            u64,
    pub vacant:               u64,
    pub vacancy_rate:         f64,
    pub inmigrant_persons:    u64,
    pub outmigrant_persons:   u64,
    pub demolished_dwellings: u64,
    /// In-migrants that found no dwelling and left again.
    pub failed_inmigration:   u64,
    /// Residents of demolished dwellings that had to leave.
    pub forced_outmigration:  u64,
    pub events:               u64,
    pub events_changed:       u64,
}

/// One (dwelling type, region) market cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    pub year:          i32,
    pub dwelling_type: String,
    pub region:        u32,
    pub dwellings:     u64,
    pub vacant:        u64,
    pub vacancy_rate:  f64,
    pub average_price: f64,
}

/// Share of an income category paying rent in one bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct RentShareRow {
    pub income: String,
    /// Rent bucket index (`price / 200`, capped at 25).
    pub bucket: u32,
    pub count:  u64,
    pub share:  f64,
}

/// Households in one (income class, rent class) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HousingCostRow {
    pub year:         i32,
    /// Income class label, e.g. `"<20000"` or `"90000+"`.
    pub income_class: String,
    /// Rent class index (`rent / 250`, capped at 9).
    pub rent_class:   u32,
    pub households:   u64,
}

/// One `key = value` line reported by an event model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelReportRow {
    pub year:  i32,
    pub model: String,
    pub key:   String,
    pub value: f64,
}
