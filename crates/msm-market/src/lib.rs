//! `msm-market`: aggregate housing-market statistics.
//!
//! | Module             | Contents                                                |
//! |--------------------|---------------------------------------------------------|
//! | [`aggregator`]     | `MarketAggregator`, `MarketCell` (type × region stats)  |
//! | [`rent`]           | `RentByIncome` (share of rent buckets per income class) |
//! | [`housing_cost`]   | `HousingCostTable` (income decile × rent class counts)  |
//!
//! Nothing in this crate mutates the registry.  Statistics are recomputed
//! from scratch on each call so they always describe the state at the moment
//! they were taken (normally the start of a simulated year).

pub mod aggregator;
pub mod housing_cost;
pub mod rent;


pub use aggregator::{MarketAggregator, MarketCell};
pub use housing_cost::HousingCostTable;
pub use rent::RentByIncome;

/// Share of `count` in `total`; zero when `total` is zero.
#[inline]
pub(crate) fn share(count: usize, total: usize) -> f64 {
    if total == 0 { 0.0 } else { count as f64 / total as f64 }
}
