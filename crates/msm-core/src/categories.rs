//! Closed categorical attributes shared by every crate.
//!
//! All variants are always compiled in.  Enums that index dense statistics
//! tables (`DwellingType`, `IncomeCategory`, `HouseholdSize`) expose an
//! `ALL` constant in table order plus an `index()` helper.

use std::fmt;

// ── DwellingType ──────────────────────────────────────────────────────────────

/// Structural type of a dwelling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DwellingType {
    /// Single-family detached.
    Sfd,
    /// Single-family attached (row house, duplex).
    Sfa,
    /// Multi-family, 2–4 units.
    Mf234,
    /// Multi-family, 5 or more units.
    Mf5plus,
    /// Mobile home.
    Mh,
}

impl DwellingType {
    pub const ALL: [DwellingType; 5] = [
        DwellingType::Sfd,
        DwellingType::Sfa,
        DwellingType::Mf234,
        DwellingType::Mf5plus,
        DwellingType::Mh,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DwellingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DwellingType::Sfd     => "SFD",
            DwellingType::Sfa     => "SFA",
            DwellingType::Mf234   => "MF234",
            DwellingType::Mf5plus => "MF5plus",
            DwellingType::Mh      => "MH",
        };
        f.write_str(s)
    }
}

// ── IncomeCategory ────────────────────────────────────────────────────────────

/// Ordered partition of annual household income.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncomeCategory {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 4] = [
        IncomeCategory::Low,
        IncomeCategory::Medium,
        IncomeCategory::High,
        IncomeCategory::VeryHigh,
    ];

    /// Upper bounds (exclusive) of every category except the last.
    pub const BOUNDS: [u32; 3] = [20_000, 40_000, 60_000];

    /// The highest category; receives the guaranteed top-rent observation.
    pub const HIGHEST: IncomeCategory = IncomeCategory::VeryHigh;

    pub fn from_income(income: u32) -> Self {
        match Self::BOUNDS.iter().position(|&bound| income < bound) {
            Some(i) => Self::ALL[i],
            None    => Self::HIGHEST,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IncomeCategory::Low      => "low",
            IncomeCategory::Medium   => "medium",
            IncomeCategory::High     => "high",
            IncomeCategory::VeryHigh => "very_high",
        };
        f.write_str(s)
    }
}

// ── HouseholdType ─────────────────────────────────────────────────────────────

/// Household size bucket used for choice-model segmentation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HouseholdSize {
    One,
    Two,
    Three,
    FourPlus,
}

impl HouseholdSize {
    pub const ALL: [HouseholdSize; 4] = [
        HouseholdSize::One,
        HouseholdSize::Two,
        HouseholdSize::Three,
        HouseholdSize::FourPlus,
    ];

    /// Bucket a member count.  Empty households are treated as one-person.
    pub fn from_members(n: usize) -> Self {
        match n {
            0 | 1 => HouseholdSize::One,
            2     => HouseholdSize::Two,
            3     => HouseholdSize::Three,
            _     => HouseholdSize::FourPlus,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Size × income classification of a household.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseholdType {
    pub size:   HouseholdSize,
    pub income: IncomeCategory,
}

impl HouseholdType {
    /// Number of distinct household types.
    pub const COUNT: usize = HouseholdSize::ALL.len() * IncomeCategory::ALL.len();

    pub fn classify(members: usize, income: u32) -> Self {
        Self {
            size:   HouseholdSize::from_members(members),
            income: IncomeCategory::from_income(income),
        }
    }

    /// Dense index in `0..COUNT`, size-major.
    #[inline]
    pub fn index(self) -> usize {
        self.size.index() * IncomeCategory::ALL.len() + self.income.index()
    }
}

impl fmt::Display for HouseholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size{}_{}", self.size.index() + 1, self.income)
    }
}

// ── Person attributes ─────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Gender {
    Male,
    Female,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Race {
    White,
    Black,
    Hispanic,
    Other,
}

/// Role of a person within their household.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PersonRole {
    Single,
    Married,
    Child,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Occupation {
    Toddler,
    Employed,
    #[default]
    Unemployed,
    Student,
    Retiree,
}

impl Occupation {
    #[inline]
    pub fn is_employed(self) -> bool {
        matches!(self, Occupation::Employed)
    }
}
