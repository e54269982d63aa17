//! Household and person records.

use msm_core::{DwellingId, Gender, HouseholdId, JobId, Occupation, PersonId, PersonRole, Race};

// ── Household ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Household {
    pub id:       HouseholdId,
    /// Members in insertion order.
    pub members:  Vec<PersonId>,
    pub dwelling: Option<DwellingId>,
}

impl Household {
    /// An unhoused household with no members yet.
    pub fn new(id: HouseholdId) -> Self {
        Self { id, members: Vec::new(), dwelling: None }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

// ── Person ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    pub id:         PersonId,
    pub household:  HouseholdId,
    pub age:        u8,
    pub gender:     Gender,
    pub race:       Race,
    pub role:       PersonRole,
    pub occupation: Occupation,
    /// Annual income.
    pub income:     u32,
    pub workplace:  Option<JobId>,
}

impl Person {
    /// A person with no income, no job and `Unemployed` occupation.
    pub fn new(
        id: PersonId,
        household: HouseholdId,
        age: u8,
        gender: Gender,
        race: Race,
        role: PersonRole,
    ) -> Self {
        Self {
            id,
            household,
            age,
            gender,
            race,
            role,
            occupation: Occupation::Unemployed,
            income: 0,
            workplace: None,
        }
    }
}
