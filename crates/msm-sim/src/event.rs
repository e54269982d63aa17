//! Events produced at the start of a year and applied one at a time.

use msm_core::{DwellingId, Gender, HouseholdId, PersonRole, Race};

/// Attributes copied from a sampled resident onto a new in-migrant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonTemplate {
    pub age:    u8,
    pub gender: Gender,
    pub race:   Race,
    pub role:   PersonRole,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A new household arrives.  `household` is allocated when the event is
    /// created; person ids are allocated when it is applied.
    InMigration {
        household: HouseholdId,
        template:  Vec<PersonTemplate>,
    },
    /// An existing household leaves the study area.
    OutMigration { household: HouseholdId },
    /// A dwelling is considered for demolition.
    Demolition { dwelling: DwellingId },
}

impl Event {
    /// Short label used in logs and output rows.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::InMigration { .. } => "in_migration",
            Event::OutMigration { .. } => "out_migration",
            Event::Demolition { .. } => "demolition",
        }
    }
}
