//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `MsmError` as one
//! variant via `#[from]`, so `?` works across crate boundaries.

use thiserror::Error;

use crate::{DwellingId, HouseholdId, PersonId, ZoneId};

/// The base error type for `msm-core` and the entity registry.
#[derive(Debug, Error)]
pub enum MsmError {
    #[error("dwelling {0} not found")]
    DwellingNotFound(DwellingId),

    #[error("household {0} not found")]
    HouseholdNotFound(HouseholdId),

    #[error("person {0} not found")]
    PersonNotFound(PersonId),

    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    #[error("dwelling {0} already exists")]
    DuplicateDwelling(DwellingId),

    #[error("household {0} already exists")]
    DuplicateHousehold(HouseholdId),

    #[error("person {0} already exists")]
    DuplicatePerson(PersonId),

    #[error("dwelling {dwelling} is occupied by {resident}")]
    DwellingOccupied {
        dwelling: DwellingId,
        resident: HouseholdId,
    },

    #[error("household {household} is not the resident of dwelling {dwelling}")]
    NotResident {
        dwelling:  DwellingId,
        household: HouseholdId,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `msm-*` crates.
pub type MsmResult<T> = Result<T, MsmError>;
