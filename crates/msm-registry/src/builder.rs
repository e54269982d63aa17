//! Fluent builder that loads an initial population into an `EntityRegistry`.
//!
//! # Usage
//!
//! ```rust
//! use msm_core::{DwellingId, DwellingType, Geography, RegionId, Year, ZoneId};
//! use msm_registry::{Dwelling, RegistryBuilder};
//!
//! let geography = Geography::from_pairs([(ZoneId(1), RegionId(1))]).unwrap();
//! let registry = RegistryBuilder::new()
//!     .geography(geography)
//!     .dwellings(vec![Dwelling::new(
//!         DwellingId(0), ZoneId(1), DwellingType::Sfd, 3, 2, 900, Year(1990),
//!     )])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.vacancy().total(), 1);
//! ```
//!
//! All cross references are validated in `build()`: zones, household member
//! lists against person back-references, and occupancy links in both
//! directions.  Vacant dwellings are identified once, there.

use std::collections::BTreeMap;

use msm_core::{DwellingId, Geography, HouseholdId, MsmError, MsmResult, PersonId};

use crate::{Dwelling, EntityRegistry, Household, Person};

#[derive(Default)]
pub struct RegistryBuilder {
    geography:  Geography,
    dwellings:  Vec<Dwelling>,
    households: Vec<Household>,
    persons:    Vec<Person>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geography(mut self, geography: Geography) -> Self {
        self.geography = geography;
        self
    }

    /// Append dwellings.  May be called repeatedly.
    pub fn dwellings(mut self, dwellings: impl IntoIterator<Item = Dwelling>) -> Self {
        self.dwellings.extend(dwellings);
        self
    }

    /// Append households.  `members` must list every person whose
    /// `household` field names the household.
    pub fn households(mut self, households: impl IntoIterator<Item = Household>) -> Self {
        self.households.extend(households);
        self
    }

    pub fn persons(mut self, persons: impl IntoIterator<Item = Person>) -> Self {
        self.persons.extend(persons);
        self
    }

    /// Validate every reference and construct the registry.
    pub fn build(self) -> MsmResult<EntityRegistry> {
        let mut persons: BTreeMap<PersonId, Person> = BTreeMap::new();
        for person in self.persons {
            let id = person.id;
            if persons.insert(id, person).is_some() {
                return Err(MsmError::DuplicatePerson(id));
            }
        }

        let mut households: BTreeMap<HouseholdId, Household> = BTreeMap::new();
        for household in self.households {
            let id = household.id;
            for (i, &p) in household.members.iter().enumerate() {
                if household.members[..i].contains(&p) {
                    return Err(MsmError::DuplicatePerson(p));
                }
                let person = persons.get(&p).ok_or(MsmError::PersonNotFound(p))?;
                if person.household != id {
                    return Err(MsmError::Config(format!(
                        "{id} lists {p}, which belongs to {}",
                        person.household
                    )));
                }
            }
            if households.insert(id, household).is_some() {
                return Err(MsmError::DuplicateHousehold(id));
            }
        }
        for person in persons.values() {
            let household = households
                .get(&person.household)
                .ok_or(MsmError::HouseholdNotFound(person.household))?;
            if !household.members.contains(&person.id) {
                return Err(MsmError::Config(format!(
                    "{} names {} but is not among its members",
                    person.id, person.household
                )));
            }
        }

        let mut dwellings: BTreeMap<DwellingId, Dwelling> = BTreeMap::new();
        for dwelling in self.dwellings {
            let id = dwelling.id;
            self.geography.require_region(dwelling.zone)?;
            if let Some(hh) = dwelling.resident {
                let household = households.get(&hh).ok_or(MsmError::HouseholdNotFound(hh))?;
                if household.dwelling != Some(id) {
                    return Err(MsmError::Config(format!(
                        "{id} names resident {hh}, which records {:?}",
                        household.dwelling
                    )));
                }
            }
            if dwellings.insert(id, dwelling).is_some() {
                return Err(MsmError::DuplicateDwelling(id));
            }
        }
        for household in households.values() {
            if let Some(d) = household.dwelling {
                let dwelling = dwellings.get(&d).ok_or(MsmError::DwellingNotFound(d))?;
                if dwelling.resident != Some(household.id) {
                    return Err(MsmError::Config(format!(
                        "{} lives in {d}, which records {:?}",
                        household.id, dwelling.resident
                    )));
                }
            }
        }

        Ok(EntityRegistry::from_parts(self.geography, dwellings, households, persons))
    }
}
