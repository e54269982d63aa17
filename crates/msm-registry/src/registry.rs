//! `EntityRegistry`: the single owner of dwellings, households and persons.
//!
//! # Occupancy links
//!
//! A household lives in at most one dwelling and a dwelling houses at most
//! one household.  The link is stored on both sides (`Household::dwelling`,
//! `Dwelling::resident`) and vacant dwellings are additionally listed in the
//! [`VacancyIndex`] under their region.  Every mutating method below keeps
//! the three in step:
//!
//! ```text
//! resident == None  ⇔  dwelling ∈ vacancy[region(dwelling)]
//! household.dwelling == Some(d)  ⇔  dwelling(d).resident == Some(household)
//! ```
//!
//! [`check_consistency`](EntityRegistry::check_consistency) verifies both
//! properties and is cheap enough to run after every simulated year.
//!
//! Entities live in `BTreeMap`s so that every iteration (event generation,
//! sampling, reporting) visits them in ascending id order.

use std::collections::BTreeMap;
use std::fmt;

use msm_core::{
    DwellingId, Geography, HouseholdId, HouseholdType, IdCounter, MsmError, MsmResult, PersonId,
    RegionId,
};
use tracing::warn;

use crate::{Dwelling, Household, Person, VacancyIndex};

// ── Inconsistency ─────────────────────────────────────────────────────────────

/// One violated occupancy invariant, as reported by
/// [`EntityRegistry::check_consistency`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Inconsistency {
    /// A dwelling names a resident household that does not exist.
    UnknownResident { dwelling: DwellingId, household: HouseholdId },
    /// A dwelling names a resident whose own dwelling reference differs.
    ResidentMismatch {
        dwelling:  DwellingId,
        household: HouseholdId,
        recorded:  Option<DwellingId>,
    },
    /// A household points at a dwelling that does not exist.
    UnknownDwelling { household: HouseholdId, dwelling: DwellingId },
    /// A household points at a dwelling whose resident differs.
    HouseholdMismatch {
        household: HouseholdId,
        dwelling:  DwellingId,
        resident:  Option<HouseholdId>,
    },
    /// A vacant dwelling is missing from the vacancy index.
    VacantNotIndexed(DwellingId),
    /// An occupied dwelling is listed in the vacancy index.
    OccupiedIndexed(DwellingId),
    /// The vacancy index lists a dwelling that is gone or in another region.
    StaleVacancy { dwelling: DwellingId, region: RegionId },
    /// A household member is missing or belongs to another household.
    MemberMismatch { household: HouseholdId, person: PersonId },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::UnknownResident { dwelling, household } => {
                write!(f, "{dwelling} names unknown resident {household}")
            }
            Inconsistency::ResidentMismatch { dwelling, household, recorded } => {
                write!(f, "{dwelling} names resident {household}, which records {recorded:?}")
            }
            Inconsistency::UnknownDwelling { household, dwelling } => {
                write!(f, "{household} lives in unknown {dwelling}")
            }
            Inconsistency::HouseholdMismatch { household, dwelling, resident } => {
                write!(f, "{household} lives in {dwelling}, which records {resident:?}")
            }
            Inconsistency::VacantNotIndexed(d) => write!(f, "vacant {d} missing from vacancy index"),
            Inconsistency::OccupiedIndexed(d) => write!(f, "occupied {d} listed as vacant"),
            Inconsistency::StaleVacancy { dwelling, region } => {
                write!(f, "vacancy index lists {dwelling} under {region}")
            }
            Inconsistency::MemberMismatch { household, person } => {
                write!(f, "{household} lists {person}, which does not belong to it")
            }
        }
    }
}

// ── EntityRegistry ────────────────────────────────────────────────────────────

pub struct EntityRegistry {
    geography:     Geography,
    dwellings:     BTreeMap<DwellingId, Dwelling>,
    households:    BTreeMap<HouseholdId, Household>,
    persons:       BTreeMap<PersonId, Person>,
    vacancy:       VacancyIndex,
    dwelling_ids:  IdCounter,
    household_ids: IdCounter,
    person_ids:    IdCounter,
}

impl EntityRegistry {
    /// An empty registry over `geography`.
    ///
    /// Use [`RegistryBuilder`](crate::RegistryBuilder) to load an initial
    /// population in one validated step.
    pub fn new(geography: Geography) -> Self {
        Self {
            geography,
            dwellings:     BTreeMap::new(),
            households:    BTreeMap::new(),
            persons:       BTreeMap::new(),
            vacancy:       VacancyIndex::new(),
            dwelling_ids:  IdCounter::default(),
            household_ids: IdCounter::default(),
            person_ids:    IdCounter::default(),
        }
    }

    /// Assemble from maps that the builder has already cross-validated.
    pub(crate) fn from_parts(
        geography: Geography,
        dwellings: BTreeMap<DwellingId, Dwelling>,
        households: BTreeMap<HouseholdId, Household>,
        persons: BTreeMap<PersonId, Person>,
    ) -> Self {
        let mut registry = Self::new(geography);
        for (&id, dwelling) in &dwellings {
            registry.dwelling_ids.observe(id.0);
            if dwelling.is_vacant() {
                if let Some(region) = registry.geography.region_of(dwelling.zone) {
                    registry.vacancy.add(id, region);
                }
            }
        }
        for &id in households.keys() {
            registry.household_ids.observe(id.0);
        }
        for &id in persons.keys() {
            registry.person_ids.observe(id.0);
        }
        registry.dwellings = dwellings;
        registry.households = households;
        registry.persons = persons;
        registry
    }

    #[inline]
    pub fn geography(&self) -> &Geography {
        &self.geography
    }

    #[inline]
    pub fn vacancy(&self) -> &VacancyIndex {
        &self.vacancy
    }

    // ── Dwellings ─────────────────────────────────────────────────────────

    #[inline]
    pub fn dwelling(&self, id: DwellingId) -> Option<&Dwelling> {
        self.dwellings.get(&id)
    }

    /// All dwellings, ascending id.
    pub fn dwellings(&self) -> impl Iterator<Item = &Dwelling> + '_ {
        self.dwellings.values()
    }

    pub fn dwelling_ids(&self) -> impl Iterator<Item = DwellingId> + '_ {
        self.dwellings.keys().copied()
    }

    pub fn dwelling_count(&self) -> usize {
        self.dwellings.len()
    }

    /// Region of a dwelling's zone.
    pub fn dwelling_region(&self, id: DwellingId) -> Option<RegionId> {
        self.dwellings.get(&id).and_then(|d| self.geography.region_of(d.zone))
    }

    /// Allocate a fresh dwelling id.  Strictly increasing, never reused.
    pub fn next_dwelling_id(&self) -> DwellingId {
        DwellingId(self.dwelling_ids.next())
    }

    /// Insert a dwelling.
    ///
    /// A vacant dwelling enters the vacancy index.  An occupied one must name
    /// an existing household that is unhoused (or already points at it); the
    /// household's reference is set accordingly.
    ///
    /// # Errors
    /// `DuplicateDwelling`, `ZoneNotFound`, `HouseholdNotFound`, or `Config`
    /// if the named resident already lives elsewhere.
    pub fn add_dwelling(&mut self, dwelling: Dwelling) -> MsmResult<()> {
        let id = dwelling.id;
        if self.dwellings.contains_key(&id) {
            return Err(MsmError::DuplicateDwelling(id));
        }
        let region = self.geography.require_region(dwelling.zone)?;

        match dwelling.resident {
            None => {
                self.vacancy.add(id, region);
            }
            Some(hh) => {
                let household =
                    self.households.get_mut(&hh).ok_or(MsmError::HouseholdNotFound(hh))?;
                match household.dwelling {
                    None => household.dwelling = Some(id),
                    Some(current) if current == id => {}
                    Some(current) => {
                        return Err(MsmError::Config(format!(
                            "{hh} cannot move into new {id}: already lives in {current}"
                        )));
                    }
                }
            }
        }

        self.dwelling_ids.observe(id.0);
        self.dwellings.insert(id, dwelling);
        Ok(())
    }

    /// Remove a dwelling and return it.
    ///
    /// A vacant dwelling is detached from the vacancy index.  If a household
    /// still points at the dwelling, that reference is cleared; the caller is
    /// responsible for rehousing or removing it.
    pub fn remove_dwelling(&mut self, id: DwellingId) -> Option<Dwelling> {
        let dwelling = self.dwellings.remove(&id)?;
        match dwelling.resident {
            None => {
                if let Some(region) = self.geography.region_of(dwelling.zone) {
                    self.vacancy.remove(id, region);
                }
            }
            Some(hh) => {
                if let Some(household) = self.households.get_mut(&hh) {
                    if household.dwelling == Some(id) {
                        household.dwelling = None;
                    }
                }
            }
        }
        Some(dwelling)
    }

    pub fn set_dwelling_price(&mut self, id: DwellingId, price: u32) -> MsmResult<()> {
        let dwelling = self.dwellings.get_mut(&id).ok_or(MsmError::DwellingNotFound(id))?;
        dwelling.price = price;
        Ok(())
    }

    pub fn set_dwelling_quality(&mut self, id: DwellingId, quality: u8) -> MsmResult<()> {
        let dwelling = self.dwellings.get_mut(&id).ok_or(MsmError::DwellingNotFound(id))?;
        dwelling.quality = quality;
        Ok(())
    }

    // ── Households ────────────────────────────────────────────────────────

    #[inline]
    pub fn household(&self, id: HouseholdId) -> Option<&Household> {
        self.households.get(&id)
    }

    /// All households, ascending id.
    pub fn households(&self) -> impl Iterator<Item = &Household> + '_ {
        self.households.values()
    }

    pub fn household_ids(&self) -> impl Iterator<Item = HouseholdId> + '_ {
        self.households.keys().copied()
    }

    pub fn household_count(&self) -> usize {
        self.households.len()
    }

    /// Allocate a fresh household id.  Strictly increasing, never reused.
    pub fn next_household_id(&self) -> HouseholdId {
        HouseholdId(self.household_ids.next())
    }

    /// Insert a household together with its members.
    ///
    /// `household.members` is rebuilt from `persons` in the given order.  If
    /// `household.dwelling` is set, that dwelling must exist and be vacant;
    /// it is occupied and leaves the vacancy index.
    ///
    /// # Errors
    /// `DuplicateHousehold`, `DuplicatePerson`, `DwellingNotFound`,
    /// `DwellingOccupied`, or `Config` if a person names another household.
    pub fn add_household(&mut self, mut household: Household, persons: Vec<Person>) -> MsmResult<()> {
        let id = household.id;
        if self.households.contains_key(&id) {
            return Err(MsmError::DuplicateHousehold(id));
        }
        for (i, person) in persons.iter().enumerate() {
            if self.persons.contains_key(&person.id)
                || persons[..i].iter().any(|p| p.id == person.id)
            {
                return Err(MsmError::DuplicatePerson(person.id));
            }
            if person.household != id {
                return Err(MsmError::Config(format!(
                    "{} belongs to {}, not {id}",
                    person.id, person.household
                )));
            }
        }
        if let Some(d) = household.dwelling {
            let dwelling = self.dwellings.get(&d).ok_or(MsmError::DwellingNotFound(d))?;
            if let Some(resident) = dwelling.resident {
                return Err(MsmError::DwellingOccupied { dwelling: d, resident });
            }
        }

        household.members = persons.iter().map(|p| p.id).collect();
        for person in persons {
            self.person_ids.observe(person.id.0);
            self.persons.insert(person.id, person);
        }
        if let Some(d) = household.dwelling {
            self.occupy(d, id);
        }
        self.household_ids.observe(id.0);
        self.households.insert(id, household);
        Ok(())
    }

    /// Remove a household and its members.
    ///
    /// The dwelling it occupied becomes vacant and re-enters the vacancy
    /// index.  Returns `None` if the household does not exist.
    pub fn remove_household(&mut self, id: HouseholdId) -> Option<(Household, Vec<Person>)> {
        let household = self.households.remove(&id)?;
        let persons = household
            .members
            .iter()
            .filter_map(|p| self.persons.remove(p))
            .collect();
        if let Some(d) = household.dwelling {
            self.vacate(d, id);
        }
        Some((household, persons))
    }

    /// Atomically move `household` from `old` into `new`.
    ///
    /// Everything is validated before anything changes.  `old = None` skips
    /// the vacate step; this is used for in-migrants and for residents of a
    /// dwelling that is about to be demolished.
    ///
    /// # Errors
    /// `HouseholdNotFound`, `DwellingNotFound` (for `new` or `old`),
    /// `NotResident` if `household` does not live in `old`, or
    /// `DwellingOccupied` if `new` already has a resident.
    pub fn relocate_household(
        &mut self,
        household: HouseholdId,
        old: Option<DwellingId>,
        new: DwellingId,
    ) -> MsmResult<()> {
        if !self.households.contains_key(&household) {
            return Err(MsmError::HouseholdNotFound(household));
        }
        let target = self.dwellings.get(&new).ok_or(MsmError::DwellingNotFound(new))?;
        if let Some(resident) = target.resident {
            return Err(MsmError::DwellingOccupied { dwelling: new, resident });
        }
        if let Some(o) = old {
            let previous = self.dwellings.get(&o).ok_or(MsmError::DwellingNotFound(o))?;
            if previous.resident != Some(household) {
                return Err(MsmError::NotResident { dwelling: o, household });
            }
        }

        if let Some(o) = old {
            self.vacate(o, household);
        }
        self.occupy(new, household);
        if let Some(h) = self.households.get_mut(&household) {
            h.dwelling = Some(new);
        }
        Ok(())
    }

    /// Mark `dwelling` vacant if `household` is its resident.
    fn vacate(&mut self, dwelling: DwellingId, household: HouseholdId) {
        let Some(d) = self.dwellings.get_mut(&dwelling) else {
            warn!(%dwelling, %household, "Consistency error: vacating unknown dwelling");
            return;
        };
        if d.resident != Some(household) {
            warn!(%dwelling, %household, resident = ?d.resident,
                  "Consistency error: household is not the resident");
            return;
        }
        d.resident = None;
        if let Some(region) = self.geography.region_of(d.zone) {
            self.vacancy.add(dwelling, region);
        }
    }

    /// Set `household` as the resident of a vacant `dwelling`.
    fn occupy(&mut self, dwelling: DwellingId, household: HouseholdId) {
        let Some(d) = self.dwellings.get_mut(&dwelling) else {
            return;
        };
        d.resident = Some(household);
        if let Some(region) = self.geography.region_of(d.zone) {
            self.vacancy.remove(dwelling, region);
        }
    }

    // ── Persons ───────────────────────────────────────────────────────────

    #[inline]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// All persons, ascending id.
    pub fn persons(&self) -> impl Iterator<Item = &Person> + '_ {
        self.persons.values()
    }

    /// Members of `household` in member order; empty for an unknown household.
    pub fn persons_of(&self, household: HouseholdId) -> impl Iterator<Item = &Person> + '_ {
        self.households
            .get(&household)
            .into_iter()
            .flat_map(|h| h.members.iter())
            .filter_map(|p| self.persons.get(p))
    }

    /// Total population.
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Allocate a fresh person id.  Strictly increasing, never reused.
    pub fn next_person_id(&self) -> PersonId {
        PersonId(self.person_ids.next())
    }

    // ── Derived household attributes ──────────────────────────────────────

    pub fn household_size(&self, id: HouseholdId) -> Option<usize> {
        self.households.get(&id).map(Household::size)
    }

    /// Sum of member incomes.
    pub fn household_income(&self, id: HouseholdId) -> Option<u32> {
        let household = self.households.get(&id)?;
        Some(
            household
                .members
                .iter()
                .filter_map(|p| self.persons.get(p))
                .fold(0u32, |acc, p| acc.saturating_add(p.income)),
        )
    }

    pub fn household_type(&self, id: HouseholdId) -> Option<HouseholdType> {
        let size = self.household_size(id)?;
        let income = self.household_income(id)?;
        Some(HouseholdType::classify(size, income))
    }

    // ── Consistency ───────────────────────────────────────────────────────

    /// Every violated occupancy invariant, sorted.  Empty when consistent.
    pub fn check_consistency(&self) -> Vec<Inconsistency> {
        let mut issues = Vec::new();

        for (&id, dwelling) in &self.dwellings {
            let region = self.geography.region_of(dwelling.zone);
            let indexed = region.is_some_and(|r| self.vacancy.contains(id, r));
            match dwelling.resident {
                None => {
                    if !indexed {
                        issues.push(Inconsistency::VacantNotIndexed(id));
                    }
                }
                Some(hh) => {
                    if indexed {
                        issues.push(Inconsistency::OccupiedIndexed(id));
                    }
                    match self.households.get(&hh) {
                        None => issues.push(Inconsistency::UnknownResident {
                            dwelling:  id,
                            household: hh,
                        }),
                        Some(h) if h.dwelling != Some(id) => {
                            issues.push(Inconsistency::ResidentMismatch {
                                dwelling:  id,
                                household: hh,
                                recorded:  h.dwelling,
                            });
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        for (&id, household) in &self.households {
            if let Some(d) = household.dwelling {
                match self.dwellings.get(&d) {
                    None => issues.push(Inconsistency::UnknownDwelling { household: id, dwelling: d }),
                    Some(dw) if dw.resident != Some(id) => {
                        issues.push(Inconsistency::HouseholdMismatch {
                            household: id,
                            dwelling:  d,
                            resident:  dw.resident,
                        });
                    }
                    Some(_) => {}
                }
            }
            for &p in &household.members {
                if self.persons.get(&p).is_none_or(|person| person.household != id) {
                    issues.push(Inconsistency::MemberMismatch { household: id, person: p });
                }
            }
        }

        for (region, dwelling) in self.vacancy.entries() {
            let in_place = self
                .dwellings
                .get(&dwelling)
                .is_some_and(|d| self.geography.region_of(d.zone) == Some(region));
            if !in_place {
                issues.push(Inconsistency::StaleVacancy { dwelling, region });
            }
        }

        issues.sort();
        issues
    }
}
