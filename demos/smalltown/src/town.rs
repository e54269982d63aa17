//! Synthetic base-year population for the smalltown demo.
//!
//! Four zones in two regions: an older, cheaper centre (zones 1 and 2,
//! region 1) and a newer suburb (zones 3 and 4, region 2).  Roughly one in
//! twelve dwellings starts vacant.

use msm_choice::ZoneAccessibility;
use msm_core::{
    DwellingId, DwellingType, Gender, Geography, HouseholdId, PersonId, PersonRole, Race,
    RegionId, SimRng, Year, ZoneId,
};
use msm_registry::{Dwelling, EntityRegistry, Household, Person, RegistryBuilder};

/// Share of dwellings left vacant in the base year.
const VACANCY_SHARE: f64 = 0.08;

pub const ZONES: [(ZoneId, RegionId); 4] = [
    (ZoneId(1), RegionId(1)),
    (ZoneId(2), RegionId(1)),
    (ZoneId(3), RegionId(2)),
    (ZoneId(4), RegionId(2)),
];

/// Auto and transit accessibility per zone; the centre is better served by
/// transit, the suburb by road.
pub fn accessibility() -> ZoneAccessibility {
    [
        (ZoneId(1), 70.0, 90.0),
        (ZoneId(2), 75.0, 70.0),
        (ZoneId(3), 90.0, 35.0),
        (ZoneId(4), 85.0, 20.0),
    ]
    .into_iter()
    .collect()
}

/// Build `dwellings` dwellings and enough households to fill all but
/// `VACANCY_SHARE` of them.
pub fn build_town(dwellings: u32, base_year: Year, seed: u64) -> anyhow::Result<EntityRegistry> {
    let mut rng = SimRng::new(seed);
    let geography = Geography::from_pairs(ZONES)?;

    let mut stock = Vec::with_capacity(dwellings as usize);
    for id in 0..dwellings {
        let (zone, _) = ZONES[id as usize % ZONES.len()];
        let suburb = zone.0 >= 3;
        let kind = if suburb {
            *rng.choose(&[DwellingType::Sfd, DwellingType::Sfd, DwellingType::Sfa, DwellingType::Mh])
                .unwrap_or(&DwellingType::Sfd)
        } else {
            *rng.choose(&[DwellingType::Mf234, DwellingType::Mf5plus, DwellingType::Sfa])
                .unwrap_or(&DwellingType::Mf234)
        };
        let bedrooms: u8 = rng.gen_range(1..=4);
        let quality: u8 = rng.gen_range(1..=4);
        let age: i32 = if suburb { rng.gen_range(0..40) } else { rng.gen_range(20..100) };
        let price = 400 + 250 * u32::from(bedrooms) + 150 * u32::from(quality) + rng.gen_range(0..300);
        let mut d = Dwelling::new(DwellingId(id), zone, kind, bedrooms, quality, price, base_year.offset(-age));
        d.restricted = !suburb && rng.gen_bool(0.05);
        stock.push(d);
    }

    let mut households = Vec::new();
    let mut persons = Vec::new();
    let mut next_person = 0u32;
    for dwelling in stock.iter_mut() {
        if rng.gen_bool(VACANCY_SHARE) {
            continue;
        }
        let hh = HouseholdId(households.len() as u32);
        let size: u32 = rng.gen_range(1..=5);
        let earner_income: u32 = rng.gen_range(8_000..120_000);
        let mut members = Vec::with_capacity(size as usize);
        for k in 0..size {
            let pid = PersonId(next_person);
            next_person += 1;
            let (age, role) = match (k, size) {
                (0, 1) => (rng.gen_range(20..85), PersonRole::Single),
                (0, _) | (1, _) => (rng.gen_range(25..70), PersonRole::Married),
                _ => (rng.gen_range(0..18), PersonRole::Child),
            };
            let gender = if rng.gen_bool(0.5) { Gender::Female } else { Gender::Male };
            let race = *rng.choose(&[Race::White, Race::Black, Race::Hispanic, Race::Other])
                .unwrap_or(&Race::White);
            let mut p = Person::new(pid, hh, age, gender, race, role);
            if k == 0 {
                p.income = earner_income;
            }
            members.push(pid);
            persons.push(p);
        }
        dwelling.resident = Some(hh);
        households.push(Household { id: hh, members, dwelling: Some(dwelling.id) });
    }

    Ok(RegistryBuilder::new()
        .geography(geography)
        .dwellings(stock)
        .households(households)
        .persons(persons)
        .build()?)
}
