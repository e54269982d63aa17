//! Unit tests for msm-choice.

#[cfg(test)]
mod helpers {
    use msm_core::{
        DwellingId, DwellingType, Gender, Geography, HouseholdId, HouseholdType, PersonId,
        PersonRole, Race, RegionId, Year, ZoneId,
    };
    use msm_market::{MarketAggregator, RentByIncome};
    use msm_registry::{Dwelling, EntityRegistry, Household, Person, RegistryBuilder};

    use crate::{ScoringStrategy, UtilityInputs};

    /// Scores only on quality; only top-quality dwellings get any weight.
    pub struct TopQualityOnly;

    impl ScoringStrategy for TopQualityOnly {
        fn dwelling_utility(&self, _ht: HouseholdType, inputs: &UtilityInputs) -> f64 {
            inputs.quality
        }
        fn selection_probability(&self, utility: f64) -> f64 {
            if utility >= 1.0 { 1.0 } else { 0.0 }
        }
        fn demolition_probability(&self, _d: &Dwelling, _y: Year) -> f64 {
            0.0
        }
    }

    /// Returns a fixed probability for every candidate.
    pub struct Flat(pub f64);

    impl ScoringStrategy for Flat {
        fn dwelling_utility(&self, _ht: HouseholdType, _inputs: &UtilityInputs) -> f64 {
            1.0
        }
        fn selection_probability(&self, _utility: f64) -> f64 {
            self.0
        }
        fn demolition_probability(&self, _d: &Dwelling, _y: Year) -> f64 {
            0.0
        }
    }

    pub fn person(id: u32, household: u32, income: u32) -> Person {
        let mut p = Person::new(
            PersonId(id),
            HouseholdId(household),
            30,
            Gender::Female,
            Race::Black,
            PersonRole::Single,
        );
        p.income = income;
        p
    }

    /// Two regions (zone 1 → region 1, zone 2 → region 2).
    ///
    /// Household 0 (low income, 1 person) lives in dwelling 0.
    /// Household 1 (very high income, 1 person) lives in dwelling 1.
    /// Dwellings 2..2+vacant_per_region are vacant in region 1, the next
    /// `vacant_per_region` in region 2.  All vacant dwellings have quality 2
    /// except the last one, which has quality 4.
    pub fn fixture(vacant_per_region: u32) -> EntityRegistry {
        let geography =
            Geography::from_pairs([(ZoneId(1), RegionId(1)), (ZoneId(2), RegionId(2))]).unwrap();
        let mk = |id: u32, zone: u32, quality: u8| {
            Dwelling::new(DwellingId(id), ZoneId(zone), DwellingType::Mf234, 2, quality, 800, Year(1990))
        };
        let mut d0 = mk(0, 1, 2);
        d0.resident = Some(HouseholdId(0));
        let mut d1 = mk(1, 2, 2);
        d1.resident = Some(HouseholdId(1));
        let mut dwellings = vec![d0, d1];
        let last = 2 + 2 * vacant_per_region - 1;
        for i in 0..2 * vacant_per_region {
            let id = 2 + i;
            let zone = if i < vacant_per_region { 1 } else { 2 };
            dwellings.push(mk(id, zone, if id == last { 4 } else { 2 }));
        }
        RegistryBuilder::new()
            .geography(geography)
            .dwellings(dwellings)
            .households([
                Household { id: HouseholdId(0), members: vec![PersonId(0)], dwelling: Some(DwellingId(0)) },
                Household { id: HouseholdId(1), members: vec![PersonId(1)], dwelling: Some(DwellingId(1)) },
            ])
            .persons([person(0, 0, 10_000), person(1, 1, 90_000)])
            .build()
            .unwrap()
    }

    pub fn statistics(registry: &EntityRegistry) -> (MarketAggregator, RentByIncome) {
        let mut market = MarketAggregator::new(4);
        market.update(registry);
        (market, RentByIncome::from_registry(registry))
    }
}

#[cfg(test)]
mod search {
    use msm_core::{DwellingId, HouseholdId, MsmError, SimRng};

    use super::helpers::{Flat, TopQualityOnly, fixture, statistics};
    use crate::{
        ChoiceContext, ChoiceError, LinearScoring, LinearScoringConfig, RelocationSearch,
        SearchConfig, UniformAccessibility, move_household,
    };

    #[test]
    fn empty_candidate_set_returns_none() {
        let reg = fixture(0);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        let strategy = Flat(1.0);
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let search = RelocationSearch::default();
        let mut rng = SimRng::new(1);
        assert_eq!(search.search_for_new_dwelling(HouseholdId(0), &ctx, &mut rng).unwrap(), None);
    }

    #[test]
    fn unknown_household_is_an_error() {
        let reg = fixture(2);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        let strategy = Flat(1.0);
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let err = RelocationSearch::default()
            .search_for_new_dwelling(HouseholdId(99), &ctx, &mut SimRng::new(1))
            .unwrap_err();
        assert!(matches!(err, ChoiceError::Registry(MsmError::HouseholdNotFound(_))));
    }

    #[test]
    fn zero_weights_return_none() {
        let reg = fixture(3);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        for strategy in [Flat(0.0), Flat(-1.0), Flat(f64::NAN)] {
            let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
            let chosen = RelocationSearch::default()
                .search_for_new_dwelling(HouseholdId(0), &ctx, &mut SimRng::new(4))
                .unwrap();
            assert_eq!(chosen, None);
        }
    }

    #[test]
    fn only_positive_weight_is_chosen() {
        let reg = fixture(3);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &TopQualityOnly);
        let search = RelocationSearch::default();
        for seed in 0..20 {
            let chosen = search
                .search_for_new_dwelling(HouseholdId(0), &ctx, &mut SimRng::new(seed))
                .unwrap();
            assert_eq!(chosen, Some(DwellingId(7)));
        }
    }

    #[test]
    fn samples_per_region_caps_candidates() {
        let reg = fixture(10);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        let strategy = Flat(1.0);
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let search = RelocationSearch::new(SearchConfig { samples_per_region: 4, ..Default::default() });
        let ht = reg.household_type(HouseholdId(0)).unwrap();
        let candidates = search.candidates(ht, &ctx, &mut SimRng::new(9));
        assert_eq!(candidates.len(), 8);
        let mut unique = candidates.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 8, "sampling is without replacement");
        // Region 1 candidates come first.
        assert!(candidates[..4].iter().all(|d| d.0 < 12));
        assert!(candidates[4..].iter().all(|d| d.0 >= 12));
    }

    #[test]
    fn restricted_dwellings_only_for_low_income() {
        let mut reg = fixture(1);
        // Rebuild with the two vacant dwellings restricted.
        let restricted: Vec<_> = reg
            .dwellings()
            .filter(|d| d.is_vacant())
            .map(|d| {
                let mut d = d.clone();
                d.restricted = true;
                d
            })
            .collect();
        for d in &restricted {
            reg.remove_dwelling(d.id);
        }
        for d in restricted {
            reg.add_dwelling(d).unwrap();
        }
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility::default();
        let strategy = Flat(1.0);
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let search = RelocationSearch::default();
        let mut rng = SimRng::new(2);
        assert!(search.search_for_new_dwelling(HouseholdId(0), &ctx, &mut rng).unwrap().is_some());
        assert_eq!(search.search_for_new_dwelling(HouseholdId(1), &ctx, &mut rng).unwrap(), None);
    }

    #[test]
    fn same_seed_same_choice() {
        let reg = fixture(15);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility { auto: 50.0, transit: 20.0 };
        let strategy = LinearScoring::new(LinearScoringConfig::default(), 4).unwrap();
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let search = RelocationSearch::new(SearchConfig { samples_per_region: 5, ..Default::default() });
        let run = |seed| {
            let mut rng = SimRng::new(seed);
            (0..10)
                .map(|_| search.search_for_new_dwelling(HouseholdId(0), &ctx, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn utility_inputs_are_in_unit_interval() {
        let reg = fixture(2);
        let (market, rents) = statistics(&reg);
        let access = UniformAccessibility { auto: 500.0, transit: -3.0 };
        let strategy = Flat(1.0);
        let ctx = ChoiceContext::new(&reg, &market, &rents, &access, &strategy);
        let search = RelocationSearch::default();
        let ht = reg.household_type(HouseholdId(1)).unwrap();
        for d in reg.dwellings() {
            let u = search.utility_inputs(ht, d, &ctx);
            for v in [u.size, u.price, u.regional_price, u.quality, u.auto_access, u.transit_access] {
                assert!((0.0..=1.0).contains(&v), "{u:?}");
            }
            assert_eq!(u.auto_access, 1.0);
            assert_eq!(u.transit_access, 0.0);
            assert_eq!(u.regional_price, 0.5, "every dwelling is at the cell average");
        }
    }

    #[test]
    fn move_household_updates_registry() {
        let mut reg = fixture(1);
        move_household(&mut reg, HouseholdId(0), Some(DwellingId(0)), DwellingId(2)).unwrap();
        assert_eq!(reg.household(HouseholdId(0)).unwrap().dwelling, Some(DwellingId(2)));
        assert!(reg.dwelling(DwellingId(0)).unwrap().is_vacant());
        assert!(reg.check_consistency().is_empty());

        let err = move_household(&mut reg, HouseholdId(1), None, DwellingId(2)).unwrap_err();
        assert!(matches!(err, ChoiceError::Registry(MsmError::DwellingOccupied { .. })));
    }
}

#[cfg(test)]
mod linear {
    use msm_core::{
        DwellingId, DwellingType, HouseholdSize, HouseholdType, IncomeCategory, Year, ZoneId,
    };
    use msm_registry::Dwelling;

    use crate::{
        ChoiceError, ComponentWeights, LinearScoring, LinearScoringConfig, ScoringStrategy,
        SegmentWeights, UtilityInputs,
    };

    fn ht(size: HouseholdSize, income: IncomeCategory) -> HouseholdType {
        HouseholdType { size, income }
    }

    #[test]
    fn weighted_mean_utility() {
        let weights = ComponentWeights {
            size: 1.0,
            price: 3.0,
            regional_price: 0.0,
            quality: 0.0,
            auto_access: 0.0,
            transit_access: 0.0,
        };
        let inputs = UtilityInputs { size: 1.0, price: 0.0, ..Default::default() };
        assert_eq!(weights.combine(&inputs), 0.25);
        let zero = ComponentWeights { size: 0.0, price: 0.0, ..weights };
        assert_eq!(zero.combine(&inputs), 0.0);
    }

    #[test]
    fn first_matching_segment_wins() {
        let low = ComponentWeights { price: 9.0, ..Default::default() };
        let big = ComponentWeights { size: 9.0, ..Default::default() };
        let config = LinearScoringConfig {
            segments: vec![
                SegmentWeights { size: None, income: Some(IncomeCategory::Low), weights: low },
                SegmentWeights { size: Some(HouseholdSize::FourPlus), income: None, weights: big },
            ],
            ..Default::default()
        };
        let scoring = LinearScoring::new(config, 4).unwrap();
        assert_eq!(scoring.weights_for(ht(HouseholdSize::FourPlus, IncomeCategory::Low)), &low);
        assert_eq!(scoring.weights_for(ht(HouseholdSize::FourPlus, IncomeCategory::High)), &big);
        assert_eq!(
            scoring.weights_for(ht(HouseholdSize::One, IncomeCategory::High)),
            &ComponentWeights::default()
        );
    }

    #[test]
    fn selection_probability_shape() {
        let scoring = LinearScoring::new(LinearScoringConfig::default(), 4).unwrap();
        assert_eq!(scoring.selection_probability(0.0), 0.0);
        assert_eq!(scoring.selection_probability(-5.0), 0.0);
        let p = scoring.selection_probability(1.0);
        assert!((p - (1.0 - (-3.0f64).exp())).abs() < 1e-12);
        assert!(scoring.selection_probability(0.5) < p);
    }

    #[test]
    fn demolition_probability_grows_with_age_and_low_quality() {
        let scoring = LinearScoring::new(LinearScoringConfig::default(), 4).unwrap();
        let mut d = Dwelling::new(DwellingId(0), ZoneId(0), DwellingType::Sfd, 3, 4, 1000, Year(2000));
        let young = scoring.demolition_probability(&d, Year(2010));
        assert!((young - 0.001).abs() < 1e-12);
        let old = scoring.demolition_probability(&d, Year(2080));
        assert!(old > young);
        d.quality = 1;
        assert!(scoring.demolition_probability(&d, Year(2010)) > young);
        // Capped.
        assert!(scoring.demolition_probability(&d, Year(3000)) <= 0.05);
    }

    #[test]
    fn invalid_configs_rejected() {
        let negative = LinearScoringConfig {
            weights: ComponentWeights { quality: -1.0, ..Default::default() },
            ..Default::default()
        };
        assert!(matches!(LinearScoring::new(negative, 4), Err(ChoiceError::Config(_))));

        let flat = LinearScoringConfig { selection_sensitivity: 0.0, ..Default::default() };
        assert!(matches!(LinearScoring::new(flat, 4), Err(ChoiceError::Config(_))));
    }

    #[test]
    fn deserialises_partial_json() {
        let json = r#"{
            "weights": { "price": 2.0 },
            "segments": [ { "income": "low", "weights": { "price": 4.0 } } ],
            "demolition": { "age_threshold": 60 }
        }"#;
        let config: LinearScoringConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.weights.price, 2.0);
        assert_eq!(config.weights.size, 1.0);
        assert_eq!(config.segments[0].income, Some(IncomeCategory::Low));
        assert_eq!(config.segments[0].size, None);
        assert_eq!(config.demolition.age_threshold, 60);
        assert_eq!(config.selection_sensitivity, 3.0);
    }
}

#[cfg(test)]
mod accessibility {
    use msm_core::ZoneId;

    use crate::{Accessibility, UniformAccessibility, ZoneAccessibility};

    #[test]
    fn zone_table_lookup() {
        let table: ZoneAccessibility =
            [(ZoneId(1), 40.0, 10.0), (ZoneId(2), 80.0, 5.0)].into_iter().collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.auto_accessibility(ZoneId(2)), 80.0);
        assert_eq!(table.transit_accessibility(ZoneId(1)), 10.0);
        assert_eq!(table.auto_accessibility(ZoneId(9)), 0.0);
    }

    #[test]
    fn uniform_everywhere() {
        let u = UniformAccessibility { auto: 3.0, transit: 1.0 };
        assert_eq!(u.auto_accessibility(ZoneId(0)), 3.0);
        assert_eq!(u.transit_accessibility(ZoneId(123)), 1.0);
    }
}
