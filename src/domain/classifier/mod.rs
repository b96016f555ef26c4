//! Station classification policy.
//!
//! The policy is an ordered list of [`Rule`]s evaluated against
//! [`StationFacts`]; the first rule that emits or ignores wins. The
//! classifier never performs I/O. When the next rule needs a fact that has
//! not been gathered it answers [`Decision::Needs`], the caller fetches
//! that fact and asks again. Gathering in this order means no oracle is
//! consulted for a station an earlier rule already settled.

mod config;
mod facts;
mod rules;

pub use config::{ClassifierConfig, Providers, Thresholds};
pub use facts::{Fact, StationFacts};
pub use rules::{Rule, Verdict};

use super::result::ClassificationResult;

/// Result of asking the classifier about a station.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Gather this fact and classify again.
    Needs(Fact),
    /// Classification finished. `result` is `None` for ignored stations.
    Done {
        rule: Rule,
        result: Option<ClassificationResult>,
    },
}

/// Applies the decision policy to gathered station facts.
#[derive(Debug, Clone)]
pub struct StationClassifier {
    config: ClassifierConfig,
    rules: Vec<Rule>,
}

impl StationClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            rules: Rule::ORDER.to_vec(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate rules in order against `facts`.
    pub fn classify(&self, facts: &StationFacts) -> Decision {
        for &rule in &self.rules {
            match rule.evaluate(facts, &self.config) {
                Ok(Verdict::Pass) => continue,
                Ok(Verdict::Emit(result)) => {
                    return Decision::Done {
                        rule,
                        result: Some(result),
                    }
                }
                Ok(Verdict::Ignore) => return Decision::Done { rule, result: None },
                Err(fact) => return Decision::Needs(fact),
            }
        }
        Decision::Done {
            rule: Rule::Fallback,
            result: None,
        }
    }
}

impl Default for StationClassifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::{Category, ClassificationResult};
    use crate::testkit::domain::{bundle_with, bundle_of, route, FactsBuilder};

    fn classify(facts: &StationFacts) -> (Rule, Option<ClassificationResult>) {
        match StationClassifier::default().classify(facts) {
            Decision::Done { rule, result } => (rule, result),
            Decision::Needs(fact) => panic!("unexpectedly needs {fact:?}"),
        }
    }

    fn category(facts: &StationFacts) -> Option<Category> {
        classify(facts).1.map(|r| r.category())
    }

    /// Mainland station in the public-courier band unless overridden.
    fn base() -> FactsBuilder {
        FactsBuilder::new(bundle_of(60_001_000, 10))
            .security(0.9)
            .totals(150_000_000.0, 160_000_000.0, 50_000.0)
            .mainland(true)
            .routes(vec![route("Jita", 10), route("Amarr", 12)])
    }

    // -- fact gathering order --------------------------------------------

    #[test]
    fn asks_for_location_first_for_npc_station() {
        let facts = StationFacts::new(bundle_of(60_001_000, 3));
        let decision = StationClassifier::default().classify(&facts);
        assert_eq!(decision, Decision::Needs(Fact::Location));
    }

    #[test]
    fn structures_need_only_an_appraisal_link() {
        let facts = StationFacts::new(bundle_of(1_035_000_000_000, 3));
        let decision = StationClassifier::default().classify(&facts);
        assert_eq!(decision, Decision::Needs(Fact::AppraisalLink));
    }

    #[test]
    fn fitted_ship_lookup_only_with_singletons() {
        let facts = FactsBuilder::new(bundle_of(60_001_000, 3)).security(0.9).build();
        let decision = StationClassifier::default().classify(&facts);
        assert_eq!(decision, Decision::Needs(Fact::Valuation));

        let facts = FactsBuilder::new(bundle_with(60_001_000, vec![(587, 1, true)]))
            .security(0.9)
            .build();
        let decision = StationClassifier::default().classify(&facts);
        assert_eq!(decision, Decision::Needs(Fact::FittedShip));
    }

    #[test]
    fn islands_never_ask_for_routes() {
        let facts = FactsBuilder::new(bundle_of(60_001_000, 3))
            .security(0.9)
            .totals(1.0, 1.0, 1.0)
            .mainland(false)
            .build();
        assert_eq!(classify(&facts), (Rule::Island, None));
    }

    #[test]
    fn mainland_asks_for_routes_after_valuation() {
        let facts = FactsBuilder::new(bundle_of(60_001_000, 3))
            .security(0.9)
            .totals(1.0, 1.0, 1.0)
            .mainland(true)
            .build();
        let decision = StationClassifier::default().classify(&facts);
        assert_eq!(decision, Decision::Needs(Fact::Routes));
    }

    // -- screening rules ---------------------------------------------------

    #[test]
    fn structure_is_a_problem_with_appraisal_link() {
        let facts = FactsBuilder::new(bundle_of(61_000_001, 3))
            .appraisal_link("https://appraisal.example/a/XYZ")
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::OutOfNpcRange);
        let Some(ClassificationResult::Problem { message }) = result else {
            panic!("expected problem");
        };
        assert!(message.contains("not in NPC station ID range"));
        assert!(message.contains("61000001"));
        assert!(message.contains("https://appraisal.example/a/XYZ"));
    }

    #[test]
    fn upper_npc_id_is_inclusive() {
        let facts = base().station(61_000_000).build();
        assert_ne!(classify(&facts).0, Rule::OutOfNpcRange);
    }

    #[test]
    fn lowsec_is_a_problem() {
        let facts = base().security(0.44).build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::NotHighsec);
        let Some(ClassificationResult::Problem { message }) = result else {
            panic!("expected problem");
        };
        assert!(message.contains("not in highsec"));
    }

    #[test]
    fn highsec_cutoff_is_inclusive() {
        let facts = base().security(0.45).build();
        assert_ne!(classify(&facts).0, Rule::NotHighsec);
    }

    #[test]
    fn capital_ship_is_a_problem() {
        let facts = FactsBuilder::new(bundle_with(60_001_000, vec![(34, 100, false), (28_606, 1, false)]))
            .security(0.9)
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::CapitalShip);
        let Some(ClassificationResult::Problem { message }) = result else {
            panic!("expected problem");
        };
        assert!(message.contains("contains a capital ship"));
    }

    #[test]
    fn fitted_ship_goes_to_item_exchange_before_valuation() {
        let facts = FactsBuilder::new(bundle_with(60_001_000, vec![(587, 1, true)]))
            .security(0.9)
            .fitted_ship(true)
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::FittedShip);
        let Some(ClassificationResult::ItemExchange {
            reason, recipient, ..
        }) = result
        else {
            panic!("expected item exchange");
        };
        assert_eq!(reason, "contains_fitted_ship");
        assert_eq!(recipient, "Lurbu Orlenard");
    }

    // -- islands -------------------------------------------------------------

    #[test]
    fn island_high_count_fires_before_collateral_check() {
        let facts = FactsBuilder::new(bundle_of(60_001_000, 3_500))
            .security(0.9)
            .totals(50_000_000.0, 60_000_000.0, 1_000.0)
            .mainland(false)
            .build();
        assert_eq!(category(&facts), Some(Category::IslandHighCount));
    }

    #[test]
    fn island_item_boundary() {
        let at = FactsBuilder::new(bundle_of(60_001_000, 3_000))
            .security(0.9)
            .totals(50_000_000.0, 60_000_000.0, 1_000.0)
            .mainland(false)
            .build();
        assert_eq!(category(&at), None);
    }

    #[test]
    fn island_generic_needs_more_than_min_collateral() {
        let island = |buy: f64| {
            FactsBuilder::new(bundle_of(60_001_000, 10))
                .security(0.9)
                .totals(buy, buy, 1_000.0)
                .mainland(false)
                .build()
        };
        assert_eq!(category(&island(100_000_000.0)), None);
        assert_eq!(category(&island(100_000_001.0)), Some(Category::IslandGeneric));
    }

    // -- mainland ------------------------------------------------------------

    #[test]
    fn mainland_without_routes_is_a_problem() {
        let facts = base().routes(vec![]).build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::NoRoute);
        let Some(ClassificationResult::Problem { message }) = result else {
            panic!("expected problem");
        };
        assert!(message.contains("no highsec route"));
    }

    #[test]
    fn collateral_boundary_is_exclusive_below() {
        let below = base().totals(99_999_999.0, 160_000_000.0, 50_000.0).build();
        assert_eq!(classify(&below), (Rule::BelowCollateral, None));

        let at = base().totals(100_000_000.0, 160_000_000.0, 50_000.0).build();
        let (rule, result) = classify(&at);
        assert_ne!(rule, Rule::BelowCollateral);
        assert!(result.is_some());
    }

    #[test]
    fn high_count_boundary() {
        let at = base().bundle(bundle_of(60_001_000, 500)).build();
        assert_ne!(category(&at), Some(Category::HighCount));

        let over = base().bundle(bundle_of(60_001_000, 501)).build();
        let (rule, result) = classify(&over);
        assert_eq!(rule, Rule::HighCount);
        let Some(ClassificationResult::HighCount { summary, jumps_to_jita }) = result else {
            panic!("expected high count");
        };
        assert_eq!(summary.item_count, 501);
        assert_eq!(summary.collateral, 150_000_000.0);
        assert_eq!(jumps_to_jita, Some(10));
    }

    #[test]
    fn logistics_referral_for_large_nearby_bundles() {
        let facts = base()
            .totals(3_000_000_001.0, 3_500_000_000.0, 62_501.0)
            .routes(vec![route("Jita", 30)])
            .build();
        assert_eq!(category(&facts), Some(Category::LogisticsReferral));

        let far = base()
            .totals(3_000_000_001.0, 3_500_000_000.0, 62_501.0)
            .routes(vec![route("Jita", 31)])
            .build();
        assert_ne!(category(&far), Some(Category::LogisticsReferral));
    }

    #[test]
    fn logistics_referral_without_primary_route_counts_as_near() {
        let facts = base()
            .totals(3_000_000_001.0, 3_500_000_000.0, 62_501.0)
            .routes(vec![route("Amarr", 45)])
            .build();
        assert_eq!(category(&facts), Some(Category::LogisticsReferral));
    }

    #[test]
    fn high_value_boundary_is_strict() {
        let at = base().totals(150_000_000.0, 10_000_000_000.0, 50_000.0).build();
        assert_ne!(category(&at), Some(Category::HighValue));

        let over = base().totals(150_000_000.0, 10_000_000_001.0, 50_000.0).build();
        let (_, result) = classify(&over);
        let Some(ClassificationResult::HighValue { collateral, jumps_to_jita, .. }) = result else {
            panic!("expected high value");
        };
        assert_eq!(collateral, 10_000_000_001.0);
        assert_eq!(jumps_to_jita, Some(10));
    }

    #[test]
    fn bulky_boundary() {
        let at = base().totals(600_000_000.0, 700_000_000.0, 845_000.0).build();
        assert_ne!(classify(&at).0, Rule::Bulky);

        let over = base().totals(600_000_000.0, 700_000_000.0, 845_001.0).build();
        let (rule, result) = classify(&over);
        assert_eq!(rule, Rule::Bulky);
        let Some(ClassificationResult::Courier {
            provider,
            reward,
            collateral,
            custom_reason,
            to_station,
            ..
        }) = result
        else {
            panic!("expected courier");
        };
        assert_eq!(provider, "bulky");
        assert_eq!(reward, -1.0);
        assert_eq!(collateral, 600_000_000.0);
        assert!(custom_reason.is_some());
        assert_eq!(to_station, "Jita IV - Moon 4 - Caldari Navy Assembly Plant");
    }

    #[test]
    fn long_haul_band() {
        let facts = base()
            .totals(1_000_000_000.0, 1_500_000_000.0, 700_000.0)
            .routes(vec![route("Jita", 35), route("Amarr", 8)])
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::LongHaul);
        let Some(ClassificationResult::Courier { provider, reward, collateral, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Red Frog Freight");
        assert_eq!(reward, 40_000_000.0);
        assert_eq!(collateral, 1_500_000_000.0);
    }

    #[test]
    fn long_haul_needs_primary_route() {
        let facts = base()
            .totals(1_000_000_000.0, 1_500_000_000.0, 700_000.0)
            .routes(vec![route("Amarr", 35)])
            .build();
        assert_ne!(classify(&facts).0, Rule::LongHaul);
    }

    #[test]
    fn freighter_prefers_express_on_short_routes() {
        let facts = base()
            .totals(700_000_000.0, 800_000_000.0, 100_000.0)
            .routes(vec![route("Jita", 2), route("Amarr", 1)])
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::Freighter);
        let Some(ClassificationResult::Courier { provider, reward, collateral, to_station, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Push Industries");
        // (2 + 1) * 1M is below the 4.5M floor
        assert_eq!(reward, 4_500_000.0);
        assert_eq!(collateral, 800_000_000.0);
        assert_eq!(to_station, "Jita hub");
    }

    #[test]
    fn freighter_falls_back_to_shortest_when_primary_is_far() {
        let facts = base()
            .totals(700_000_000.0, 1_000_000_000.0, 100_000.0)
            .routes(vec![route("Jita", 25), route("Amarr", 12)])
            .build();
        let (_, result) = classify(&facts);
        let Some(ClassificationResult::Courier { provider, reward, to_station, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Push Industries");
        assert_eq!(reward, 13_000_000.0);
        assert_eq!(to_station, "Amarr hub");
    }

    #[test]
    fn freighter_uses_long_haul_provider_beyond_express_range() {
        let facts = base()
            .totals(700_000_000.0, 1_500_000_000.0, 100_000.0)
            .routes(vec![route("Jita", 22), route("Amarr", 21)])
            .build();
        let (_, result) = classify(&facts);
        let Some(ClassificationResult::Courier { provider, reward, collateral, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Red Frog Freight");
        assert_eq!(reward, 26_000_000.0);
        assert_eq!(collateral, 1_500_000_000.0);
    }

    #[test]
    fn expensive_freighter_haul_is_demoted_to_generic() {
        // 26M / 600M is above 2%
        let facts = base()
            .totals(550_000_000.0, 600_000_000.0, 100_000.0)
            .routes(vec![route("Jita", 25), route("Amarr", 21)])
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::Freighter);
        assert_eq!(result.map(|r| r.category()), Some(Category::Generic));
    }

    #[test]
    fn public_courier_blends_buy_and_sell_for_collateral() {
        let facts = base()
            .totals(150_000_001.0, 160_000_000.0, 62_500.0)
            .routes(vec![route("Jita", 5), route("Amarr", 3)])
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::PublicCourier);
        let Some(ClassificationResult::Courier { provider, reward, collateral, to_station, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Public");
        assert_eq!(reward, 3_000_000.0);
        assert_eq!(collateral, 155_000_000.0);
        assert_eq!(to_station, "Amarr hub");
    }

    #[test]
    fn expensive_public_courier_is_demoted_to_generic() {
        let with_jumps = |jumps: i64| {
            base()
                .totals(100_000_000.0, 100_000_000.0, 1_000.0)
                .routes(vec![route("Jita", jumps)])
                .build()
        };
        // 2M / 100M sits exactly on the 2% ceiling
        assert_eq!(category(&with_jumps(2)), Some(Category::Courier));
        // 3M / 100M is above it
        let (rule, result) = classify(&with_jumps(3));
        assert_eq!(rule, Rule::PublicCourier);
        assert_eq!(result.map(|r| r.category()), Some(Category::Generic));
    }

    #[test]
    fn mid_volume_outside_freighter_band_falls_back_to_generic() {
        // volume above the public-courier size but sell below the freighter band
        let facts = base()
            .totals(150_000_000.0, 300_000_000.0, 100_000.0)
            .build();
        let (rule, result) = classify(&facts);
        assert_eq!(rule, Rule::Fallback);
        assert_eq!(result.map(|r| r.category()), Some(Category::Generic));
    }

    // -- band edges ------------------------------------------------------------

    #[test]
    fn logistics_buy_boundary_is_strict() {
        let at = base()
            .totals(3_000_000_000.0, 3_500_000_000.0, 62_501.0)
            .routes(vec![route("Jita", 30)])
            .build();
        let (rule, result) = classify(&at);
        assert_eq!(rule, Rule::Fallback);
        assert_eq!(result.map(|r| r.category()), Some(Category::Generic));

        let over = base()
            .totals(3_000_000_001.0, 3_500_000_000.0, 62_501.0)
            .routes(vec![route("Jita", 30)])
            .build();
        assert_eq!(classify(&over).0, Rule::LogisticsReferral);
    }

    #[test]
    fn long_haul_sell_window_is_open_below_closed_above() {
        let with_sell = |sell: f64| {
            base()
                .totals(1_000_000_000.0, sell, 700_000.0)
                .routes(vec![route("Jita", 35), route("Amarr", 8)])
                .build()
        };
        // 1.4B itself is not long-haul; the freighter band picks it up
        assert_eq!(classify(&with_sell(1_400_000_000.0)).0, Rule::Freighter);

        let (rule, result) = classify(&with_sell(1_550_000_000.0));
        assert_eq!(rule, Rule::LongHaul);
        let Some(ClassificationResult::Courier { reward, collateral, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(reward, 40_000_000.0);
        assert_eq!(collateral, 1_500_000_000.0);
    }

    #[test]
    fn long_haul_jump_boundary() {
        let with_jumps = |jumps: i64| {
            base()
                .totals(1_000_000_000.0, 1_500_000_000.0, 700_000.0)
                .routes(vec![route("Jita", jumps), route("Amarr", 8)])
                .build()
        };
        assert_eq!(classify(&with_jumps(29)).0, Rule::Freighter);

        let (rule, result) = classify(&with_jumps(30));
        assert_eq!(rule, Rule::LongHaul);
        let Some(ClassificationResult::Courier { reward, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(reward, 35_000_000.0);
    }

    #[test]
    fn freighter_sell_floor_is_inclusive() {
        let with_sell = |sell: f64| {
            base()
                .totals(150_000_000.0, sell, 100_000.0)
                .routes(vec![route("Jita", 2), route("Amarr", 1)])
                .build()
        };
        let (rule, result) = classify(&with_sell(499_999_999.0));
        assert_eq!(rule, Rule::Fallback);
        assert_eq!(result.map(|r| r.category()), Some(Category::Generic));

        let (rule, result) = classify(&with_sell(500_000_000.0));
        assert_eq!(rule, Rule::Freighter);
        let Some(ClassificationResult::Courier { provider, reward, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Push Industries");
        assert_eq!(reward, 4_500_000.0);
    }

    #[test]
    fn small_volume_boundary_splits_public_and_freighter() {
        let with_volume = |volume: f64| {
            base()
                .totals(700_000_000.0, 800_000_000.0, volume)
                .routes(vec![route("Jita", 2), route("Amarr", 1)])
                .build()
        };
        let (rule, result) = classify(&with_volume(62_500.0));
        assert_eq!(rule, Rule::PublicCourier);
        let Some(ClassificationResult::Courier { provider, reward, collateral, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Public");
        assert_eq!(reward, 1_000_000.0);
        assert_eq!(collateral, 750_000_000.0);

        let (rule, result) = classify(&with_volume(62_501.0));
        assert_eq!(rule, Rule::Freighter);
        let Some(ClassificationResult::Courier { provider, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Push Industries");
    }

    #[test]
    fn express_jump_boundary_is_strict() {
        let with_jumps = |jumps: i64| {
            base()
                .totals(700_000_000.0, 1_500_000_000.0, 100_000.0)
                .routes(vec![route("Jita", jumps)])
                .build()
        };
        let (_, result) = classify(&with_jumps(19));
        let Some(ClassificationResult::Courier { provider, reward, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Push Industries");
        assert_eq!(reward, 20_000_000.0);

        // 25M / 1.5B is still under 2%
        let (_, result) = classify(&with_jumps(20));
        let Some(ClassificationResult::Courier { provider, reward, .. }) = result else {
            panic!("expected courier");
        };
        assert_eq!(provider, "Red Frog Freight");
        assert_eq!(reward, 25_000_000.0);
    }

    #[test]
    fn classification_is_deterministic() {
        let facts = base().build();
        let first = serde_json::to_string(&classify(&facts).1).unwrap();
        let second = serde_json::to_string(&classify(&facts).1).unwrap();
        assert_eq!(first, second);
    }
}
