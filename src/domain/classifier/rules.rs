//! The ordered decision rules.
//!
//! Each rule inspects [`StationFacts`] and either passes, emits a result,
//! or ends classification without one. A rule that needs a fact the caller
//! has not gathered yet reports it through `Err(Fact)`.

use super::config::ClassifierConfig;
use super::facts::{Fact, StationFacts};
use crate::domain::result::{BundleSummary, ClassificationResult};
use crate::domain::route::RouteInfo;

/// What a single rule decided.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The rule does not apply; try the next one.
    Pass,
    /// The station gets this result.
    Emit(ClassificationResult),
    /// The station is intentionally left without a result.
    Ignore,
}

/// One step of the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    OutOfNpcRange,
    NotHighsec,
    CapitalShip,
    FittedShip,
    Island,
    NoRoute,
    BelowCollateral,
    HighCount,
    LogisticsReferral,
    HighValue,
    Bulky,
    LongHaul,
    Freighter,
    PublicCourier,
    Fallback,
}

impl Rule {
    /// The policy order. Earlier rules shadow later ones.
    pub const ORDER: [Rule; 15] = [
        Rule::OutOfNpcRange,
        Rule::NotHighsec,
        Rule::CapitalShip,
        Rule::FittedShip,
        Rule::Island,
        Rule::NoRoute,
        Rule::BelowCollateral,
        Rule::HighCount,
        Rule::LogisticsReferral,
        Rule::HighValue,
        Rule::Bulky,
        Rule::LongHaul,
        Rule::Freighter,
        Rule::PublicCourier,
        Rule::Fallback,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OutOfNpcRange => "out_of_npc_range",
            Self::NotHighsec => "not_highsec",
            Self::CapitalShip => "capital_ship",
            Self::FittedShip => "fitted_ship",
            Self::Island => "island",
            Self::NoRoute => "no_route",
            Self::BelowCollateral => "below_collateral",
            Self::HighCount => "high_count",
            Self::LogisticsReferral => "logistics_referral",
            Self::HighValue => "high_value",
            Self::Bulky => "bulky",
            Self::LongHaul => "long_haul",
            Self::Freighter => "freighter",
            Self::PublicCourier => "public_courier",
            Self::Fallback => "fallback",
        }
    }

    pub fn evaluate(self, facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
        match self {
            Self::OutOfNpcRange => out_of_npc_range(facts, config),
            Self::NotHighsec => not_highsec(facts, config),
            Self::CapitalShip => capital_ship(facts, config),
            Self::FittedShip => fitted_ship(facts, config),
            Self::Island => island(facts, config),
            Self::NoRoute => no_route(facts),
            Self::BelowCollateral => below_collateral(facts, config),
            Self::HighCount => high_count(facts, config),
            Self::LogisticsReferral => logistics_referral(facts, config),
            Self::HighValue => high_value(facts, config),
            Self::Bulky => bulky(facts, config),
            Self::LongHaul => long_haul(facts, config),
            Self::Freighter => freighter(facts, config),
            Self::PublicCourier => public_courier(facts, config),
            Self::Fallback => generic(facts).map(Verdict::Emit),
        }
    }
}

fn problem(message: String) -> Verdict {
    Verdict::Emit(ClassificationResult::Problem { message })
}

fn summary(facts: &StationFacts) -> Result<BundleSummary, Fact> {
    let location = facts.location()?;
    let totals = facts.totals()?;
    Ok(BundleSummary {
        from_region: location.region_name.clone(),
        from_station: location.station_name.clone(),
        item_count: facts.item_count(),
        collateral: totals.buy,
        volume: totals.volume,
    })
}

fn generic(facts: &StationFacts) -> Result<ClassificationResult, Fact> {
    Ok(ClassificationResult::Generic {
        summary: summary(facts)?,
    })
}

fn primary_route<'a>(facts: &'a StationFacts, config: &ClassifierConfig) -> Result<Option<&'a RouteInfo>, Fact> {
    Ok(facts.routes()?.to_system(&config.primary_hub_system))
}

fn courier(
    facts: &StationFacts,
    provider: &str,
    reward: f64,
    collateral: f64,
    to_station: &str,
) -> Result<Verdict, Fact> {
    let location = facts.location()?;
    Ok(Verdict::Emit(ClassificationResult::Courier {
        provider: provider.to_string(),
        custom_reason: None,
        reward,
        collateral,
        from_region: location.region_name.clone(),
        from_station: location.station_name.clone(),
        to_station: to_station.to_string(),
        jumps_to_jita: None,
    }))
}

fn out_of_npc_range(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let station_id = facts.station_id();
    if station_id.get() <= config.npc_station_max_id {
        return Ok(Verdict::Pass);
    }
    let link = facts.appraisal_link()?;
    Ok(problem(format!(
        "Station <{station_id}> is not in NPC station ID range. Assets: <{link}>"
    )))
}

fn not_highsec(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let location = facts.location()?;
    let is_highsec = location.security_status >= config.min_security;
    if is_highsec {
        return Ok(Verdict::Pass);
    }
    Ok(problem(format!(
        "{} ({}) is not in highsec (security: {}).",
        location.station_name, location.region_name, location.security_status
    )))
}

fn capital_ship(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let has_capital = facts
        .bundle()
        .type_quantities()
        .any(|(type_id, _)| config.capital_ship_types.contains(&type_id.get()));
    if !has_capital {
        return Ok(Verdict::Pass);
    }
    let location = facts.location()?;
    Ok(problem(format!(
        "{} ({}) contains a capital ship.",
        location.station_name, location.region_name
    )))
}

fn fitted_ship(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    if facts.bundle().singletons().next().is_none() || !facts.has_fitted_ship()? {
        return Ok(Verdict::Pass);
    }
    let location = facts.location()?;
    Ok(Verdict::Emit(ClassificationResult::ItemExchange {
        reason: config.exchange_reason.clone(),
        recipient: config.exchange_recipient.clone(),
        from_region: location.region_name.clone(),
        from_station: location.station_name.clone(),
    }))
}

fn island(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let totals = facts.totals()?;
    if facts.is_mainland()? {
        return Ok(Verdict::Pass);
    }
    let t = &config.thresholds;
    if facts.item_count() > t.island_high_count_items {
        Ok(Verdict::Emit(ClassificationResult::IslandHighCount {
            summary: summary(facts)?,
        }))
    } else if totals.buy > t.min_collateral {
        Ok(Verdict::Emit(ClassificationResult::IslandGeneric {
            summary: summary(facts)?,
        }))
    } else {
        Ok(Verdict::Ignore)
    }
}

fn no_route(facts: &StationFacts) -> Result<Verdict, Fact> {
    if !facts.routes()?.is_empty() {
        return Ok(Verdict::Pass);
    }
    let location = facts.location()?;
    Ok(problem(format!(
        "{} ({}) has no highsec route, but should not be on an island.",
        location.station_name, location.region_name
    )))
}

fn below_collateral(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    if facts.totals()?.buy < config.thresholds.min_collateral {
        Ok(Verdict::Ignore)
    } else {
        Ok(Verdict::Pass)
    }
}

fn high_count(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    if facts.item_count() <= config.thresholds.high_count_items {
        return Ok(Verdict::Pass);
    }
    Ok(Verdict::Emit(ClassificationResult::HighCount {
        summary: summary(facts)?,
        jumps_to_jita: primary_route(facts, config)?.map(|r| r.jumps),
    }))
}

fn logistics_referral(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let t = &config.thresholds;
    let totals = facts.totals()?;
    // A missing primary route counts as -1 jumps.
    let jumps = primary_route(facts, config)?.map_or(-1, |r| r.jumps);
    if totals.buy > t.logistics_min_buy
        && totals.volume > t.small_volume_max
        && jumps <= t.logistics_max_jumps
    {
        Ok(Verdict::Emit(ClassificationResult::LogisticsReferral {
            summary: summary(facts)?,
        }))
    } else {
        Ok(Verdict::Pass)
    }
}

fn high_value(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let totals = facts.totals()?;
    if totals.sell <= config.thresholds.high_value_sell {
        return Ok(Verdict::Pass);
    }
    let location = facts.location()?;
    Ok(Verdict::Emit(ClassificationResult::HighValue {
        collateral: totals.sell,
        from_region: location.region_name.clone(),
        from_station: location.station_name.clone(),
        jumps_to_jita: primary_route(facts, config)?.map(|r| r.jumps),
    }))
}

fn bulky(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let totals = facts.totals()?;
    if totals.volume <= config.thresholds.freighter_capacity {
        return Ok(Verdict::Pass);
    }
    let location = facts.location()?;
    Ok(Verdict::Emit(ClassificationResult::Courier {
        provider: config.providers.bulky.clone(),
        custom_reason: Some(config.bulky_guidance.clone()),
        reward: -1.0,
        collateral: totals.buy,
        from_region: location.region_name.clone(),
        from_station: location.station_name.clone(),
        to_station: config.primary_hub_station.clone(),
        jumps_to_jita: primary_route(facts, config)?.map(|r| r.jumps),
    }))
}

fn long_haul(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let t = &config.thresholds;
    let totals = facts.totals()?;
    let Some(route) = primary_route(facts, config)? else {
        return Ok(Verdict::Pass);
    };
    if route.jumps >= t.long_haul_min_jumps
        && totals.volume > t.long_haul_min_volume
        && totals.sell > t.long_haul_min_sell
        && totals.sell <= t.freighter_max_sell
    {
        let reward = (route.jumps + t.long_haul_extra_jumps) as f64 * t.fee_per_jump;
        courier(
            facts,
            &config.providers.long_haul,
            reward,
            totals.sell.min(t.collateral_cap),
            &config.primary_hub_station,
        )
    } else {
        Ok(Verdict::Pass)
    }
}

fn freighter(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let t = &config.thresholds;
    let totals = facts.totals()?;
    let in_band = totals.sell >= t.freighter_min_sell
        && totals.volume > t.small_volume_max
        && totals.sell <= t.freighter_max_sell
        && totals.volume <= t.freighter_capacity;
    if !in_band {
        return Ok(Verdict::Pass);
    }

    let routes = facts.routes()?;
    let preferred = primary_route(facts, config)?.filter(|r| r.jumps <= t.preferred_route_max_jumps);
    let Some(selected) = preferred.or_else(|| routes.shortest()) else {
        return Ok(Verdict::Pass);
    };

    let express_raw = (selected.jumps + t.express_extra_jumps) as f64 * t.fee_per_jump;
    let express_fee = express_raw.max(t.express_min_fee);
    let long_haul_fee = (selected.jumps + t.long_haul_extra_jumps) as f64 * t.fee_per_jump;
    let collateral = totals.sell.min(t.collateral_cap);

    if selected.jumps < t.express_max_jumps && express_raw / totals.sell < t.max_fee_ratio {
        courier(
            facts,
            &config.providers.express,
            express_fee,
            collateral,
            &selected.destination_label,
        )
    } else if long_haul_fee / totals.sell < t.max_fee_ratio {
        courier(
            facts,
            &config.providers.long_haul,
            long_haul_fee,
            collateral,
            &selected.destination_label,
        )
    } else {
        generic(facts).map(Verdict::Emit)
    }
}

fn public_courier(facts: &StationFacts, config: &ClassifierConfig) -> Result<Verdict, Fact> {
    let t = &config.thresholds;
    let totals = facts.totals()?;
    if totals.volume > t.small_volume_max {
        return Ok(Verdict::Pass);
    }
    let Some(shortest) = facts.routes()?.shortest() else {
        return Ok(Verdict::Pass);
    };

    let fee = shortest.jumps as f64 * t.fee_per_jump;
    if fee / totals.sell > t.max_fee_ratio {
        return generic(facts).map(Verdict::Emit);
    }
    courier(
        facts,
        &config.providers.public,
        fee,
        ((totals.sell + totals.buy) / 2.0).floor(),
        &shortest.destination_label,
    )
}
