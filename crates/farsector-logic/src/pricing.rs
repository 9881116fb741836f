//! Price contexts and the fixed default price graph.
//!
//! Every sector prices resources independently, but all sectors start from
//! the same deterministic defaults computed here. The graph is intentionally
//! simple: fuel is the base cost, raw goods are priced from the fuel spent
//! extracting them, refined goods from their inputs.

use serde::{Deserialize, Serialize};

/// Global margin applied at every stage of the default price graph.
pub const MARGIN: f32 = 1.2;

/// Resource identifiers the default price graph knows how to price.
pub const PRICED_IDENTIFIERS: [&str; 14] = [
    "fuel",
    "h2",
    "feo",
    "ch4",
    "sio2",
    "he3",
    "h2o",
    "steel",
    "c",
    "plastics",
    "fleet-supply",
    "food",
    "tools",
    "tech",
];

/// The role a trade party plays, which scales the market price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceContext {
    /// Ship-to-ship trades and anything without a station role.
    Default,
    /// Buying a resource a station produces (seller-side discount).
    FactoryOutput,
    /// Selling a resource a station consumes (buyer-side premium).
    FactoryInput,
    /// Habitat demand for consumer goods.
    ConsumerConsumption,
}

impl PriceContext {
    /// Deterministic multiplier applied to the precise sector price.
    pub fn multiplier(self) -> f32 {
        match self {
            PriceContext::Default => 1.0,
            PriceContext::FactoryOutput => 0.99,
            PriceContext::FactoryInput => 1.01,
            PriceContext::ConsumerConsumption => 2.0,
        }
    }
}

/// Market price in whole credits for a precise price under a context.
///
/// Trades settle in whole credits; the fractional part is dropped.
pub fn contextual_price(precise: f32, context: PriceContext) -> u64 {
    (precise * context.multiplier()) as u64
}

/// Default price for a known resource identifier.
///
/// The arithmetic order is part of the economic balance and must not be
/// reordered. Returns `None` for identifiers outside the graph.
pub fn default_price(identifier: &str) -> Option<f32> {
    // Base
    let fuel = 1500.0 * MARGIN;

    // Raw
    let h2 = ((fuel * 10.0 + 10000.0) / 40.0) * MARGIN;
    let feo = ((fuel * 10.0 + 10000.0) / 10.0) * MARGIN;
    let ch4 = ((fuel * 10.0 + 10000.0) / 20.0) * MARGIN;
    let sio2 = ((fuel * 10.0 + 10000.0) / 10.0) * MARGIN;
    let he3 = ((fuel * 10.0 + 10000.0) / 10.0) * MARGIN;
    let h2o = ((fuel * 10.0 + 10000.0) / 50.0) * MARGIN;

    // Refined
    let steel = (20.0 * feo + 40.0 * h2o + 10.0 * fuel + 10000.0) / 10.0 * MARGIN;
    let carbon = (10.0 * ch4 + 10.0 * fuel + 10000.0) / 10.0 * MARGIN;
    let plastics = (10.0 * ch4 + 10.0 * fuel + 10000.0) / 10.0 * MARGIN;
    let fleet_supply = (10.0 * steel + 20.0 * plastics + 10.0 * fuel + 10000.0) / 10.0 * MARGIN;
    let food = (10.0 * carbon + 10.0 * h2o + 10.0 * fuel + 10000.0) / 10.0 * MARGIN;
    let tools = (10.0 * steel + 10.0 * plastics + 10000.0) / 10.0 * MARGIN;
    let tech = (20.0 * sio2 + 40.0 * h2 + 50.0 * fuel + 50000.0) / 10.0 * MARGIN;

    match identifier {
        "fuel" => Some(fuel),
        "h2" => Some(h2),
        "feo" => Some(feo),
        "ch4" => Some(ch4),
        "sio2" => Some(sio2),
        "he3" => Some(he3),
        "h2o" => Some(h2o),
        "steel" => Some(steel),
        "c" => Some(carbon),
        "plastics" => Some(plastics),
        "fleet-supply" => Some(fleet_supply),
        "food" => Some(food),
        "tools" => Some(tools),
        "tech" => Some(tech),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuel_is_base() {
        let fuel = default_price("fuel").unwrap();
        assert!((fuel - 1800.0).abs() < 0.001);
    }

    #[test]
    fn test_all_known_identifiers_priced() {
        for identifier in PRICED_IDENTIFIERS {
            let price = default_price(identifier).unwrap();
            assert!(price > 0.0, "{} must have a positive price", identifier);
        }
    }

    #[test]
    fn test_unknown_identifier_unpriced() {
        assert!(default_price("unobtainium").is_none());
        assert!(default_price("").is_none());
        assert!(default_price("Fuel").is_none()); // identifiers are lower-case
    }

    #[test]
    fn test_graph_values_in_whole_credits() {
        let expected = [
            ("fuel", 1800),
            ("h2", 840),
            ("feo", 3360),
            ("ch4", 1680),
            ("sio2", 3360),
            ("he3", 3360),
            ("h2o", 672),
            ("steel", 14649),
            ("c", 5376),
            ("plastics", 5376),
            ("fleet-supply", 33841),
            ("food", 10617),
            ("tools", 25230),
            ("tech", 28896),
        ];
        for (identifier, credits) in expected {
            let price = default_price(identifier).unwrap();
            assert_eq!(price as u64, credits, "{} priced wrong", identifier);
        }
    }

    #[test]
    fn test_graph_is_deterministic() {
        for identifier in PRICED_IDENTIFIERS {
            let first = default_price(identifier).unwrap();
            let second = default_price(identifier).unwrap();
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }

    #[test]
    fn test_refined_goods_cost_more_than_raw() {
        let feo = default_price("feo").unwrap();
        let steel = default_price("steel").unwrap();
        let fleet_supply = default_price("fleet-supply").unwrap();
        assert!(steel > feo);
        assert!(fleet_supply > steel);
    }

    #[test]
    fn test_context_multipliers() {
        assert_eq!(PriceContext::Default.multiplier(), 1.0);
        assert_eq!(PriceContext::FactoryOutput.multiplier(), 0.99);
        assert_eq!(PriceContext::FactoryInput.multiplier(), 1.01);
        assert_eq!(PriceContext::ConsumerConsumption.multiplier(), 2.0);
    }

    #[test]
    fn test_contextual_price_truncates_to_credits() {
        let fuel = default_price("fuel").unwrap();
        assert_eq!(contextual_price(fuel, PriceContext::Default), 1800);
        assert_eq!(contextual_price(fuel, PriceContext::FactoryOutput), 1782);
        assert_eq!(contextual_price(fuel, PriceContext::FactoryInput), 1818);
        assert_eq!(
            contextual_price(fuel, PriceContext::ConsumerConsumption),
            3600
        );
    }

    #[test]
    fn test_contextual_price_of_zero() {
        for context in [
            PriceContext::Default,
            PriceContext::FactoryOutput,
            PriceContext::FactoryInput,
            PriceContext::ConsumerConsumption,
        ] {
            assert_eq!(contextual_price(0.0, context), 0);
        }
    }
}
