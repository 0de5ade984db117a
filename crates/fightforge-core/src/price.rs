//! Item price snapshots and derived unit prices.
//!
//! The cost-aware model reads a handful of market items. A snapshot that
//! lacks an item prices it at 0: the search still completes, it just
//! understates the cost.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equipment::EquipmentTier;
use crate::modifier::Scenario;

/// Market items the cost model reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemCode {
    LightAmmo,
    Ammo,
    HeavyAmmo,
    Bread,
    Steak,
    CookedFish,
    Scraps,
    Steel,
}

impl ItemCode {
    pub const ALL: [ItemCode; 8] = [
        ItemCode::LightAmmo,
        ItemCode::Ammo,
        ItemCode::HeavyAmmo,
        ItemCode::Bread,
        ItemCode::Steak,
        ItemCode::CookedFish,
        ItemCode::Scraps,
        ItemCode::Steel,
    ];

    /// Item code as used by the market API.
    pub const fn as_str(self) -> &'static str {
        match self {
            ItemCode::LightAmmo => "lightAmmo",
            ItemCode::Ammo => "ammo",
            ItemCode::HeavyAmmo => "heavyAmmo",
            ItemCode::Bread => "bread",
            ItemCode::Steak => "steak",
            ItemCode::CookedFish => "cookedFish",
            ItemCode::Scraps => "scraps",
            ItemCode::Steel => "steel",
        }
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of market unit prices keyed by item code.
///
/// # Examples
///
/// ```
/// use fightforge_core::{ItemCode, ItemPrices};
///
/// let prices = ItemPrices::from_pairs([("bread", 0.8), ("steel", 2.5)]);
/// assert_eq!(prices.get(ItemCode::Bread), 0.8);
/// assert_eq!(prices.get(ItemCode::HeavyAmmo), 0.0); // missing
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemPrices {
    prices: BTreeMap<String, f64>,
}

impl ItemPrices {
    /// An empty snapshot; every item prices at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(code, price)` pairs. Non-finite prices are skipped.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        let mut prices = Self::new();
        for (code, price) in pairs {
            prices.insert(code, price);
        }
        prices
    }

    /// Records a price. Non-finite prices are ignored.
    pub fn insert(&mut self, code: impl Into<String>, price: f64) {
        if price.is_finite() {
            self.prices.insert(code.into(), price);
        }
    }

    /// Unit price of a known item, 0 if absent.
    #[inline]
    pub fn get(&self, item: ItemCode) -> f64 {
        self.get_raw(item.as_str())
    }

    /// Unit price by raw item code, 0 if absent.
    pub fn get_raw(&self, code: &str) -> f64 {
        self.prices.get(code).copied().unwrap_or(0.0)
    }

    /// Whether the snapshot has a price for `item`.
    pub fn contains(&self, item: ItemCode) -> bool {
        self.prices.contains_key(item.as_str())
    }

    /// Items the cost model reads that this snapshot lacks.
    pub fn missing(&self) -> Vec<ItemCode> {
        ItemCode::ALL
            .iter()
            .copied()
            .filter(|&item| !self.contains(item))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Resolves the four unit prices the cost model needs.
    ///
    /// Food and ammo follow the scenario's healing item and ammo tier.
    /// Weapon and armor pieces are priced at their crafting cost for `tier`;
    /// without a tier, wear is free.
    pub fn unit_prices(&self, scenario: &Scenario, tier: Option<EquipmentTier>) -> UnitPrices {
        let equipment = tier.map(|t| t.craft_cost(self)).unwrap_or(0.0);
        UnitPrices {
            food: self.get(scenario.healing_item().item_code()),
            ammo: self.get(scenario.ammo_tier().item_code()),
            weapon: equipment,
            armor: equipment,
        }
    }
}

/// Unit prices consumed by [`evaluate_cost`](crate::model::evaluate_cost).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPrices {
    /// Price of one food item.
    pub food: f64,
    /// Price of one round of ammo.
    pub ammo: f64,
    /// Price of a weapon; one attack wears 1% of it.
    pub weapon: f64,
    /// Price of an armor piece; one taken hit wears 1% of it.
    pub armor: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{AmmoTier, HealingItem};

    fn snapshot() -> ItemPrices {
        ItemPrices::from_pairs([
            ("lightAmmo", 0.1),
            ("ammo", 0.4),
            ("heavyAmmo", 1.6),
            ("bread", 1.0),
            ("steak", 2.0),
            ("cookedFish", 3.5),
            ("scraps", 0.05),
            ("steel", 2.0),
        ])
    }

    #[test]
    fn test_missing_items_price_zero() {
        let prices = ItemPrices::from_pairs([("bread", 1.25)]);
        assert_eq!(prices.get(ItemCode::Bread), 1.25);
        assert_eq!(prices.get(ItemCode::Steel), 0.0);
        assert_eq!(prices.missing().len(), 7);
    }

    #[test]
    fn test_non_finite_prices_skipped() {
        let prices = ItemPrices::from_pairs([("bread", f64::NAN), ("steak", 2.0)]);
        assert!(!prices.contains(ItemCode::Bread));
        assert_eq!(prices.len(), 1);
    }

    #[test]
    fn test_unit_prices_follow_scenario() {
        let prices = snapshot();
        let scenario = Scenario::new(HealingItem::Steak, AmmoTier::Heavy);
        let unit = prices.unit_prices(&scenario, Some(EquipmentTier::Rare));
        assert_eq!(unit.food, 2.0);
        assert_eq!(unit.ammo, 1.6);
        assert!((unit.weapon - (54.0 * 0.05 + 4.0 * 2.0)).abs() < 1e-9);
        assert_eq!(unit.weapon, unit.armor);
    }

    #[test]
    fn test_unit_prices_without_tier() {
        let unit = snapshot().unit_prices(&Scenario::default(), None);
        assert_eq!(unit.food, 1.0);
        assert_eq!(unit.ammo, 0.1);
        assert_eq!(unit.weapon, 0.0);
        assert_eq!(unit.armor, 0.0);
    }
}
