//! Search requests.

use fightforge_core::input::{
    deserialize_lenient_bool, deserialize_lenient_f64, deserialize_lenient_u32,
};
use fightforge_core::{EquipmentTier, FightModel, ItemPrices, Modifiers, Scenario};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Everything a caller supplies for one search.
///
/// Decoding is lenient: numbers may arrive as strings, be missing or be
/// null, and unknown equipment tiers are ignored. Anything unparsable
/// becomes 0, a missing or malformed modifier bundle means no bonuses, and
/// the cost flag accepts `"true"` and `"1"`.
///
/// # Example
///
/// ```
/// use fightforge_core::EquipmentTier;
/// use fightforge_solver::SearchRequest;
///
/// let request: SearchRequest = serde_json::from_str(
///     r#"{"pointBudget": "55", "regenPerTick": 20, "ammoMultiplier": null,
///         "modifiers": {"attackBonus": "12"}, "equipmentTier": "rare"}"#,
/// ).unwrap();
/// assert_eq!(request.point_budget, 55);
/// assert_eq!(request.regen_per_tick, 20.0);
/// assert_eq!(request.ammo_multiplier, 0.0);
/// assert_eq!(request.modifiers.attack_bonus, 12.0);
/// assert_eq!(request.equipment_tier, Some(EquipmentTier::Rare));
/// assert!(request.is_cost_aware());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Skill points available.
    #[serde(default, deserialize_with = "deserialize_lenient_u32")]
    pub point_budget: u32,

    /// Health restored per food item.
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub regen_per_tick: f64,

    /// Damage bonus of the ammo in use.
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub ammo_multiplier: f64,

    /// Flat bonuses from equipment.
    #[serde(default, deserialize_with = "deserialize_modifiers")]
    pub modifiers: Modifiers,

    /// Tier of the worn equipment, used to price its wear.
    #[serde(
        default,
        deserialize_with = "deserialize_tier",
        skip_serializing_if = "Option::is_none"
    )]
    pub equipment_tier: Option<EquipmentTier>,

    /// Score daily cost even without an equipment tier.
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub cost_aware: bool,
}

impl SearchRequest {
    /// A damage-only request with the default scenario and no modifiers.
    pub fn new(point_budget: u32) -> Self {
        let scenario = Scenario::default();
        Self {
            point_budget,
            regen_per_tick: scenario.regen_per_tick,
            ammo_multiplier: scenario.ammo_multiplier,
            ..Self::default()
        }
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.regen_per_tick = scenario.regen_per_tick;
        self.ammo_multiplier = scenario.ammo_multiplier;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the equipment tier, which makes the request cost-aware.
    pub fn with_equipment_tier(mut self, tier: EquipmentTier) -> Self {
        self.equipment_tier = Some(tier);
        self
    }

    pub fn with_cost(mut self) -> Self {
        self.cost_aware = true;
        self
    }

    pub fn scenario(&self) -> Scenario {
        Scenario::from_raw(self.regen_per_tick, self.ammo_multiplier)
    }

    /// Whether the search needs a price snapshot.
    pub fn is_cost_aware(&self) -> bool {
        self.cost_aware || self.equipment_tier.is_some()
    }

    /// Builds the scoring model, cost-aware when `prices` is given and the
    /// request asks for costs.
    pub fn model(&self, prices: Option<&ItemPrices>) -> FightModel {
        let scenario = self.scenario();
        let model = FightModel::new(self.modifiers, scenario);
        match prices {
            Some(prices) if self.is_cost_aware() => {
                model.with_unit_prices(prices.unit_prices(&scenario, self.equipment_tier))
            }
            _ => model,
        }
    }
}

/// A modifier bundle, or anything else standing in for one.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModifiersField {
    Bundle(Modifiers),
    Other(IgnoredAny),
}

fn deserialize_modifiers<'de, D: Deserializer<'de>>(d: D) -> Result<Modifiers, D::Error> {
    Ok(match Option::<ModifiersField>::deserialize(d)? {
        Some(ModifiersField::Bundle(modifiers)) => modifiers,
        Some(ModifiersField::Other(_)) | None => Modifiers::none(),
    })
}

/// A tier field: only known tier names count.
#[derive(Deserialize)]
#[serde(untagged)]
enum TierField {
    Name(String),
    Other(IgnoredAny),
}

fn deserialize_tier<'de, D: Deserializer<'de>>(d: D) -> Result<Option<EquipmentTier>, D::Error> {
    Ok(match Option::<TierField>::deserialize(d)? {
        Some(TierField::Name(name)) => EquipmentTier::parse(&name),
        Some(TierField::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fightforge_core::{AmmoTier, HealingItem};

    #[test]
    fn test_missing_fields_default_to_zero() {
        let request: SearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.point_budget, 0);
        assert_eq!(request.regen_per_tick, 0.0);
        assert_eq!(request.modifiers, Modifiers::none());
        assert!(!request.is_cost_aware());
    }

    #[test]
    fn test_garbage_numbers_become_zero() {
        let body = r#"{"pointBudget": "abc", "regenPerTick": "x20", "ammoMultiplier": true}"#;
        let request: SearchRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.point_budget, 0);
        assert_eq!(request.regen_per_tick, 0.0);
        assert_eq!(request.ammo_multiplier, 0.0);
    }

    #[test]
    fn test_null_or_malformed_modifiers_mean_no_bonuses() {
        for body in [
            r#"{"pointBudget": 10, "modifiers": null}"#,
            r#"{"pointBudget": 10, "modifiers": "none"}"#,
            r#"{"pointBudget": 10, "modifiers": 7}"#,
        ] {
            let request: SearchRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.point_budget, 10, "{}", body);
            assert_eq!(request.modifiers, Modifiers::none(), "{}", body);
        }
    }

    #[test]
    fn test_unparsable_modifier_values_become_zero() {
        let body = r#"{"pointBudget": 10,
            "modifiers": {"attackBonus": [1], "dodgeBonus": {"v": 2}, "armorBonus": "5"}}"#;
        let request: SearchRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.point_budget, 10);
        assert_eq!(request.modifiers.attack_bonus, 0.0);
        assert_eq!(request.modifiers.dodge_bonus, 0.0);
        assert_eq!(request.modifiers.armor_bonus, 5.0);

        let request: SearchRequest = serde_json::from_str(r#"{"pointBudget": [55]}"#).unwrap();
        assert_eq!(request.point_budget, 0);
    }

    #[test]
    fn test_cost_flag_from_form_strings() {
        let request: SearchRequest = serde_json::from_str(r#"{"costAware": "true"}"#).unwrap();
        assert!(request.cost_aware);
        assert!(request.is_cost_aware());

        let request: SearchRequest = serde_json::from_str(r#"{"costAware": "1"}"#).unwrap();
        assert!(request.cost_aware);

        let request: SearchRequest = serde_json::from_str(r#"{"costAware": "off"}"#).unwrap();
        assert!(!request.is_cost_aware());

        let request: SearchRequest = serde_json::from_str(r#"{"costAware": null}"#).unwrap();
        assert!(!request.is_cost_aware());
    }

    #[test]
    fn test_negative_budget_is_zero() {
        let request: SearchRequest = serde_json::from_str(r#"{"pointBudget": -5}"#).unwrap();
        assert_eq!(request.point_budget, 0);
    }

    #[test]
    fn test_unknown_tier_ignored() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"equipmentTier": "adamantine"}"#).unwrap();
        assert_eq!(request.equipment_tier, None);
        let request: SearchRequest = serde_json::from_str(r#"{"equipmentTier": 3}"#).unwrap();
        assert_eq!(request.equipment_tier, None);
    }

    #[test]
    fn test_builder() {
        let request = SearchRequest::new(100)
            .with_scenario(Scenario::new(HealingItem::Steak, AmmoTier::Heavy))
            .with_equipment_tier(EquipmentTier::Epic);
        assert_eq!(request.regen_per_tick, 20.0);
        assert_eq!(request.ammo_multiplier, 0.3);
        assert!(request.is_cost_aware());
    }

    #[test]
    fn test_model_cost_awareness() {
        let prices = ItemPrices::from_pairs([("bread", 1.0)]);
        let plain = SearchRequest::new(10);
        assert!(plain.model(Some(&prices)).unit_prices().is_none());
        assert!(plain.clone().with_cost().model(Some(&prices)).unit_prices().is_some());
        assert!(plain.with_cost().model(None).unit_prices().is_none());
    }
}
