//! Modifier bundles and the fight scenario.
//!
//! Equipment and consumables add flat bonuses to the base skill values; they
//! are never multiplied in. The scenario carries the healing item (health
//! regained per food tick) and the ammo tier (damage multiplier).

use serde::{Deserialize, Serialize};

use crate::input::{deserialize_lenient_f64, finite_or_zero};
use crate::price::ItemCode;
use crate::skill::Skill;

/// Additive bonuses, one per skill dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modifiers {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub attack_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub precision_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub crit_chance_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub crit_damage_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub armor_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub dodge_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub health_bonus: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub hunger_bonus: f64,
}

impl Modifiers {
    /// No bonuses at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Bonus applied to one dimension.
    pub fn bonus(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Attack => self.attack_bonus,
            Skill::Precision => self.precision_bonus,
            Skill::CriticalChance => self.crit_chance_bonus,
            Skill::CriticalDamage => self.crit_damage_bonus,
            Skill::Armor => self.armor_bonus,
            Skill::Dodge => self.dodge_bonus,
            Skill::Health => self.health_bonus,
            Skill::Hunger => self.hunger_bonus,
        }
    }

    /// Returns a copy with the bonus of one dimension replaced.
    pub fn with_bonus(mut self, skill: Skill, value: f64) -> Self {
        let slot = match skill {
            Skill::Attack => &mut self.attack_bonus,
            Skill::Precision => &mut self.precision_bonus,
            Skill::CriticalChance => &mut self.crit_chance_bonus,
            Skill::CriticalDamage => &mut self.crit_damage_bonus,
            Skill::Armor => &mut self.armor_bonus,
            Skill::Dodge => &mut self.dodge_bonus,
            Skill::Health => &mut self.health_bonus,
            Skill::Hunger => &mut self.hunger_bonus,
        };
        *slot = value;
        self
    }

    /// Replaces non-finite bonuses with 0.
    pub fn sanitized(self) -> Self {
        Skill::ALL
            .iter()
            .fold(self, |m, &s| m.with_bonus(s, finite_or_zero(m.bonus(s))))
    }

    /// Component-wise sum of two bundles.
    pub fn combined(self, other: &Modifiers) -> Self {
        Skill::ALL
            .iter()
            .fold(self, |m, &s| m.with_bonus(s, m.bonus(s) + other.bonus(s)))
    }
}

/// Food consumed to regain health between fights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealingItem {
    #[default]
    Bread,
    Steak,
    CookedFish,
}

impl HealingItem {
    pub const ALL: [HealingItem; 3] = [
        HealingItem::Bread,
        HealingItem::Steak,
        HealingItem::CookedFish,
    ];

    /// Health regained per food tick.
    pub const fn regen(self) -> f64 {
        match self {
            HealingItem::Bread => 10.0,
            HealingItem::Steak => 20.0,
            HealingItem::CookedFish => 30.0,
        }
    }

    /// Market item this food is bought as.
    pub const fn item_code(self) -> ItemCode {
        match self {
            HealingItem::Bread => ItemCode::Bread,
            HealingItem::Steak => ItemCode::Steak,
            HealingItem::CookedFish => ItemCode::CookedFish,
        }
    }

    /// The item whose regen is closest to `regen`.
    pub fn nearest(regen: f64) -> Self {
        nearest_by(&Self::ALL, regen, |h| h.regen())
    }
}

/// Ammunition tier, selecting a flat damage multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AmmoTier {
    #[default]
    Light,
    Standard,
    Heavy,
}

impl AmmoTier {
    pub const ALL: [AmmoTier; 3] = [AmmoTier::Light, AmmoTier::Standard, AmmoTier::Heavy];

    /// Extra damage fraction added per hit.
    pub const fn multiplier(self) -> f64 {
        match self {
            AmmoTier::Light => 0.1,
            AmmoTier::Standard => 0.2,
            AmmoTier::Heavy => 0.3,
        }
    }

    /// Market item this ammo is bought as.
    pub const fn item_code(self) -> ItemCode {
        match self {
            AmmoTier::Light => ItemCode::LightAmmo,
            AmmoTier::Standard => ItemCode::Ammo,
            AmmoTier::Heavy => ItemCode::HeavyAmmo,
        }
    }

    /// The tier whose multiplier is closest to `multiplier`.
    ///
    /// Values beyond the heavy tier (0.4 in some game versions) map to heavy.
    pub fn nearest(multiplier: f64) -> Self {
        nearest_by(&Self::ALL, multiplier, |a| a.multiplier())
    }
}

fn nearest_by<T: Copy>(all: &[T], target: f64, key: impl Fn(T) -> f64) -> T {
    let mut best = all[0];
    for &candidate in &all[1..] {
        if (key(candidate) - target).abs() < (key(best) - target).abs() {
            best = candidate;
        }
    }
    best
}

/// Per-tick regen and ammo multiplier used by the scoring model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub regen_per_tick: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub ammo_multiplier: f64,
}

impl Scenario {
    /// Scenario for a named healing item and ammo tier.
    pub fn new(healing: HealingItem, ammo: AmmoTier) -> Self {
        Self {
            regen_per_tick: healing.regen(),
            ammo_multiplier: ammo.multiplier(),
        }
    }

    /// Scenario from raw numbers; non-finite values become 0.
    pub fn from_raw(regen_per_tick: f64, ammo_multiplier: f64) -> Self {
        Self {
            regen_per_tick: finite_or_zero(regen_per_tick),
            ammo_multiplier: finite_or_zero(ammo_multiplier),
        }
    }

    /// Healing item used for food pricing.
    pub fn healing_item(&self) -> HealingItem {
        HealingItem::nearest(self.regen_per_tick)
    }

    /// Ammo tier used for ammo pricing.
    pub fn ammo_tier(&self) -> AmmoTier {
        AmmoTier::nearest(self.ammo_multiplier)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(HealingItem::default(), AmmoTier::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_roundtrip_per_skill() {
        let mut m = Modifiers::none();
        for (i, &skill) in Skill::ALL.iter().enumerate() {
            m = m.with_bonus(skill, i as f64 + 1.0);
        }
        for (i, &skill) in Skill::ALL.iter().enumerate() {
            assert_eq!(m.bonus(skill), i as f64 + 1.0);
        }
    }

    #[test]
    fn test_sanitized_drops_non_finite() {
        let m = Modifiers::none()
            .with_bonus(Skill::Armor, f64::NAN)
            .with_bonus(Skill::Attack, f64::INFINITY)
            .with_bonus(Skill::Dodge, 0.05)
            .sanitized();
        assert_eq!(m.armor_bonus, 0.0);
        assert_eq!(m.attack_bonus, 0.0);
        assert_eq!(m.dodge_bonus, 0.05);
    }

    #[test]
    fn test_combined_adds() {
        let a = Modifiers::none().with_bonus(Skill::Armor, 0.05);
        let b = Modifiers::none().with_bonus(Skill::Armor, 0.03);
        assert!((a.combined(&b).armor_bonus - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_tiers() {
        assert_eq!(HealingItem::nearest(20.0), HealingItem::Steak);
        assert_eq!(HealingItem::nearest(0.0), HealingItem::Bread);
        assert_eq!(HealingItem::nearest(100.0), HealingItem::CookedFish);
        assert_eq!(AmmoTier::nearest(0.2), AmmoTier::Standard);
        assert_eq!(AmmoTier::nearest(0.4), AmmoTier::Heavy);
    }

    #[test]
    fn test_scenario_from_named_choices() {
        let s = Scenario::new(HealingItem::CookedFish, AmmoTier::Heavy);
        assert_eq!(s.regen_per_tick, 30.0);
        assert_eq!(s.ammo_multiplier, 0.3);
        assert_eq!(s.healing_item(), HealingItem::CookedFish);
        assert_eq!(s.ammo_tier(), AmmoTier::Heavy);
    }

    #[test]
    fn test_modifiers_deserialize_leniently() {
        let m: Modifiers =
            serde_json::from_str(r#"{"attackBonus": "25", "armorBonus": null, "dodgeBonus": 0.04}"#)
                .unwrap();
        assert_eq!(m.attack_bonus, 25.0);
        assert_eq!(m.armor_bonus, 0.0);
        assert_eq!(m.dodge_bonus, 0.04);
        assert_eq!(m.health_bonus, 0.0);
    }
}
