//! Equipment slots and rarity tiers.

use serde::{Deserialize, Serialize};

use crate::input::deserialize_lenient_f64;
use crate::modifier::Modifiers;
use crate::price::{ItemCode, ItemPrices};

/// Equipment rarity, which fixes the crafting bill of materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl EquipmentTier {
    pub const ALL: [EquipmentTier; 6] = [
        EquipmentTier::Common,
        EquipmentTier::Uncommon,
        EquipmentTier::Rare,
        EquipmentTier::Epic,
        EquipmentTier::Legendary,
        EquipmentTier::Mythic,
    ];

    /// Scraps and steel needed to craft one piece: `(scraps, steel)`.
    pub const fn materials(self) -> (f64, f64) {
        match self {
            EquipmentTier::Common => (6.0, 1.0),
            EquipmentTier::Uncommon => (18.0, 2.0),
            EquipmentTier::Rare => (54.0, 4.0),
            EquipmentTier::Epic => (162.0, 8.0),
            EquipmentTier::Legendary => (486.0, 16.0),
            EquipmentTier::Mythic => (1458.0, 32.0),
        }
    }

    /// Market cost of crafting one piece at this tier.
    pub fn craft_cost(self, prices: &ItemPrices) -> f64 {
        let (scraps, steel) = self.materials();
        scraps * prices.get(ItemCode::Scraps) + steel * prices.get(ItemCode::Steel)
    }

    /// Parses a tier name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EquipmentTier::Common => "common",
            EquipmentTier::Uncommon => "uncommon",
            EquipmentTier::Rare => "rare",
            EquipmentTier::Epic => "epic",
            EquipmentTier::Legendary => "legendary",
            EquipmentTier::Mythic => "mythic",
        }
    }
}

/// Stat bonuses of each worn equipment slot.
///
/// Weapons roll damage and crit chance, helmets crit damage, chest and pants
/// armor, boots dodge and gloves precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentLoadout {
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub weapon_damage: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub weapon_crit_chance: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub helmet_crit_damage: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub chest_armor: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub pants_armor: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub boots_dodge: f64,
    #[serde(deserialize_with = "deserialize_lenient_f64")]
    pub gloves_precision: f64,
}

impl EquipmentLoadout {
    /// Folds the slots into per-dimension bonuses.
    pub fn to_modifiers(&self) -> Modifiers {
        Modifiers {
            attack_bonus: self.weapon_damage,
            precision_bonus: self.gloves_precision,
            crit_chance_bonus: self.weapon_crit_chance,
            crit_damage_bonus: self.helmet_crit_damage,
            armor_bonus: self.chest_armor + self.pants_armor,
            dodge_bonus: self.boots_dodge,
            ..Modifiers::default()
        }
        .sanitized()
    }
}

impl From<EquipmentLoadout> for Modifiers {
    fn from(loadout: EquipmentLoadout) -> Self {
        loadout.to_modifiers()
    }
}
