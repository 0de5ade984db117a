//! The daily damage and daily cost model.
//!
//! A build's effective stats are the table values at its levels plus the
//! flat modifier bonuses. From those the model derives a daily health pool,
//! the number of attacks it buys, and the expected damage per attack.
//!
//! ```text
//! pool      = health * K + floor(hunger * K) * regen          K = 2.4
//! attacks   = floor(floor(pool / (10 * (1 - armor))) * (1 + dodge))
//! per_hit   = attack * (1 - precision)
//!           + attack * precision * (1 - crit_chance)
//!           + attack * precision * crit_chance * crit_damage
//! damage    = attacks * round(per_hit * (1 + ammo))
//! ```
//!
//! Dodge does not reduce damage taken; it buys extra attacks out of the same
//! pool. Armor is clamped to [`MAX_ARMOR`] so the divisor stays positive.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::modifier::{Modifiers, Scenario};
use crate::price::UnitPrices;
use crate::skill::{Skill, SkillLevels};

/// Food ticks per day.
pub const TICKS_PER_DAY: f64 = 2.4;

/// Health lost per attack before armor.
pub const HEALTH_PER_ATTACK: f64 = 10.0;

/// Armor is clamped to this value before it divides anything.
pub const MAX_ARMOR: f64 = 0.99;

/// Rounds half-way cases towards positive infinity.
#[inline]
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Skill values after equipment bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveStats {
    pub attack: f64,
    pub precision: f64,
    pub crit_chance: f64,
    pub crit_damage: f64,
    pub armor: f64,
    pub dodge: f64,
    pub health: f64,
    pub hunger: f64,
}

impl EffectiveStats {
    /// Table values at `levels` plus the additive `modifiers`.
    pub fn from_levels(levels: &SkillLevels, modifiers: &Modifiers) -> Self {
        let value = |skill: Skill| levels.base_value(skill) + modifiers.bonus(skill);
        Self {
            attack: value(Skill::Attack),
            precision: value(Skill::Precision),
            crit_chance: value(Skill::CriticalChance),
            crit_damage: value(Skill::CriticalDamage),
            armor: value(Skill::Armor),
            dodge: value(Skill::Dodge),
            health: value(Skill::Health),
            hunger: value(Skill::Hunger),
        }
    }

    /// Value of one dimension.
    pub fn get(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Attack => self.attack,
            Skill::Precision => self.precision,
            Skill::CriticalChance => self.crit_chance,
            Skill::CriticalDamage => self.crit_damage,
            Skill::Armor => self.armor,
            Skill::Dodge => self.dodge,
            Skill::Health => self.health,
            Skill::Hunger => self.hunger,
        }
    }

    /// Armor actually used by the model: never at or above [`MAX_ARMOR`].
    #[inline]
    pub fn clamped_armor(&self) -> f64 {
        // f64::min returns MAX_ARMOR for a NaN armor.
        self.armor.min(MAX_ARMOR)
    }

    /// Food items eaten per day.
    #[inline]
    pub fn food_per_day(&self) -> f64 {
        (self.hunger * TICKS_PER_DAY).floor()
    }

    /// Health available per day: natural regen plus food.
    #[inline]
    pub fn daily_health_pool(&self, regen_per_tick: f64) -> f64 {
        self.health * TICKS_PER_DAY + self.food_per_day() * regen_per_tick
    }

    /// Attacks the pool pays for, before dodge.
    #[inline]
    pub fn paid_attacks(&self, regen_per_tick: f64) -> f64 {
        let per_attack = HEALTH_PER_ATTACK * (1.0 - self.clamped_armor());
        (self.daily_health_pool(regen_per_tick) / per_attack).floor()
    }

    /// Attacks per day including the ones dodge makes free.
    #[inline]
    pub fn attacks_per_day(&self, regen_per_tick: f64) -> f64 {
        (self.paid_attacks(regen_per_tick) * (1.0 + self.dodge)).floor()
    }

    /// Expected damage of one attack before ammo.
    #[inline]
    pub fn expected_hit(&self) -> f64 {
        let miss = self.attack * (1.0 - self.precision);
        let normal = self.attack * self.precision * (1.0 - self.crit_chance);
        let crit = self.attack * self.precision * self.crit_chance * self.crit_damage;
        miss + normal + crit
    }
}

/// Daily damage output of a build.
///
/// # Examples
///
/// ```
/// use fightforge_core::{evaluate_damage, EffectiveStats, Modifiers, Scenario, SkillLevels};
///
/// let stats = EffectiveStats::from_levels(&SkillLevels::zero(), &Modifiers::none());
/// let damage = evaluate_damage(&stats, &Scenario::from_raw(10.0, 0.1));
/// // pool = 120 + 9 * 10 = 210, 21 attacks, round(100 * 1.1) = 110 per hit
/// assert_eq!(damage, 21.0 * 110.0);
/// ```
pub fn evaluate_damage(stats: &EffectiveStats, scenario: &Scenario) -> f64 {
    let attacks = stats.attacks_per_day(scenario.regen_per_tick);
    let per_hit = round_half_up(stats.expected_hit() * (1.0 + scenario.ammo_multiplier));
    attacks * per_hit
}

/// Daily resource cost of a build.
///
/// Food is bought per tick, every attack (dodged or not) fires a round and
/// wears 1% of the weapon, and every paid attack wears 1% of the armor.
pub fn evaluate_cost(stats: &EffectiveStats, scenario: &Scenario, prices: &UnitPrices) -> f64 {
    let attacks = stats.paid_attacks(scenario.regen_per_tick);
    let dodged = (attacks * stats.dodge).floor();
    let fired = attacks + dodged;

    let food = stats.food_per_day() * prices.food;
    let ammo = fired * prices.ammo;
    let weapon_wear = fired * (prices.weapon / 100.0);
    let armor_wear = attacks * (prices.armor / 100.0);
    food + ammo + weapon_wear + armor_wear
}

/// Scores skill level assignments.
///
/// The search engine is generic over this trait so it can run against the
/// fight model or against synthetic scorers in tests.
pub trait BuildScorer: Send + Sync + Debug {
    /// Daily damage of a build.
    fn damage(&self, levels: &SkillLevels) -> f64;

    /// Daily cost of a build, or `None` when the scorer is not cost-aware.
    fn cost(&self, _levels: &SkillLevels) -> Option<f64> {
        None
    }

    /// Whether [`cost`](Self::cost) returns values.
    fn is_cost_aware(&self) -> bool {
        false
    }

    /// Scores a build into a candidate.
    fn evaluate(&self, levels: SkillLevels) -> Candidate {
        Candidate {
            levels,
            point_cost: levels.point_cost(),
            daily_damage: self.damage(&levels),
            daily_cost: self.cost(&levels),
        }
    }
}

/// The fight model: modifiers, scenario and optional unit prices.
///
/// # Examples
///
/// ```
/// use fightforge_core::{BuildScorer, FightModel, Modifiers, Scenario, SkillLevels};
///
/// let model = FightModel::new(Modifiers::none(), Scenario::from_raw(10.0, 0.1));
/// let candidate = model.evaluate(SkillLevels::zero());
/// assert_eq!(candidate.point_cost, 0);
/// assert!(candidate.daily_cost.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FightModel {
    modifiers: Modifiers,
    scenario: Scenario,
    unit_prices: Option<UnitPrices>,
}

impl FightModel {
    /// A damage-only model.
    pub fn new(modifiers: Modifiers, scenario: Scenario) -> Self {
        Self {
            modifiers: modifiers.sanitized(),
            scenario: Scenario::from_raw(scenario.regen_per_tick, scenario.ammo_multiplier),
            unit_prices: None,
        }
    }

    /// Makes the model cost-aware.
    pub fn with_unit_prices(mut self, prices: UnitPrices) -> Self {
        self.unit_prices = Some(prices);
        self
    }

    pub fn modifiers(&self) -> &Modifiers {
        &self.modifiers
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn unit_prices(&self) -> Option<&UnitPrices> {
        self.unit_prices.as_ref()
    }

    /// Effective stats of a build under this model's modifiers.
    #[inline]
    pub fn stats(&self, levels: &SkillLevels) -> EffectiveStats {
        EffectiveStats::from_levels(levels, &self.modifiers)
    }
}

impl BuildScorer for FightModel {
    fn damage(&self, levels: &SkillLevels) -> f64 {
        evaluate_damage(&self.stats(levels), &self.scenario)
    }

    fn cost(&self, levels: &SkillLevels) -> Option<f64> {
        self.unit_prices
            .as_ref()
            .map(|prices| evaluate_cost(&self.stats(levels), &self.scenario, prices))
    }

    fn is_cost_aware(&self) -> bool {
        self.unit_prices.is_some()
    }

    fn evaluate(&self, levels: SkillLevels) -> Candidate {
        let stats = self.stats(&levels);
        Candidate {
            levels,
            point_cost: levels.point_cost(),
            daily_damage: evaluate_damage(&stats, &self.scenario),
            daily_cost: self
                .unit_prices
                .as_ref()
                .map(|prices| evaluate_cost(&stats, &self.scenario, prices)),
        }
    }
}
