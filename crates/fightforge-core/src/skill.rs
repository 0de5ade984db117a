//! Skill dimensions, level effect tables and point costs.
//!
//! A build assigns a level in `0..=10` to each of the eight skill
//! dimensions. Every level maps through a fixed table to the value the
//! scoring model consumes, and through [`COST_TABLE`] to the skill points it
//! consumes. Dimensions are costed independently.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of skill dimensions in a build.
pub const SKILL_COUNT: usize = 8;

/// Number of levels per skill dimension (0 through 10).
pub const LEVEL_COUNT: usize = 11;

/// Highest level a skill can reach.
pub const MAX_LEVEL: u8 = 10;

/// Cumulative skill point cost of reaching each level.
pub const COST_TABLE: [u32; LEVEL_COUNT] = [0, 1, 3, 6, 10, 15, 21, 28, 36, 45, 55];

const ATTACK: [f64; LEVEL_COUNT] = [
    100.0, 120.0, 140.0, 160.0, 180.0, 200.0, 220.0, 240.0, 260.0, 280.0, 300.0,
];
const PRECISION: [f64; LEVEL_COUNT] = [
    0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90, 0.95, 1.00,
];
const CRITICAL_CHANCE: [f64; LEVEL_COUNT] = [
    0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60,
];
const CRITICAL_DAMAGE: [f64; LEVEL_COUNT] = [
    1.00, 1.20, 1.40, 1.60, 1.80, 2.00, 2.20, 2.40, 2.60, 2.80, 3.00,
];
const ARMOR: [f64; LEVEL_COUNT] = [
    0.00, 0.04, 0.08, 0.12, 0.16, 0.20, 0.24, 0.28, 0.32, 0.36, 0.40,
];
const DODGE: [f64; LEVEL_COUNT] = [
    0.00, 0.04, 0.08, 0.12, 0.16, 0.20, 0.24, 0.28, 0.32, 0.36, 0.40,
];
const HEALTH: [f64; LEVEL_COUNT] = [
    50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 130.0, 140.0, 150.0,
];
const HUNGER: [f64; LEVEL_COUNT] = [4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0];

/// Returns the point cost of a single skill level.
///
/// Levels above [`MAX_LEVEL`] are costed as [`MAX_LEVEL`].
#[inline]
pub const fn level_cost(level: u8) -> u32 {
    let level = if level > MAX_LEVEL { MAX_LEVEL } else { level };
    COST_TABLE[level as usize]
}

/// One of the eight skill dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Attack,
    Precision,
    CriticalChance,
    CriticalDamage,
    Armor,
    Dodge,
    Health,
    Hunger,
}

impl Skill {
    /// All dimensions in canonical order (most significant digit first).
    pub const ALL: [Skill; SKILL_COUNT] = [
        Skill::Attack,
        Skill::Precision,
        Skill::CriticalChance,
        Skill::CriticalDamage,
        Skill::Armor,
        Skill::Dodge,
        Skill::Health,
        Skill::Hunger,
    ];

    /// Position of this dimension in a [`SkillLevels`] tuple.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The level effect table for this dimension.
    pub const fn table(self) -> &'static [f64; LEVEL_COUNT] {
        match self {
            Skill::Attack => &ATTACK,
            Skill::Precision => &PRECISION,
            Skill::CriticalChance => &CRITICAL_CHANCE,
            Skill::CriticalDamage => &CRITICAL_DAMAGE,
            Skill::Armor => &ARMOR,
            Skill::Dodge => &DODGE,
            Skill::Health => &HEALTH,
            Skill::Hunger => &HUNGER,
        }
    }

    /// Base effect value at `level`, before modifiers.
    #[inline]
    pub fn value_at(self, level: u8) -> f64 {
        self.table()[level.min(MAX_LEVEL) as usize]
    }

    /// Whether the value is a ratio that displays as a percentage.
    pub const fn is_ratio(self) -> bool {
        matches!(
            self,
            Skill::Precision
                | Skill::CriticalChance
                | Skill::CriticalDamage
                | Skill::Armor
                | Skill::Dodge
        )
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Skill::Attack => "attack",
            Skill::Precision => "precision",
            Skill::CriticalChance => "critChance",
            Skill::CriticalDamage => "critDamage",
            Skill::Armor => "armor",
            Skill::Dodge => "dodge",
            Skill::Health => "health",
            Skill::Hunger => "hunger",
        }
    }

    /// Formats an effect value the way the result table shows it:
    /// ratios as rounded percentages, everything else as-is.
    pub fn format_value(self, value: f64) -> String {
        if self.is_ratio() {
            format!("{}%", (value * 100.0).round())
        } else {
            format!("{}", value)
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A level assignment for all eight skill dimensions.
///
/// Levels are always within `0..=MAX_LEVEL`; constructors clamp.
///
/// # Examples
///
/// ```
/// use fightforge_core::{Skill, SkillLevels};
///
/// let levels = SkillLevels::zero().with(Skill::Attack, 10).with(Skill::Armor, 2);
/// assert_eq!(levels.get(Skill::Attack), 10);
/// assert_eq!(levels.point_cost(), 55 + 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillLevels([u8; SKILL_COUNT]);

impl SkillLevels {
    /// Creates a level assignment, clamping each level to [`MAX_LEVEL`].
    pub fn new(levels: [u8; SKILL_COUNT]) -> Self {
        Self(levels.map(|l| l.min(MAX_LEVEL)))
    }

    /// All dimensions at level 0.
    pub const fn zero() -> Self {
        Self([0; SKILL_COUNT])
    }

    /// Level of one dimension.
    #[inline]
    pub fn get(&self, skill: Skill) -> u8 {
        self.0[skill.index()]
    }

    /// Returns a copy with one dimension set to `level` (clamped).
    pub fn with(mut self, skill: Skill, level: u8) -> Self {
        self.0[skill.index()] = level.min(MAX_LEVEL);
        self
    }

    /// The raw level tuple in canonical order.
    #[inline]
    pub fn as_array(&self) -> &[u8; SKILL_COUNT] {
        &self.0
    }

    /// Total skill points spent: the sum of per-dimension costs.
    #[inline]
    pub fn point_cost(&self) -> u32 {
        self.0.iter().map(|&l| level_cost(l)).sum()
    }

    /// Base effect value of one dimension, before modifiers.
    #[inline]
    pub fn base_value(&self, skill: Skill) -> f64 {
        skill.value_at(self.get(skill))
    }
}

impl From<[u8; SKILL_COUNT]> for SkillLevels {
    fn from(levels: [u8; SKILL_COUNT]) -> Self {
        Self::new(levels)
    }
}

impl fmt::Display for SkillLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|l| l.to_string()).collect();
        write!(f, "[{}]", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_table_is_monotonic_and_convex() {
        for w in COST_TABLE.windows(3) {
            assert!(w[1] > w[0]);
            assert!(w[2] - w[1] > w[1] - w[0]);
        }
    }

    #[test]
    fn test_level_cost_clamps() {
        assert_eq!(level_cost(0), 0);
        assert_eq!(level_cost(10), 55);
        assert_eq!(level_cost(42), 55);
    }

    #[test]
    fn test_table_endpoints() {
        assert_eq!(Skill::Attack.value_at(0), 100.0);
        assert_eq!(Skill::Attack.value_at(10), 300.0);
        assert_eq!(Skill::Armor.value_at(0), 0.0);
        assert_eq!(Skill::Armor.value_at(10), 0.40);
        assert_eq!(Skill::Hunger.value_at(10), 14.0);
        assert_eq!(Skill::CriticalDamage.value_at(5), 2.0);
    }

    #[test]
    fn test_new_clamps_levels() {
        let levels = SkillLevels::new([11, 0, 0, 0, 0, 0, 0, 255]);
        assert_eq!(levels.get(Skill::Attack), 10);
        assert_eq!(levels.get(Skill::Hunger), 10);
    }

    #[test]
    fn test_point_cost_sums_dimensions() {
        let levels = SkillLevels::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(levels.point_cost(), 1 + 3 + 6 + 10 + 15 + 21 + 28 + 36);
    }

    #[test]
    fn test_canonical_order() {
        for (i, skill) in Skill::ALL.iter().enumerate() {
            assert_eq!(skill.index(), i);
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(Skill::Precision.format_value(0.75), "75%");
        assert_eq!(Skill::CriticalDamage.format_value(2.2), "220%");
        assert_eq!(Skill::Attack.format_value(180.0), "180");
    }

    #[test]
    fn test_display() {
        let levels = SkillLevels::zero().with(Skill::Dodge, 3);
        assert_eq!(levels.to_string(), "[0,0,0,0,0,3,0,0]");
    }
}
