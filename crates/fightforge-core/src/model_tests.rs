//! Tests for the damage and cost model.

use proptest::prelude::*;

use crate::candidate::Candidate;
use crate::model::*;
use crate::modifier::{AmmoTier, HealingItem, Modifiers, Scenario};
use crate::price::UnitPrices;
use crate::skill::{Skill, SkillLevels, COST_TABLE, SKILL_COUNT};

fn level_zero() -> EffectiveStats {
    EffectiveStats::from_levels(&SkillLevels::zero(), &Modifiers::none())
}

#[test]
fn test_level_zero_stats() {
    let stats = level_zero();
    assert_eq!(stats.attack, 100.0);
    assert_eq!(stats.precision, 0.5);
    assert_eq!(stats.health, 50.0);
    assert_eq!(stats.hunger, 4.0);
    assert_eq!(stats.food_per_day(), 9.0);
    assert_eq!(stats.daily_health_pool(10.0), 210.0);
}

#[test]
fn test_damage_worked_example() {
    // attack 300, precision 1.0: every hit lands, 10% crit at x1.0
    let levels = SkillLevels::zero()
        .with(Skill::Attack, 10)
        .with(Skill::Precision, 10);
    let stats = EffectiveStats::from_levels(&levels, &Modifiers::none());
    assert_eq!(stats.expected_hit(), 300.0);

    let scenario = Scenario::new(HealingItem::Steak, AmmoTier::Standard);
    // pool = 120 + 9 * 20 = 300 -> 30 attacks; round(300 * 1.2) = 360
    assert_eq!(evaluate_damage(&stats, &scenario), 30.0 * 360.0);
}

#[test]
fn test_armor_and_dodge_buy_attacks() {
    let levels = SkillLevels::zero().with(Skill::Armor, 5).with(Skill::Dodge, 5);
    let stats = EffectiveStats::from_levels(&levels, &Modifiers::none());
    // pool 210 / (10 * 0.8) = 26.25 -> 26, * 1.2 = 31.2 -> 31
    assert_eq!(stats.paid_attacks(10.0), 26.0);
    assert_eq!(stats.attacks_per_day(10.0), 31.0);
}

#[test]
fn test_degenerate_armor_is_clamped() {
    for bonus in [0.6, 1.0, 5.0, f64::INFINITY] {
        let levels = SkillLevels::zero().with(Skill::Armor, 10);
        let modifiers = Modifiers::none().with_bonus(Skill::Armor, bonus);
        let stats = EffectiveStats::from_levels(&levels, &modifiers);
        assert_eq!(stats.clamped_armor(), MAX_ARMOR);
        let damage = evaluate_damage(&stats, &Scenario::default());
        assert!(damage.is_finite(), "armor bonus {bonus} gave {damage}");
    }
}

#[test]
fn test_fight_model_sanitizes_modifiers() {
    let modifiers = Modifiers::none().with_bonus(Skill::Armor, f64::NAN);
    let model = FightModel::new(modifiers, Scenario::default());
    let candidate = model.evaluate(SkillLevels::zero());
    assert!(candidate.daily_damage.is_finite());
    assert_eq!(model.modifiers().armor_bonus, 0.0);
}

#[test]
fn test_cost_worked_example() {
    let stats = level_zero();
    let prices = UnitPrices {
        food: 1.0,
        ammo: 0.1,
        weapon: 10.0,
        armor: 20.0,
    };
    // 21 attacks, no dodge: food 9, ammo 2.1, weapon 2.1, armor 4.2
    let cost = evaluate_cost(&stats, &Scenario::from_raw(10.0, 0.1), &prices);
    assert!((cost - 17.4).abs() < 1e-9);
}

#[test]
fn test_cost_counts_dodged_attacks_for_ammo_only() {
    let levels = SkillLevels::zero().with(Skill::Dodge, 10);
    let stats = EffectiveStats::from_levels(&levels, &Modifiers::none());
    let ammo_only = UnitPrices {
        ammo: 1.0,
        ..UnitPrices::default()
    };
    let armor_only = UnitPrices {
        armor: 100.0,
        ..UnitPrices::default()
    };
    let scenario = Scenario::from_raw(10.0, 0.1);
    // 21 paid attacks, floor(21 * 0.4) = 8 dodged
    assert_eq!(evaluate_cost(&stats, &scenario, &ammo_only), 29.0);
    assert_eq!(evaluate_cost(&stats, &scenario, &armor_only), 21.0);
}

#[test]
fn test_cost_with_zero_prices_is_zero() {
    let cost = evaluate_cost(&level_zero(), &Scenario::default(), &UnitPrices::default());
    assert_eq!(cost, 0.0);
}

#[test]
fn test_model_evaluate_matches_free_functions() {
    let modifiers = Modifiers::none()
        .with_bonus(Skill::Attack, 35.0)
        .with_bonus(Skill::Dodge, 0.05);
    let scenario = Scenario::new(HealingItem::CookedFish, AmmoTier::Heavy);
    let prices = UnitPrices {
        food: 3.0,
        ammo: 1.5,
        weapon: 40.0,
        armor: 40.0,
    };
    let model = FightModel::new(modifiers, scenario).with_unit_prices(prices);
    let levels = SkillLevels::new([3, 4, 2, 6, 1, 5, 0, 7]);

    let Candidate {
        point_cost,
        daily_damage,
        daily_cost,
        ..
    } = model.evaluate(levels);
    let stats = EffectiveStats::from_levels(&levels, &modifiers);
    assert_eq!(point_cost, levels.point_cost());
    assert_eq!(daily_damage, evaluate_damage(&stats, &scenario));
    assert_eq!(daily_cost, Some(evaluate_cost(&stats, &scenario, &prices)));
    assert!(model.is_cost_aware());
}

#[test]
fn test_evaluation_is_bit_identical() {
    let model = FightModel::new(
        Modifiers::none().with_bonus(Skill::Precision, 0.07),
        Scenario::from_raw(20.0, 0.3),
    );
    let levels = SkillLevels::new([9, 2, 7, 3, 4, 8, 1, 6]);
    let a = model.evaluate(levels);
    let b = model.evaluate(levels);
    assert_eq!(a.daily_damage.to_bits(), b.daily_damage.to_bits());
}

fn levels_strategy() -> impl Strategy<Value = [u8; SKILL_COUNT]> {
    prop::array::uniform8(0u8..=10)
}

fn stats_strategy() -> impl Strategy<Value = EffectiveStats> {
    (
        (50.0..600.0f64, 0.0..1.0f64, 0.0..0.9f64, 1.2..4.0f64),
        (0.0..0.98f64, 0.0..1.0f64, 0.0..300.0f64, 0.0..30.0f64),
    )
        .prop_map(
            |((attack, precision, crit_chance, crit_damage), (armor, dodge, health, hunger))| {
                EffectiveStats {
                    attack,
                    precision,
                    crit_chance,
                    crit_damage,
                    armor,
                    dodge,
                    health,
                    hunger,
                }
            },
        )
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (prop::sample::select(vec![10.0, 20.0, 30.0]), 0.0..0.5f64)
        .prop_map(|(regen, ammo)| Scenario::from_raw(regen, ammo))
}

proptest! {
    // Point cost is the sum of the per-dimension table lookups.
    #[test]
    fn point_cost_is_additive(levels in levels_strategy()) {
        let expected: u32 = levels.iter().map(|&l| COST_TABLE[l as usize]).sum();
        prop_assert_eq!(SkillLevels::new(levels).point_cost(), expected);
    }

    // Moving levels between dimensions does not change the cost.
    #[test]
    fn point_cost_is_order_independent(levels in levels_strategy(), shift in 0usize..SKILL_COUNT) {
        let mut rotated = levels;
        rotated.rotate_left(shift);
        prop_assert_eq!(
            SkillLevels::new(levels).point_cost(),
            SkillLevels::new(rotated).point_cost()
        );
    }

    #[test]
    fn damage_non_decreasing_in_attack(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.0..200.0f64
    ) {
        let better = EffectiveStats { attack: stats.attack + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    #[test]
    fn damage_non_decreasing_in_precision(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.01..0.5f64
    ) {
        let better = EffectiveStats { precision: stats.precision + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    #[test]
    fn damage_non_decreasing_in_crit_chance(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.01..0.5f64
    ) {
        let better = EffectiveStats { crit_chance: stats.crit_chance + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    #[test]
    fn damage_non_decreasing_in_crit_damage(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.0..2.0f64
    ) {
        let better = EffectiveStats { crit_damage: stats.crit_damage + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    #[test]
    fn damage_non_decreasing_in_armor(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.0..1.0f64
    ) {
        let better = EffectiveStats { armor: stats.armor + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    #[test]
    fn damage_non_decreasing_in_dodge(
        stats in stats_strategy(), scenario in scenario_strategy(), delta in 0.0..1.0f64
    ) {
        let better = EffectiveStats { dodge: stats.dodge + delta, ..stats };
        prop_assert!(evaluate_damage(&better, &scenario) >= evaluate_damage(&stats, &scenario));
    }

    // Any finite armor bonus keeps the model finite.
    #[test]
    fn damage_finite_for_any_armor(levels in levels_strategy(), armor in -10.0..10.0f64) {
        let model = FightModel::new(
            Modifiers::none().with_bonus(Skill::Armor, armor),
            Scenario::default(),
        );
        prop_assert!(model.evaluate(SkillLevels::new(levels)).daily_damage.is_finite());
    }
}
