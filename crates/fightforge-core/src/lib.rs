//! FightForge Core - skill data and the scoring model
//!
//! This crate provides the leaf abstractions for the build optimizer:
//! - Skill dimensions, per-level effect tables and the point cost table
//! - Modifier bundles (equipment bonuses, healing item, ammo tier)
//! - The daily damage and daily cost model
//! - Item price snapshots and the unit prices derived from them
//! - Scored candidates
//!
//! Everything here is pure and deterministic: the same inputs always produce
//! bit-identical outputs.

pub mod candidate;
pub mod equipment;
pub mod error;
pub mod input;
pub mod model;
pub mod modifier;
pub mod price;
pub mod skill;

#[cfg(test)]
mod model_tests;

pub use candidate::Candidate;
pub use equipment::{EquipmentLoadout, EquipmentTier};
pub use error::{FightForgeError, Result};
pub use input::{lenient_float, lenient_int};
pub use model::{
    evaluate_cost, evaluate_damage, BuildScorer, EffectiveStats, FightModel, MAX_ARMOR,
    TICKS_PER_DAY,
};
pub use modifier::{AmmoTier, HealingItem, Modifiers, Scenario};
pub use price::{ItemCode, ItemPrices, UnitPrices};
pub use skill::{level_cost, Skill, SkillLevels, COST_TABLE, LEVEL_COUNT, MAX_LEVEL, SKILL_COUNT};
