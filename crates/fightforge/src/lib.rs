//! FightForge - exhaustive skill build optimizer
//!
//! Finds the skill level assignments that deal the most damage per day for a
//! point budget, optionally pricing each build's daily upkeep from the game
//! market.
//!
//! # Example
//!
//! ```rust
//! use fightforge::prelude::*;
//!
//! let scenario = Scenario::new(HealingItem::Steak, AmmoTier::Standard);
//! let model = FightModel::new(Modifiers::none(), scenario);
//! let build = model.evaluate(SkillLevels::zero().with(Skill::Attack, 10));
//! assert_eq!(build.point_cost, 55);
//! ```

// Scoring model
pub use fightforge_core::{
    evaluate_cost, evaluate_damage, level_cost, AmmoTier, BuildScorer, Candidate,
    EffectiveStats, EquipmentLoadout, EquipmentTier, FightForgeError, FightModel, HealingItem,
    ItemCode, ItemPrices, Modifiers, Result, Scenario, Skill, SkillLevels, UnitPrices,
};

// Configuration
pub use fightforge_config::{OptimizerConfig, SelectionConfig};

// Price feed
pub use fightforge_prices::{HttpPriceSource, PriceError, PriceSource, StaticPriceSource};

// Search
pub use fightforge_solver::{
    run_search, BuildSearch, CancelToken, SearchEvent, SearchManager, SearchOutcome,
    SearchReceiver, SearchRequest, SearchSpace, SearchStatus,
};

mod optimize;
pub use optimize::{load_config, optimize, optimize_with, CONFIG_FILE};

#[cfg(feature = "console")]
pub use fightforge_console as console;

pub mod prelude {
    pub use super::{optimize, optimize_with};
    pub use super::{
        AmmoTier, BuildScorer, Candidate, EquipmentTier, FightModel, HealingItem, Modifiers,
        Scenario, Skill, SkillLevels,
    };
    pub use super::{OptimizerConfig, SearchEvent, SearchManager, SearchRequest};
}
