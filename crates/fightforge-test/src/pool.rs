//! Synthetic candidate pools.
//!
//! # Example
//!
//! ```
//! use fightforge_test::pool::synthetic_pool;
//!
//! let pool = synthetic_pool(100);
//! assert_eq!(pool.len(), 100);
//! assert!(pool.windows(2).all(|w| w[0].daily_damage >= w[1].daily_damage));
//! ```

use fightforge_core::{Candidate, SkillLevels};

/// A candidate with the given damage and cost and zeroed levels.
pub fn candidate(damage: f64, cost: f64) -> Candidate {
    Candidate {
        levels: SkillLevels::zero(),
        point_cost: 0,
        daily_damage: damage,
        daily_cost: Some(cost),
    }
}

/// `n` candidates ranked by damage, best first.
///
/// Costs are scattered with a fixed stride so that damage and cost are
/// uncorrelated and every tertile gets members. Damages are distinct.
pub fn synthetic_pool(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            let damage = 10_000.0 - i as f64 * 7.5;
            let cost = ((i * 37) % 101) as f64 + 0.25;
            candidate(damage, cost)
        })
        .collect()
}
