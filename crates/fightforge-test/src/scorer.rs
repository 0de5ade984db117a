//! Deterministic scorers.

use std::sync::atomic::{AtomicU64, Ordering};

use fightforge_core::{BuildScorer, SkillLevels, SKILL_COUNT};

/// Damage is a weighted sum of levels; cost, when enabled, is the sum of
/// levels.
///
/// # Example
///
/// ```
/// use fightforge_core::{BuildScorer, SkillLevels};
/// use fightforge_test::scorer::WeightedScorer;
///
/// let scorer = WeightedScorer::new([3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
/// assert_eq!(scorer.damage(&SkillLevels::new([1, 1, 1, 0, 0, 0, 0, 0])), 6.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WeightedScorer {
    pub weights: [f64; SKILL_COUNT],
    pub cost_aware: bool,
}

impl WeightedScorer {
    pub fn new(weights: [f64; SKILL_COUNT]) -> Self {
        Self {
            weights,
            cost_aware: false,
        }
    }

    /// Enables the level-sum cost.
    pub fn with_cost(mut self) -> Self {
        self.cost_aware = true;
        self
    }
}

impl BuildScorer for WeightedScorer {
    fn damage(&self, levels: &SkillLevels) -> f64 {
        levels
            .as_array()
            .iter()
            .zip(self.weights.iter())
            .map(|(&l, &w)| l as f64 * w)
            .sum()
    }

    fn cost(&self, levels: &SkillLevels) -> Option<f64> {
        self.cost_aware
            .then(|| levels.as_array().iter().map(|&l| l as f64).sum())
    }

    fn is_cost_aware(&self) -> bool {
        self.cost_aware
    }
}

/// Scores every build equally and counts evaluations.
#[derive(Debug, Default)]
pub struct CountingScorer {
    evaluations: AtomicU64,
}

impl CountingScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl BuildScorer for CountingScorer {
    fn damage(&self, _levels: &SkillLevels) -> f64 {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        1.0
    }
}
