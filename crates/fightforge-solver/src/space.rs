//! The skill-level configuration space.
//!
//! Combinations are indexed by a single integer read as a base-`levels`
//! number with one digit per dimension, most significant digit first. The
//! full space has 8 dimensions of 11 levels; reduced spaces keep the
//! leading dimensions and hold the rest at level 0.

use fightforge_core::{FightForgeError, Result, SkillLevels, LEVEL_COUNT, SKILL_COUNT};

/// A rectangular grid of skill levels.
///
/// # Examples
///
/// ```
/// use fightforge_core::SkillLevels;
/// use fightforge_solver::SearchSpace;
///
/// let space = SearchSpace::full();
/// assert_eq!(space.total(), 214_358_881);
/// assert_eq!(space.decode(1), SkillLevels::new([0, 0, 0, 0, 0, 0, 0, 1]));
/// assert_eq!(space.decode(11), SkillLevels::new([0, 0, 0, 0, 0, 0, 1, 0]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSpace {
    dimensions: usize,
    levels: u8,
    total: u64,
}

impl SearchSpace {
    /// All 8 dimensions, levels 0 through 10.
    pub fn full() -> Self {
        Self::build(SKILL_COUNT, LEVEL_COUNT as u8)
    }

    /// The leading `dimensions` dimensions with levels `0..levels`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` if `dimensions` exceeds 8 or `levels` is 0 or
    /// exceeds 11.
    pub fn reduced(dimensions: usize, levels: u8) -> Result<Self> {
        if dimensions > SKILL_COUNT {
            return Err(FightForgeError::InvalidState(format!(
                "search space has at most {} dimensions, got {}",
                SKILL_COUNT, dimensions
            )));
        }
        if levels == 0 || levels as usize > LEVEL_COUNT {
            return Err(FightForgeError::InvalidState(format!(
                "levels per dimension must be in 1..={}, got {}",
                LEVEL_COUNT, levels
            )));
        }
        Ok(Self::build(dimensions, levels))
    }

    fn build(dimensions: usize, levels: u8) -> Self {
        let total = (levels as u64).pow(dimensions as u32);
        Self {
            dimensions,
            levels,
            total,
        }
    }

    /// Number of enumerated dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Levels per dimension.
    pub fn levels(&self) -> u8 {
        self.levels
    }

    /// Number of combinations.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Decodes a combination index. Indices past the end wrap.
    #[inline]
    pub fn decode(&self, mut index: u64) -> SkillLevels {
        let base = self.levels as u64;
        let mut levels = [0u8; SKILL_COUNT];
        for slot in levels[..self.dimensions].iter_mut().rev() {
            *slot = (index % base) as u8;
            index /= base;
        }
        SkillLevels::new(levels)
    }

    /// Steps `digits` to the next combination in index order.
    ///
    /// Returns `false` when `digits` was the last combination; it then wraps
    /// to all zeros.
    #[inline]
    pub fn advance(&self, digits: &mut [u8; SKILL_COUNT]) -> bool {
        for slot in digits[..self.dimensions].iter_mut().rev() {
            *slot += 1;
            if *slot < self.levels {
                return true;
            }
            *slot = 0;
        }
        false
    }

    /// Encodes a level assignment back to its index.
    ///
    /// Returns `None` if a level lies outside the space.
    pub fn encode(&self, levels: &SkillLevels) -> Option<u64> {
        let raw = levels.as_array();
        if raw[self.dimensions..].iter().any(|&l| l != 0) {
            return None;
        }
        raw[..self.dimensions].iter().try_fold(0u64, |acc, &l| {
            (l < self.levels).then(|| acc * self.levels as u64 + l as u64)
        })
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::full()
    }
}
