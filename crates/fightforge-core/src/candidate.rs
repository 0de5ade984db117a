//! Scored candidate builds.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::EffectiveStats;
use crate::modifier::Modifiers;
use crate::skill::SkillLevels;

/// One concrete build with its point cost and scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Level per skill dimension.
    pub levels: SkillLevels,
    /// Skill points the build spends.
    pub point_cost: u32,
    /// Damage dealt per day.
    pub daily_damage: f64,
    /// Resources spent per day; `None` outside cost-aware mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_cost: Option<f64>,
}

impl Candidate {
    /// Effective stats of this build under `modifiers`, for display.
    pub fn effective_stats(&self, modifiers: &Modifiers) -> EffectiveStats {
        EffectiveStats::from_levels(&self.levels, modifiers)
    }

    /// Cost used for bucketing; 0 when the build was not costed.
    #[inline]
    pub fn cost_or_zero(&self) -> f64 {
        self.daily_cost.unwrap_or(0.0)
    }

    /// Damage per unit of daily cost, when the cost is known and positive.
    pub fn damage_per_cost(&self) -> Option<f64> {
        self.daily_cost
            .filter(|&c| c > 0.0)
            .map(|c| self.daily_damage / c)
    }

    /// Orders by damage, highest first.
    pub fn cmp_damage_desc(&self, other: &Self) -> Ordering {
        other.daily_damage.total_cmp(&self.daily_damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(damage: f64, cost: Option<f64>) -> Candidate {
        Candidate {
            levels: SkillLevels::zero(),
            point_cost: 0,
            daily_damage: damage,
            daily_cost: cost,
        }
    }

    #[test]
    fn test_damage_per_cost() {
        assert_eq!(candidate(100.0, Some(4.0)).damage_per_cost(), Some(25.0));
        assert_eq!(candidate(100.0, Some(0.0)).damage_per_cost(), None);
        assert_eq!(candidate(100.0, None).damage_per_cost(), None);
    }

    #[test]
    fn test_cmp_damage_desc() {
        let mut list = [candidate(1.0, None), candidate(3.0, None), candidate(2.0, None)];
        list.sort_by(Candidate::cmp_damage_desc);
        let damages: Vec<f64> = list.iter().map(|c| c.daily_damage).collect();
        assert_eq!(damages, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_serialize_skips_missing_cost() {
        let json = serde_json::to_string(&candidate(5.0, None)).unwrap();
        assert!(!json.contains("dailyCost"));
        assert!(json.contains("\"levels\":[0,0,0,0,0,0,0,0]"));
    }
}
