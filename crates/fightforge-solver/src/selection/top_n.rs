//! Bounded flat top-N selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fightforge_core::Candidate;

use super::rank;

/// Heap entry ordered so that the worst kept build sits on top.
#[derive(Debug)]
struct Kept {
    index: u64,
    candidate: Candidate,
}

impl Ord for Kept {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(
            self.candidate.daily_damage,
            self.index,
            other.candidate.daily_damage,
            other.index,
        )
    }
}

impl PartialOrd for Kept {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Kept {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Kept {}

/// Keeps the `n` best builds by damage, earlier index winning ties.
///
/// Equivalent to a stable descending sort of every retained build followed
/// by taking the first `n`.
///
/// # Examples
///
/// ```
/// use fightforge_core::{Candidate, SkillLevels};
/// use fightforge_solver::TopNCollector;
///
/// let build = |damage: f64| Candidate {
///     levels: SkillLevels::zero(),
///     point_cost: 0,
///     daily_damage: damage,
///     daily_cost: None,
/// };
///
/// let mut top = TopNCollector::new(2);
/// for (i, d) in [5.0, 9.0, 7.0, 9.0].into_iter().enumerate() {
///     top.offer(i as u64, build(d));
/// }
/// let damages: Vec<f64> = top.finish().iter().map(|c| c.daily_damage).collect();
/// assert_eq!(damages, vec![9.0, 9.0]);
/// ```
#[derive(Debug)]
pub struct TopNCollector {
    limit: usize,
    heap: BinaryHeap<Kept>,
    retained: u64,
}

impl TopNCollector {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            heap: BinaryHeap::with_capacity(limit.saturating_add(1).min(4096)),
            retained: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn retained(&self) -> u64 {
        self.retained
    }

    pub fn offer(&mut self, index: u64, candidate: Candidate) {
        self.retained += 1;
        if self.limit == 0 {
            return;
        }
        let entry = Kept { index, candidate };
        if self.heap.len() < self.limit {
            self.heap.push(entry);
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if entry < *worst {
                *worst = entry;
            }
        }
    }

    /// Kept builds, best first.
    pub fn finish(self) -> Vec<Candidate> {
        self.into_ranked()
            .into_iter()
            .map(|(_, candidate)| candidate)
            .collect()
    }

    /// Kept builds with their enumeration indices, best first.
    pub(crate) fn into_ranked(self) -> Vec<(u64, Candidate)> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|kept| (kept.index, kept.candidate))
            .collect()
    }
}
