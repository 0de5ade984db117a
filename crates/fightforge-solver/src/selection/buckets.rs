//! Cost-bucketed selection.
//!
//! The damage elite (the best `elite_fraction` of retained builds) is split
//! into three cost tertiles. With the elite's costs sorted ascending as `c`
//! and `len` elite builds, the boundaries are `t1 = c[len / 3]` and
//! `t2 = c[2 * len / 3]`:
//!
//! - low: `cost < t1`
//! - mid: `t1 <= cost < t2`
//! - high: `cost >= t2`
//!
//! Each bucket keeps its best `per_bucket` builds by damage and the buckets
//! are emitted high, mid, low.
//!
//! [`CostBucketCollector`] needs two enumeration passes. The first builds a
//! histogram of damage values, which fixes the elite's damage cutoff. The
//! second keeps, for every distinct cost in the elite, a count and the best
//! `per_bucket` builds at that cost. Memory grows with the number of distinct
//! damage and cost values, not with the number of retained builds.

use std::collections::HashMap;

use fightforge_core::Candidate;

use super::rank;
use super::top_n::TopNCollector;

/// Size of the damage elite: `ceil(fraction * retained)`, at least one
/// build when anything was retained.
///
/// ```
/// use fightforge_solver::elite_size;
///
/// assert_eq!(elite_size(0.3, 100), 30);
/// assert_eq!(elite_size(0.3, 7), 3);
/// assert_eq!(elite_size(0.3, 0), 0);
/// ```
pub fn elite_size(fraction: f64, retained: usize) -> usize {
    if retained == 0 {
        return 0;
    }
    ((fraction * retained as f64).ceil() as usize).clamp(1, retained)
}

/// The three cost buckets of a damage elite.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBuckets<T> {
    /// `t1`: lowest cost of the mid bucket.
    pub low_boundary: f64,
    /// `t2`: lowest cost of the high bucket.
    pub high_boundary: f64,
    pub high: Vec<T>,
    pub mid: Vec<T>,
    pub low: Vec<T>,
}

impl<T> CostBuckets<T> {
    /// Total builds across buckets.
    pub fn len(&self) -> usize {
        self.high.len() + self.mid.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty(low_boundary: f64, high_boundary: f64) -> Self {
        Self {
            low_boundary,
            high_boundary,
            high: Vec::new(),
            mid: Vec::new(),
            low: Vec::new(),
        }
    }

    fn bucket_mut(&mut self, tertile: Tertile) -> &mut Vec<T> {
        match tertile {
            Tertile::High => &mut self.high,
            Tertile::Mid => &mut self.mid,
            Tertile::Low => &mut self.low,
        }
    }

    /// Concatenates the buckets: high, mid, low.
    pub fn into_ordered(self) -> Vec<T> {
        let mut out = self.high;
        out.extend(self.mid);
        out.extend(self.low);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tertile {
    Low,
    Mid,
    High,
}

fn tertile(cost: f64, t1: f64, t2: f64) -> Tertile {
    if cost >= t2 {
        Tertile::High
    } else if cost >= t1 {
        Tertile::Mid
    } else {
        Tertile::Low
    }
}

/// Boundaries `(t1, t2)` over `(cost, count)` groups sorted by cost: the
/// costs at sorted positions `len / 3` and `2 * len / 3`.
fn tertile_boundaries(groups: &[(f64, u64)]) -> Option<(f64, f64)> {
    let len: u64 = groups.iter().map(|&(_, count)| count).sum();
    if len == 0 {
        return None;
    }
    let cost_at = |position: u64| {
        let mut seen = 0;
        for &(cost, count) in groups {
            seen += count;
            if seen > position {
                return cost;
            }
        }
        groups.last().map_or(0.0, |&(cost, _)| cost)
    };
    Some((cost_at(len / 3), cost_at(2 * len / 3)))
}

/// Splits `elite` into cost buckets of at most `per_bucket` builds.
///
/// `elite` must already be ranked best first; bucket contents keep that
/// order.
pub fn bucket_by_cost<T>(
    elite: Vec<T>,
    cost: impl Fn(&T) -> f64,
    per_bucket: usize,
) -> CostBuckets<T> {
    let mut costs: Vec<f64> = elite.iter().map(&cost).collect();
    costs.sort_by(f64::total_cmp);
    let groups: Vec<(f64, u64)> = costs.into_iter().map(|c| (c, 1)).collect();
    let Some((t1, t2)) = tertile_boundaries(&groups) else {
        return CostBuckets::empty(0.0, 0.0);
    };

    let mut buckets = CostBuckets::empty(t1, t2);
    for item in elite {
        let bucket = buckets.bucket_mut(tertile(cost(&item), t1, t2));
        if bucket.len() < per_bucket {
            bucket.push(item);
        }
    }
    buckets
}

/// Histogram key of a value; `-0.0` and `0.0` share a key.
#[inline]
fn key(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

/// Elite builds sharing one exact cost.
#[derive(Debug)]
struct CostGroup {
    count: u64,
    best: TopNCollector,
}

#[derive(Debug)]
enum Phase {
    /// First pass: how many retained builds reach each damage value.
    Census { damages: HashMap<u64, u64> },
    /// Second pass: elite builds grouped by cost. Builds above `cutoff` are
    /// elite, and so are the first `ties_left` builds at exactly `cutoff`.
    Select {
        cutoff: f64,
        ties_left: u64,
        groups: HashMap<u64, CostGroup>,
    },
}

/// Buckets the damage elite by cost over two enumeration passes.
#[derive(Debug)]
pub struct CostBucketCollector {
    elite_fraction: f64,
    per_bucket: usize,
    retained: u64,
    phase: Phase,
}

impl CostBucketCollector {
    /// Enumeration passes the collector needs.
    pub const PASSES: u32 = 2;

    pub fn new(elite_fraction: f64, per_bucket: usize) -> Self {
        Self {
            elite_fraction,
            per_bucket,
            retained: 0,
            phase: Phase::Census {
                damages: HashMap::new(),
            },
        }
    }

    /// Builds offered during the first pass.
    pub fn retained(&self) -> u64 {
        self.retained
    }

    /// Offers a retained build. Every pass must offer the same builds in the
    /// same order.
    pub fn offer(&mut self, index: u64, candidate: Candidate) {
        match &mut self.phase {
            Phase::Census { damages } => {
                self.retained += 1;
                *damages.entry(key(candidate.daily_damage)).or_insert(0) += 1;
            }
            Phase::Select {
                cutoff,
                ties_left,
                groups,
            } => {
                let damage = candidate.daily_damage;
                if damage < *cutoff {
                    return;
                }
                if damage == *cutoff {
                    if *ties_left == 0 {
                        return;
                    }
                    *ties_left -= 1;
                }
                let per_bucket = self.per_bucket;
                let group = groups
                    .entry(key(candidate.cost_or_zero()))
                    .or_insert_with(|| CostGroup {
                        count: 0,
                        best: TopNCollector::new(per_bucket),
                    });
                group.count += 1;
                group.best.offer(index, candidate);
            }
        }
    }

    /// Closes the first pass and fixes the elite's damage cutoff.
    pub fn end_pass(&mut self) {
        let Phase::Census { damages } = &mut self.phase else {
            return;
        };
        let mut histogram: Vec<(f64, u64)> = damages
            .drain()
            .map(|(bits, count)| (f64::from_bits(bits), count))
            .collect();
        histogram.sort_unstable_by(|a, b| b.0.total_cmp(&a.0));

        let elite = elite_size(self.elite_fraction, self.retained as usize) as u64;
        let mut cutoff = f64::INFINITY;
        let mut ties_left = 0;
        let mut above = 0u64;
        for (damage, count) in histogram {
            if above + count >= elite {
                cutoff = damage;
                ties_left = elite - above;
                break;
            }
            above += count;
        }

        self.phase = Phase::Select {
            cutoff,
            ties_left,
            groups: HashMap::new(),
        };
    }

    /// Buckets the elite. Empty unless both passes ran.
    pub fn finish(self) -> Vec<Candidate> {
        let per_bucket = self.per_bucket;
        let Phase::Select { groups, .. } = self.phase else {
            return Vec::new();
        };
        let mut groups: Vec<(f64, CostGroup)> = groups
            .into_iter()
            .map(|(bits, group)| (f64::from_bits(bits), group))
            .collect();
        groups.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        let counts: Vec<(f64, u64)> = groups.iter().map(|(cost, g)| (*cost, g.count)).collect();
        let Some((t1, t2)) = tertile_boundaries(&counts) else {
            return Vec::new();
        };

        let mut buckets = CostBuckets::empty(t1, t2);
        for (cost, group) in groups {
            buckets
                .bucket_mut(tertile(cost, t1, t2))
                .extend(group.best.into_ranked());
        }
        for bucket in [&mut buckets.high, &mut buckets.mid, &mut buckets.low] {
            bucket.sort_unstable_by(|a, b| rank(a.1.daily_damage, a.0, b.1.daily_damage, b.0));
            bucket.truncate(per_bucket);
        }

        buckets
            .into_ordered()
            .into_iter()
            .map(|(_, candidate)| candidate)
            .collect()
    }
}
