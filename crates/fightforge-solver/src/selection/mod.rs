//! Result selection policies.
//!
//! A [`Collector`] receives every build that passes the budget filter, in
//! enumeration order, and turns them into the final result list once the
//! enumeration is complete:
//!
//! - [`TopNCollector`]: the `n` highest-damage builds in one pass. Memory is
//!   bounded by `n` regardless of how many builds pass the filter.
//! - [`CostBucketCollector`]: the best builds of each cost tertile of the
//!   damage elite. The elite depends on the whole retained set, so the
//!   space is enumerated twice.

mod buckets;
mod top_n;


use std::cmp::Ordering;

use fightforge_config::SelectionConfig;
use fightforge_core::Candidate;

pub use buckets::{bucket_by_cost, elite_size, CostBucketCollector, CostBuckets};
pub use top_n::TopNCollector;

/// Ranks two builds: higher damage first, then lower enumeration index.
#[inline]
pub(crate) fn rank(damage_a: f64, index_a: u64, damage_b: f64, index_b: u64) -> Ordering {
    damage_b
        .total_cmp(&damage_a)
        .then_with(|| index_a.cmp(&index_b))
}

/// Collects retained builds under the configured policy.
#[derive(Debug)]
pub enum Collector {
    TopN(TopNCollector),
    CostBucketed(CostBucketCollector),
}

impl Collector {
    /// Builds the collector for a selection policy.
    pub fn from_config(config: &SelectionConfig) -> Self {
        match *config {
            SelectionConfig::Flat { top_n } => Collector::TopN(TopNCollector::new(top_n)),
            SelectionConfig::CostBucketed {
                elite_fraction,
                per_bucket,
            } => Collector::CostBucketed(CostBucketCollector::new(elite_fraction, per_bucket)),
        }
    }

    /// Offers a retained build found at enumeration `index`.
    #[inline]
    pub fn offer(&mut self, index: u64, candidate: Candidate) {
        match self {
            Collector::TopN(c) => c.offer(index, candidate),
            Collector::CostBucketed(c) => c.offer(index, candidate),
        }
    }

    /// Enumeration passes over the space this policy needs.
    pub fn passes(&self) -> u32 {
        match self {
            Collector::TopN(_) => 1,
            Collector::CostBucketed(_) => CostBucketCollector::PASSES,
        }
    }

    /// Closes an enumeration pass that is not the last.
    pub fn end_pass(&mut self) {
        if let Collector::CostBucketed(c) = self {
            c.end_pass();
        }
    }

    /// Number of builds offered during the first pass.
    pub fn retained(&self) -> u64 {
        match self {
            Collector::TopN(c) => c.retained(),
            Collector::CostBucketed(c) => c.retained(),
        }
    }

    /// Produces the final result list.
    pub fn finish(self) -> Vec<Candidate> {
        match self {
            Collector::TopN(c) => c.finish(),
            Collector::CostBucketed(c) => c.finish(),
        }
    }
}
