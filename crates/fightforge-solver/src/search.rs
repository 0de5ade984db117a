//! The chunked build search.
//!
//! [`BuildSearch`] owns the enumeration cursor and the result collector for
//! one run and advances through the space one chunk at a time:
//!
//! ```text
//! Idle --step--> Running { cursor } --step--> ... --step--> Done
//!                        |
//!                        +--(cancel flag set)--> Cancelled
//! ```
//!
//! Callers either drive [`step`](BuildSearch::step) themselves, run it to
//! completion on the current thread with [`run`](BuildSearch::run), or use
//! [`run_cooperative`](BuildSearch::run_cooperative) inside an async task,
//! which yields to the scheduler between chunks.
//!
//! Logging levels:
//! - **INFO**: search start/end, cancellation
//! - **DEBUG**: progress percentages
//! - **TRACE**: per-chunk detail

use std::mem;

use fightforge_config::OptimizerConfig;
use fightforge_core::{BuildScorer, FightForgeError, Result, SkillLevels};
use tracing::{debug, info, trace};

use crate::cancel::CancelToken;
use crate::event::SearchOutcome;
use crate::filter::BudgetFilter;
use crate::selection::{Collector, TopNCollector};
use crate::space::SearchSpace;
use crate::stats::{ProgressTracker, SearchStats};

/// Where a search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Not started.
    Idle,
    /// Work before `cursor` has been processed. The cursor counts
    /// combinations across all passes, so it runs up to `total * passes`.
    Running { cursor: u64 },
    /// All combinations processed; the outcome is ready.
    Done,
    /// Stopped by its cancel token.
    Cancelled,
}

/// Result of one [`step`](BuildSearch::step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// More chunks remain. `progress` is set when the percentage rose.
    Continue { progress: Option<u8> },
    /// The last chunk was processed.
    Finished { progress: Option<u8> },
    /// The run was cancelled; no chunk was processed.
    Cancelled,
}

/// Exhaustive search over a skill-level space under a point budget.
///
/// # Example
///
/// ```
/// use fightforge_config::OptimizerConfig;
/// use fightforge_core::{FightModel, Modifiers, Scenario};
/// use fightforge_solver::{BuildSearch, SearchSpace};
///
/// let model = FightModel::new(Modifiers::none(), Scenario::default());
/// let mut search = BuildSearch::new(model, 0, &OptimizerConfig::default())
///     .with_space(SearchSpace::reduced(3, 4).unwrap());
///
/// let mut reports = Vec::new();
/// let outcome = search.run(|percent| reports.push(percent)).unwrap();
///
/// assert_eq!(outcome.results.len(), 1);
/// assert_eq!(outcome.results[0].point_cost, 0);
/// assert_eq!(reports.last(), Some(&100));
/// ```
#[derive(Debug)]
pub struct BuildSearch<B: BuildScorer> {
    scorer: B,
    space: SearchSpace,
    filter: BudgetFilter,
    chunk_size: u64,
    passes: u32,
    collector: Collector,
    state: SearchState,
    stats: SearchStats,
    progress: ProgressTracker,
    cancel: Option<CancelToken>,
    outcome: Option<SearchOutcome>,
}

impl<B: BuildScorer> BuildSearch<B> {
    /// Creates a search of the full space for builds costing at most
    /// `budget` points.
    pub fn new(scorer: B, budget: u32, config: &OptimizerConfig) -> Self {
        let collector = Collector::from_config(&config.selection);
        Self {
            scorer,
            space: SearchSpace::full(),
            filter: BudgetFilter::new(budget, config.search.budget_tolerance),
            chunk_size: config.search.chunk_size.max(1),
            passes: collector.passes(),
            collector,
            state: SearchState::Idle,
            stats: SearchStats::default(),
            progress: ProgressTracker::new(),
            cancel: None,
            outcome: None,
        }
    }

    /// Restricts the search to `space`.
    pub fn with_space(mut self, space: SearchSpace) -> Self {
        self.space = space;
        self
    }

    /// Attaches a cancel token, checked before every chunk.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn filter(&self) -> &BudgetFilter {
        &self.filter
    }

    pub fn scorer(&self) -> &B {
        &self.scorer
    }

    /// Enumeration passes the selection policy needs.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    fn work_total(&self) -> u64 {
        self.space.total().saturating_mul(u64::from(self.passes))
    }

    /// Processes one chunk.
    pub fn step(&mut self) -> ChunkOutcome {
        let cursor = match self.state {
            SearchState::Idle => {
                self.begin();
                0
            }
            SearchState::Running { cursor } => cursor,
            SearchState::Done => return ChunkOutcome::Finished { progress: None },
            SearchState::Cancelled => return ChunkOutcome::Cancelled,
        };

        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            self.state = SearchState::Cancelled;
            info!(
                event = "search_cancelled",
                processed = self.stats.processed,
                retained = self.stats.retained,
            );
            return ChunkOutcome::Cancelled;
        }

        let total = self.space.total();
        let work = self.work_total();
        // Chunks never straddle a pass boundary.
        let pass_end = (cursor / total + 1) * total;
        let end = cursor.saturating_add(self.chunk_size).min(pass_end);
        let first_pass = cursor < total;

        let start = cursor % total;
        let mut retained = 0u64;
        let mut digits = *self.space.decode(start).as_array();
        for index in start..start + (end - cursor) {
            let levels = SkillLevels::new(digits);
            self.space.advance(&mut digits);
            if !self.filter.accepts(levels.point_cost()) {
                continue;
            }
            self.collector.offer(index, self.scorer.evaluate(levels));
            retained += 1;
        }
        self.stats
            .record_chunk(end - cursor, if first_pass { retained } else { 0 });
        trace!(
            event = "chunk",
            start = cursor,
            end = end,
            retained = retained,
        );

        let progress = self.progress.observe(end, work);
        if let Some(percent) = progress {
            debug!(
                event = "progress",
                percent = percent,
                processed = self.stats.processed,
                retained = self.stats.retained,
                speed = self.stats.speed() as u64,
            );
        }

        if end >= work {
            self.finish();
            ChunkOutcome::Finished { progress }
        } else {
            if end == pass_end {
                self.collector.end_pass();
            }
            self.state = SearchState::Running { cursor: end };
            ChunkOutcome::Continue { progress }
        }
    }

    fn begin(&mut self) {
        self.stats.start();
        self.state = SearchState::Running { cursor: 0 };
        info!(
            event = "search_start",
            combinations = self.space.total(),
            budget = self.filter.budget(),
            tolerance = self.filter.tolerance(),
            chunk_size = self.chunk_size,
            passes = self.passes,
            cost_aware = self.scorer.is_cost_aware(),
        );
    }

    fn finish(&mut self) {
        let collector = mem::replace(
            &mut self.collector,
            Collector::TopN(TopNCollector::new(0)),
        );
        let results = collector.finish();
        info!(
            event = "search_end",
            retained = self.stats.retained,
            results = results.len(),
            duration_ms = self.stats.elapsed().as_millis() as u64,
        );
        self.outcome = Some(SearchOutcome {
            results,
            retained: self.stats.retained,
            processed: self.space.total(),
        });
        self.state = SearchState::Done;
    }

    /// Takes the outcome of a finished search. Returns `None` before the
    /// search is done or once the outcome has been taken.
    pub fn take_outcome(&mut self) -> Option<SearchOutcome> {
        self.outcome.take()
    }

    fn completed(&mut self) -> Result<SearchOutcome> {
        self.take_outcome().ok_or_else(|| {
            FightForgeError::InvalidState("search outcome was already taken".to_string())
        })
    }

    /// Runs the remaining chunks on the current thread.
    ///
    /// `on_progress` receives each increase of the progress percentage; the
    /// last call is always 100.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the cancel token fires, or `InvalidState` if
    /// the outcome of a finished search was already taken.
    pub fn run(&mut self, mut on_progress: impl FnMut(u8)) -> Result<SearchOutcome> {
        loop {
            match self.step() {
                ChunkOutcome::Continue { progress } => {
                    progress.into_iter().for_each(&mut on_progress);
                }
                ChunkOutcome::Finished { progress } => {
                    progress.into_iter().for_each(&mut on_progress);
                    return self.completed();
                }
                ChunkOutcome::Cancelled => return Err(FightForgeError::Cancelled),
            }
        }
    }

    /// Like [`run`](Self::run), yielding to the async scheduler after each
    /// chunk.
    pub async fn run_cooperative(
        &mut self,
        mut on_progress: impl FnMut(u8),
    ) -> Result<SearchOutcome> {
        loop {
            match self.step() {
                ChunkOutcome::Continue { progress } => {
                    progress.into_iter().for_each(&mut on_progress);
                    tokio::task::yield_now().await;
                }
                ChunkOutcome::Finished { progress } => {
                    progress.into_iter().for_each(&mut on_progress);
                    return self.completed();
                }
                ChunkOutcome::Cancelled => return Err(FightForgeError::Cancelled),
            }
        }
    }
}
