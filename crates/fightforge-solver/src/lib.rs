//! FightForge Solver - exhaustive build search
//!
//! This crate provides:
//! - [`SearchSpace`]: the 11^8 skill-level grid and its index encoding
//! - [`BudgetFilter`]: the point budget with an optional lower band
//! - Selection policies: flat top-N and cost-bucketed
//! - [`BuildSearch`]: the chunked search state machine
//! - [`SearchManager`]: background runs with progress streaming and
//!   cancellation
//!
//! # Architecture
//!
//! A run enumerates every combination exactly once, in index order, in
//! chunks of `chunk_size` combinations. Builds within budget are scored and
//! offered to the collector; after the last chunk the collector produces the
//! result list. Progress percentages are reported after each chunk in which
//! they rose, and 100 always precedes the terminal event.

pub mod basic;
pub mod cancel;
pub mod event;
pub mod filter;
pub mod manager;
pub mod request;
pub mod search;
pub mod selection;
pub mod space;
pub mod stats;


pub use basic::{run_search, run_search_with_channel};
pub use cancel::CancelToken;
pub use event::{SearchEvent, SearchOutcome};
pub use filter::BudgetFilter;
pub use manager::{SearchManager, SearchReceiver, SearchStatus};
pub use request::SearchRequest;
pub use search::{BuildSearch, ChunkOutcome, SearchState};
pub use selection::{
    bucket_by_cost, elite_size, Collector, CostBucketCollector, CostBuckets, TopNCollector,
};
pub use space::SearchSpace;
pub use stats::{percent_of, ProgressTracker, SearchStats};
