//! Shared test fixtures for FightForge crates.
//!
//! - [`pool`] - synthetic candidate pools for selection tests
//! - [`prices`] - fixed price snapshots and price sources that fail or stall
//! - [`scorer`] - small deterministic scorers for reduced search spaces
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! fightforge-test = { workspace = true }
//! ```

pub mod pool;
pub mod prices;
pub mod scorer;

pub use pool::{candidate, synthetic_pool};
pub use prices::{fixture_prices, DelayedPriceSource, FailingPriceSource};
pub use scorer::{CountingScorer, WeightedScorer};
