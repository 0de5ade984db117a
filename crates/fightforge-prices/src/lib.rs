//! FightForge Prices - market price lookup for the cost model
//!
//! The cost-aware search prices food, ammo and crafting materials from the
//! game market before it starts enumerating. This crate provides:
//! - [`PriceSource`]: the async lookup seam the search manager depends on
//! - [`HttpPriceSource`]: the live market endpoint over `reqwest`
//! - [`StaticPriceSource`]: a fixed snapshot, for tests and offline use
//! - [`decode_prices`]: tolerant decoding of the endpoint's JSON shapes

mod decode;
mod error;
mod source;

pub use decode::decode_prices;
pub use error::PriceError;
pub use source::{HttpPriceSource, PriceSource, StaticPriceSource};
