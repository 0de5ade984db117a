//! Search entry point that hides the wiring.

use fightforge_config::OptimizerConfig;
use fightforge_core::Result;
use fightforge_prices::{HttpPriceSource, PriceSource};
use fightforge_solver::{SearchManager, SearchOutcome, SearchRequest};

/// Configuration file read by [`optimize`].
pub const CONFIG_FILE: &str = "fightforge.toml";

/// Loads [`CONFIG_FILE`], falling back to defaults when it is absent or
/// invalid.
pub fn load_config() -> OptimizerConfig {
    OptimizerConfig::load(CONFIG_FILE).unwrap_or_default()
}

/// Runs a search with the configuration from [`CONFIG_FILE`] and the live
/// price feed.
///
/// With the `console` feature, progress is rendered to stdout.
///
/// # Errors
///
/// `PriceFeed` when a cost-aware request cannot be priced.
pub async fn optimize(request: SearchRequest) -> Result<SearchOutcome> {
    #[cfg(feature = "console")]
    fightforge_console::init();

    let config = load_config();
    let prices = HttpPriceSource::from_config(&config.prices)?;
    optimize_with(request, config, prices).await
}

/// Runs a search with explicit configuration and price source.
pub async fn optimize_with<P: PriceSource>(
    request: SearchRequest,
    config: OptimizerConfig,
    prices: P,
) -> Result<SearchOutcome> {
    let mut manager = SearchManager::new(config, prices);
    manager.solve(request).outcome().await
}
