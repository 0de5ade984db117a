//! Price fixtures.

use std::time::Duration;

use fightforge_core::ItemPrices;
use fightforge_prices::{PriceError, PriceSource};

/// A complete snapshot for all eight priced items.
pub fn fixture_prices() -> ItemPrices {
    ItemPrices::from_pairs([
        ("lightAmmo", 0.1),
        ("ammo", 0.3),
        ("heavyAmmo", 0.9),
        ("bread", 1.0),
        ("steak", 2.5),
        ("cookedFish", 4.0),
        ("scraps", 0.05),
        ("steel", 1.5),
    ])
}

/// A price source whose endpoint always answers with an HTTP error.
#[derive(Debug, Clone, Copy)]
pub struct FailingPriceSource {
    pub status: u16,
}

impl Default for FailingPriceSource {
    fn default() -> Self {
        Self { status: 503 }
    }
}

impl PriceSource for FailingPriceSource {
    async fn fetch_prices(&self) -> Result<ItemPrices, PriceError> {
        Err(PriceError::Status(self.status))
    }
}

/// A price source that answers after a delay.
#[derive(Debug, Clone)]
pub struct DelayedPriceSource {
    pub prices: ItemPrices,
    pub delay: Duration,
}

impl DelayedPriceSource {
    pub fn new(prices: ItemPrices, delay: Duration) -> Self {
        Self { prices, delay }
    }
}

impl PriceSource for DelayedPriceSource {
    async fn fetch_prices(&self) -> Result<ItemPrices, PriceError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.prices.clone())
    }
}
