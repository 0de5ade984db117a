//! Price sources.

use std::future::Future;

use fightforge_config::PriceFeedConfig;
use fightforge_core::ItemPrices;
use reqwest::Client;
use tracing::{debug, warn};

use crate::decode::decode_prices;
use crate::error::PriceError;

/// Asynchronous lookup of the current market prices.
///
/// Implementations are shared with the background search task, so they must
/// be `Send + Sync + 'static` and return `Send` futures.
pub trait PriceSource: Send + Sync + 'static {
    /// Fetches a fresh price snapshot.
    fn fetch_prices(&self) -> impl Future<Output = Result<ItemPrices, PriceError>> + Send;
}

/// A price source that always answers with the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: ItemPrices,
}

impl StaticPriceSource {
    pub fn new(prices: ItemPrices) -> Self {
        Self { prices }
    }

    pub fn prices(&self) -> &ItemPrices {
        &self.prices
    }
}

impl PriceSource for StaticPriceSource {
    async fn fetch_prices(&self) -> Result<ItemPrices, PriceError> {
        Ok(self.prices.clone())
    }
}

/// The live market price endpoint.
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: Client,
    endpoint: String,
}

impl HttpPriceSource {
    /// Creates a source for `endpoint` using a default client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a source from the `[prices]` configuration section.
    pub fn from_config(config: &PriceFeedConfig) -> Result<Self, PriceError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PriceSource for HttpPriceSource {
    async fn fetch_prices(&self) -> Result<ItemPrices, PriceError> {
        debug!(event = "price_request", endpoint = %self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .body("{}")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(event = "price_fetch_failed", status = status.as_u16());
            return Err(PriceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let prices = decode_prices(&body)?;
        debug!(
            event = "price_fetch",
            items = prices.len() as u64,
            missing = prices.missing().len() as u64,
        );
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fightforge_core::ItemCode;

    #[tokio::test]
    async fn test_static_source_returns_snapshot() {
        let source = StaticPriceSource::new(ItemPrices::from_pairs([("ammo", 0.3)]));
        let prices = source.fetch_prices().await.unwrap();
        assert_eq!(prices.get(ItemCode::Ammo), 0.3);
        assert_eq!(source.prices().len(), 1);
    }

    #[test]
    fn test_http_source_from_config() {
        let config = PriceFeedConfig {
            endpoint: "http://localhost:1/prices".into(),
            timeout_seconds: 2,
        };
        let source = HttpPriceSource::from_config(&config).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:1/prices");
    }

    #[tokio::test]
    async fn test_http_source_unreachable_is_an_error() {
        let config = PriceFeedConfig {
            endpoint: "http://127.0.0.1:9/prices".into(),
            timeout_seconds: 2,
        };
        let source = HttpPriceSource::from_config(&config).unwrap();
        let result = source.fetch_prices().await;
        assert!(matches!(result, Err(PriceError::Http(_))));
    }
}
