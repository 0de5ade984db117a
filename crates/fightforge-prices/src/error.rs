use fightforge_core::FightForgeError;
use thiserror::Error;

/// Price lookup failure.
#[derive(Debug, Error)]
pub enum PriceError {
    /// Transport failure or timeout
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("price endpoint returned status {0}")]
    Status(u16),

    /// The body was not a recognizable price payload
    #[error("could not decode prices: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for PriceError {
    fn from(err: serde_json::Error) -> Self {
        PriceError::Decode(err.to_string())
    }
}

impl From<PriceError> for FightForgeError {
    fn from(err: PriceError) -> Self {
        FightForgeError::PriceFeed(err.to_string())
    }
}
