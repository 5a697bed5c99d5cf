//! Error types for the Binance perps client.

use thiserror::Error;

/// Errors returned by [`BinancePerpsClient`](crate::BinancePerpsClient).
#[derive(Debug, Error)]
pub enum BinanceError {
    /// Transport failure: DNS, connect, TLS, timeout, or a body that is not JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was JSON but did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error object returned by the exchange, e.g. `{"code":-1121,"msg":"Invalid symbol."}`.
    #[error("Binance API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Invalid client configuration.
    #[error("Config error: {0}")]
    Config(String),
}

impl BinanceError {
    /// Returns the exchange error code, if this is an API error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
