use secrecy::SecretString;
use tracing::warn;
use url::Url;

use crate::error::BinanceError;

/// Production host for USDT-M futures.
const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";

/// Default `recvWindow` in milliseconds.
const DEFAULT_RECV_WINDOW: u64 = 5000;

const ENV_API_KEY: &str = "APIKEY";
const ENV_API_SECRET: &str = "APISECRET";
const ENV_BASE_URL: &str = "BINANCE_BASE_URL";
const ENV_RECV_WINDOW: &str = "BINANCE_RECV_WINDOW";

/// Configuration for BinancePerpsClient
#[derive(Debug, Clone)]
pub struct BinancePerpsClientConfig {
    /// Binance API key, sent as the `X-MBX-APIKEY` header
    pub api_key: String,
    /// Binance API secret, used only as the HMAC key
    pub api_secret: SecretString,
    /// Base URL for API endpoints
    pub base_url: String,
    /// Server-side staleness tolerance in milliseconds
    pub recv_window: u64,
}

impl BinancePerpsClientConfig {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }

    /// Overrides the base URL (e.g. the testnet host or a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, BinanceError> {
        self.base_url = normalize_base_url(&base_url.into())?;
        Ok(self)
    }

    /// Loads the config from the process environment, reading `.env` first if present.
    ///
    /// `APIKEY` and `APISECRET` are taken verbatim and are not required: a
    /// missing value is logged and replaced by an empty string, so the exchange
    /// rejects the request instead.
    /// `BINANCE_BASE_URL` and `BINANCE_RECV_WINDOW` are optional overrides.
    pub fn from_env() -> Result<Self, BinanceError> {
        dotenvy::dotenv().ok();

        let api_key = env_or_empty(ENV_API_KEY);
        let api_secret = env_or_empty(ENV_API_SECRET);
        let mut config = Self::new(api_key, api_secret);

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            config = config.with_base_url(base_url)?;
        }
        if let Ok(raw) = std::env::var(ENV_RECV_WINDOW) {
            config.recv_window = raw.trim().parse().map_err(|_| {
                BinanceError::Config(format!("{ENV_RECV_WINDOW} is not a number: {raw}"))
            })?;
        }
        Ok(config)
    }
}

fn env_or_empty(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) => value,
        Err(_) => {
            warn!(variable = name, "environment variable not set, using empty value");
            String::new()
        }
    }
}

/// Validates `raw` as an http(s) URL and strips any trailing slash so endpoint
/// paths can be appended directly.
fn normalize_base_url(raw: &str) -> Result<String, BinanceError> {
    let parsed = Url::parse(raw.trim())
        .map_err(|e| BinanceError::Config(format!("invalid base url {raw:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(BinanceError::Config(format!(
            "unsupported scheme in base url {raw:?}"
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
