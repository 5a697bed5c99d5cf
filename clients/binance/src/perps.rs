use std::sync::Arc;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use crate::config::BinancePerpsClientConfig;
use crate::error::BinanceError;
use crate::types::{
    AccountBalance, ApiResponse, ExchangeInfo, LeverageResponse, MarginType, MarginTypeResponse,
    OrderResponse, OrderType, Side, TimeInForce,
};
use crate::utils::{self, Params};

const ORDER_PATH: &str = "/fapi/v1/order";
const LEVERAGE_PATH: &str = "/fapi/v1/leverage";
const MARGIN_TYPE_PATH: &str = "/fapi/v1/marginType";
const BALANCE_PATH: &str = "/fapi/v2/balance";
const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";

/// A limit order to open (or add to) a position.
#[derive(Debug, Clone)]
pub struct LimitOrder {
    pub symbol: String,
    pub side: Side,
    /// Quantity already formatted to the symbol's quantity precision.
    pub quantity: String,
    pub price: String,
}

/// A stop-market order that closes the whole open position once `stop_price` trades.
#[derive(Debug, Clone)]
pub struct ClosePositionStop {
    pub symbol: String,
    pub side: Side,
    pub stop_price: String,
}

impl LimitOrder {
    fn params(&self) -> Params {
        vec![
            ("symbol", self.symbol.clone()),
            ("type", OrderType::Limit.to_string()),
            ("side", self.side.to_string()),
            ("timeInForce", TimeInForce::Gtc.to_string()),
            ("quantity", self.quantity.clone()),
            ("price", self.price.clone()),
        ]
    }
}

impl ClosePositionStop {
    fn params(&self) -> Params {
        vec![
            ("closePosition", "true".to_string()),
            ("symbol", self.symbol.clone()),
            ("stopPrice", self.stop_price.clone()),
            ("type", OrderType::StopMarket.to_string()),
            ("side", self.side.to_string()),
            ("timeInForce", TimeInForce::Gtc.to_string()),
        ]
    }
}

fn cancel_params(symbol: &str, order_id: u64) -> Params {
    vec![
        ("symbol", symbol.to_string()),
        ("orderId", order_id.to_string()),
    ]
}

fn leverage_params(symbol: &str, leverage: u32) -> Params {
    vec![
        ("symbol", symbol.to_string()),
        ("leverage", leverage.to_string()),
    ]
}

fn margin_type_params(symbol: &str, margin_type: MarginType) -> Params {
    vec![
        ("symbol", symbol.to_string()),
        ("marginType", margin_type.to_string()),
    ]
}

/// Client for Binance perpetual futures (USDT-M) API.
pub struct BinancePerpsClient {
    client: Arc<reqwest::Client>,
    api_key: String,
    api_secret: SecretString,
    base_url: String,
    recv_window: u64,
}

impl BinancePerpsClient {
    pub fn new(client: Arc<reqwest::Client>, config: BinancePerpsClientConfig) -> Self {
        Self {
            client,
            api_key: config.api_key,
            api_secret: config.api_secret,
            base_url: config.base_url,
            recv_window: config.recv_window,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url + path + "?" + query + "&signature=" + HMAC(query)`.
    ///
    /// The signature covers exactly the query string in front of it.
    pub fn build_url(&self, path: &str, params: &[(&str, String)]) -> String {
        let signed_query = utils::sign_params(self.api_secret.expose_secret(), params);
        format!("{}{}?{}", self.base_url, path, signed_query)
    }

    /// Issues a signed request and returns the body as JSON.
    ///
    /// Params travel in the query string for every method, with the API key in
    /// the `X-MBX-APIKEY` header. The HTTP status is not inspected: an exchange
    /// error object comes back as an ordinary value, and callers classify it
    /// (see [`ApiResponse`]). Transport failures and non-JSON bodies are errors.
    pub async fn send(
        &self,
        path: &str,
        method: Method,
        params: &[(&str, String)],
    ) -> Result<Value, BinanceError> {
        let url = self.build_url(path, params);
        debug!(%method, path, "sending signed request");
        let resp = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;
        debug!(path, status = %resp.status(), "response received");
        Ok(resp.json::<Value>().await?)
    }

    /// Issues an unsigned GET; no credentials, timestamp or signature are attached.
    pub async fn send_public(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, BinanceError> {
        let url = if params.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, utils::serialize(params))
        };
        debug!(path, "sending public request");
        let resp = self.client.get(&url).send().await?;
        debug!(path, status = %resp.status(), "response received");
        Ok(resp.json::<Value>().await?)
    }

    /// Appends `recvWindow` and `timestamp`, in that order, as the last params.
    fn stamp(&self, mut params: Params) -> Params {
        params.push(("recvWindow", self.recv_window.to_string()));
        params.push(("timestamp", utils::binance_fapi_timestamp_ms()));
        params
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        path: &str,
        method: Method,
        params: Params,
    ) -> Result<T, BinanceError> {
        let params = self.stamp(params);
        let value = self.send(path, method, &params).await?;
        ApiResponse::from_value(value)?.into_result()
    }

    /// Places a GTC limit order.
    pub async fn place_limit_order(
        &self,
        order: &LimitOrder,
    ) -> Result<OrderResponse, BinanceError> {
        self.signed(ORDER_PATH, Method::POST, order.params()).await
    }

    /// Places a STOP_MARKET order with `closePosition=true`; no quantity is sent
    /// since the exchange closes whatever position is open when it triggers.
    pub async fn place_close_position_stop(
        &self,
        order: &ClosePositionStop,
    ) -> Result<OrderResponse, BinanceError> {
        self.signed(ORDER_PATH, Method::POST, order.params()).await
    }

    /// Cancels an open order by exchange order id.
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: u64,
    ) -> Result<OrderResponse, BinanceError> {
        self.signed(ORDER_PATH, Method::DELETE, cancel_params(symbol, order_id))
            .await
    }

    pub async fn set_leverage(
        &self,
        symbol: &str,
        leverage: u32,
    ) -> Result<LeverageResponse, BinanceError> {
        self.signed(LEVERAGE_PATH, Method::POST, leverage_params(symbol, leverage))
            .await
    }

    pub async fn set_margin_type(
        &self,
        symbol: &str,
        margin_type: MarginType,
    ) -> Result<MarginTypeResponse, BinanceError> {
        let params = margin_type_params(symbol, margin_type);
        self.signed(MARGIN_TYPE_PATH, Method::POST, params).await
    }

    /// Futures account balance, one entry per asset.
    pub async fn balance(&self) -> Result<Vec<AccountBalance>, BinanceError> {
        self.signed(BALANCE_PATH, Method::GET, Vec::new()).await
    }

    /// Exchange trading rules and symbol metadata. Unsigned.
    pub async fn exchange_info(&self) -> Result<ExchangeInfo, BinanceError> {
        let value = self.send_public(EXCHANGE_INFO_PATH, &[]).await?;
        ApiResponse::from_value(value)?.into_result()
    }
}
