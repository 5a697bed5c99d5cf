use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BinanceError;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// The side that reduces a position opened on `self`.
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            _ => Err(format!("unknown side: {s}")),
        }
    }
}

/// Order type. Only the two types this client submits are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Limit,
    StopMarket,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => f.write_str("LIMIT"),
            OrderType::StopMarket => f.write_str("STOP_MARKET"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInForce {
    /// Good till cancelled
    Gtc,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Gtc => f.write_str("GTC"),
        }
    }
}

/// Margin mode for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginType {
    Isolated,
    Crossed,
}

impl fmt::Display for MarginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginType::Isolated => f.write_str("ISOLATED"),
            MarginType::Crossed => f.write_str("CROSSED"),
        }
    }
}

impl FromStr for MarginType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ISOLATED" => Ok(MarginType::Isolated),
            "CROSSED" => Ok(MarginType::Crossed),
            _ => Err(format!("unknown margin type: {s}")),
        }
    }
}

/// Error object returned by the exchange: `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub msg: String,
}

/// A decoded endpoint response: either the endpoint's payload or the exchange's error object.
#[derive(Debug, Clone)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(ApiError),
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Classifies a raw response body.
    ///
    /// An object carrying a negative `code` and a `msg` is an error; the exchange
    /// also reports some successes as `{"code": 200, "msg": "success"}`, so the
    /// sign of the code is the discriminant, not its presence.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let is_error = value
            .get("code")
            .and_then(Value::as_i64)
            .is_some_and(|code| code < 0)
            && value.get("msg").is_some_and(Value::is_string);
        if is_error {
            Ok(Self::Failure(serde_json::from_value(value)?))
        } else {
            Ok(Self::Success(serde_json::from_value(value)?))
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T, BinanceError> {
        match self {
            ApiResponse::Success(value) => Ok(value),
            ApiResponse::Failure(err) => Err(BinanceError::Api {
                code: err.code,
                message: err.msg,
            }),
        }
    }
}

/// Response from GET /fapi/v1/exchangeInfo (only the fields this crate uses).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeInfo {
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub server_time: i64,
    pub symbols: Vec<SymbolInfo>,
}

impl ExchangeInfo {
    pub fn symbol(&self, symbol: &str) -> Option<&SymbolInfo> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

/// Trading rules for one symbol.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub base_asset: String,
    #[serde(default)]
    pub quote_asset: String,
    #[serde(default)]
    pub margin_asset: String,
    #[serde(default)]
    pub price_precision: u32,
    pub quantity_precision: u32,
}

/// One entry of GET /fapi/v2/balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    #[serde(default)]
    pub account_alias: String,
    pub asset: String,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub cross_wallet_balance: String,
    #[serde(default)]
    pub cross_un_pnl: String,
    pub available_balance: String,
    #[serde(default)]
    pub max_withdraw_amount: String,
    #[serde(default)]
    pub margin_available: bool,
    #[serde(default)]
    pub update_time: i64,
}

/// Response from POST /fapi/v1/leverage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageResponse {
    pub leverage: u32,
    #[serde(default)]
    pub max_notional_value: String,
    pub symbol: String,
}

/// Response from POST /fapi/v1/marginType: `{"code": 200, "msg": "success"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarginTypeResponse {
    pub code: i64,
    pub msg: String,
}

/// Response from POST/DELETE /fapi/v1/order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: u64,
    pub symbol: String,
    pub status: String,
    #[serde(default)]
    pub client_order_id: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub avg_price: String,
    #[serde(default)]
    pub orig_qty: String,
    #[serde(default)]
    pub executed_qty: String,
    #[serde(default)]
    pub stop_price: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub close_position: bool,
    #[serde(default)]
    pub update_time: i64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn side_opposite_and_wire_strings() {
        assert_eq!(Side::Sell.opposite(), Side::Buy);
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.to_string(), "SELL");
        assert_eq!(OrderType::StopMarket.to_string(), "STOP_MARKET");
        assert_eq!(MarginType::Crossed.to_string(), "CROSSED");
        assert_eq!(TimeInForce::Gtc.to_string(), "GTC");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("sell".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("Isolated".parse::<MarginType>().unwrap(), MarginType::Isolated);
        assert!("sideways".parse::<Side>().is_err());
        assert!("hedged".parse::<MarginType>().is_err());
    }

    #[test]
    fn negative_code_is_failure() {
        let body = json!({"code": -1121, "msg": "Invalid symbol."});
        let err = ApiResponse::<LeverageResponse>::from_value(body)
            .unwrap()
            .into_result()
            .unwrap_err();
        assert_eq!(err.api_code(), Some(-1121));
        assert_eq!(err.to_string(), "Binance API error -1121: Invalid symbol.");
    }

    #[test]
    fn code_200_margin_type_is_success() {
        let body = json!({"code": 200, "msg": "success"});
        let resp = ApiResponse::<MarginTypeResponse>::from_value(body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(resp.code, 200);
    }

    #[test]
    fn balance_array_decodes() {
        let body = json!([
            {"accountAlias": "SgsR", "asset": "BNB", "balance": "0.1", "availableBalance": "0.1"},
            {"accountAlias": "SgsR", "asset": "USDT", "balance": "1200", "availableBalance": "1000"}
        ]);
        let balances = ApiResponse::<Vec<AccountBalance>>::from_value(body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].available_balance, "1000");
    }

    #[test]
    fn order_response_decodes() {
        let body = json!({
            "orderId": 22542179,
            "symbol": "ETCUSDT",
            "status": "NEW",
            "clientOrderId": "testOrder",
            "price": "0",
            "avgPrice": "0.00000",
            "origQty": "0",
            "executedQty": "0",
            "stopPrice": "68.420",
            "side": "BUY",
            "type": "STOP_MARKET",
            "timeInForce": "GTC",
            "reduceOnly": true,
            "closePosition": true,
            "updateTime": 1566818724722u64
        });
        let order = ApiResponse::<OrderResponse>::from_value(body)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(order.order_id, 22542179);
        assert_eq!(order.side, Side::Buy);
        assert!(order.close_position);
    }

    #[test]
    fn unexpected_shape_is_decode_error() {
        let body = json!({"unexpected": true});
        assert!(ApiResponse::<OrderResponse>::from_value(body).is_err());
    }

    #[test]
    fn exchange_info_lookup() {
        let body = json!({
            "timezone": "UTC",
            "serverTime": 1,
            "symbols": [{"symbol": "ETCUSDT", "pricePrecision": 3, "quantityPrecision": 1}]
        });
        let info: ExchangeInfo = serde_json::from_value(body).unwrap();
        assert_eq!(info.symbol("ETCUSDT").unwrap().quantity_precision, 1);
        assert!(info.symbol("XYZUSDT").is_none());
    }
}
