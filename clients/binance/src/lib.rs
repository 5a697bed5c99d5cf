//! Signed REST client for Binance USDT-M perpetual futures.

mod config;
mod error;
mod perps;
mod types;
mod utils;

pub use error::BinanceError;
pub use perps::{BinancePerpsClient, BinancePerpsClientConfig, ClosePositionStop, LimitOrder};
pub use types::{
    AccountBalance, ApiError, ApiResponse, ExchangeInfo, LeverageResponse, MarginType,
    MarginTypeResponse, OrderResponse, Side, SymbolInfo,
};
pub use utils::{serialize, sign, Params};
