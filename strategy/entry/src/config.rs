//! Configuration types for the entry strategy.

use binance::{MarginType, Side};
use rust_decimal::Decimal;

/// Parameters of one leveraged entry (clients are passed to `EntryStrategy::new`).
#[derive(Debug, Clone)]
pub struct EntryStrategyConfig {
    /// Binance futures symbol (e.g., "ETCUSDT")
    pub symbol: String,
    /// Side of the opening limit order; the protective stop uses the opposite side
    pub side: Side,
    /// Leverage multiplier set on the symbol before ordering
    pub leverage: u32,
    /// Share of the available balance, in percent, committed as margin
    pub risk_percent: Decimal,
    pub margin_type: MarginType,
    /// Limit price of the opening order, as sent to the exchange
    pub price: String,
    /// Trigger price of the closing stop-market order
    pub stop_price: String,
    /// Balance asset the position is sized from (e.g., "USDT")
    pub quote_asset: String,
}
