//! Shared types for the entry strategy.

use binance::{LeverageResponse, OrderResponse, SymbolInfo};

use crate::sizing::PositionSizing;

/// Outcome of one completed entry: every exchange response, in call order.
#[derive(Debug, Clone)]
pub struct EntryReport {
    /// Trading rules of the traded symbol
    pub symbol_info: SymbolInfo,
    /// Balance and quantity computation
    pub sizing: PositionSizing,
    pub leverage: LeverageResponse,
    /// False when the symbol was already in the requested margin mode
    pub margin_type_changed: bool,
    /// Opening limit order
    pub order: OrderResponse,
    /// Protective stop-market order closing the position
    pub stop: OrderResponse,
}
