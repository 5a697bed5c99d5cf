//! Position sizing from a fixed share of the available balance.

use std::str::FromStr;

use binance::{AccountBalance, ExchangeInfo, SymbolInfo};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    #[error("unknown symbol {0}: not listed in exchange info")]
    UnknownSymbol(String),

    #[error("no balance entry for asset {0}")]
    UnknownAsset(String),

    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be positive")]
    NonPositive { field: &'static str },

    #[error("position size overflows decimal range")]
    Overflow,
}

/// Result of sizing one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSizing {
    /// Available balance of the quote asset
    pub available_balance: Decimal,
    /// Notional committed: available * leverage * percent / 100
    pub amount: Decimal,
    /// Order quantity with exactly `quantity_precision` fractional digits
    pub quantity: Decimal,
}

impl PositionSizing {
    /// Sizes a position worth `risk_percent`% of `available_balance`, levered,
    /// at `price`. The quantity is rounded half away from zero to
    /// `quantity_precision` decimals and always rendered with that many digits.
    pub fn compute(
        available_balance: Decimal,
        leverage: u32,
        risk_percent: Decimal,
        price: &str,
        quantity_precision: u32,
    ) -> Result<Self, SizingError> {
        let price = parse_decimal("price", price)?;
        if price <= Decimal::ZERO {
            return Err(SizingError::NonPositive { field: "price" });
        }
        if leverage == 0 {
            return Err(SizingError::NonPositive { field: "leverage" });
        }
        if risk_percent <= Decimal::ZERO {
            return Err(SizingError::NonPositive {
                field: "risk_percent",
            });
        }

        let amount = available_balance
            .checked_mul(Decimal::from(leverage))
            .and_then(|v| v.checked_mul(risk_percent))
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(SizingError::Overflow)?;

        let mut quantity = amount
            .checked_div(price)
            .ok_or(SizingError::Overflow)?
            .round_dp_with_strategy(quantity_precision, RoundingStrategy::MidpointAwayFromZero);
        quantity.rescale(quantity_precision);

        if quantity <= Decimal::ZERO {
            return Err(SizingError::NonPositive { field: "quantity" });
        }

        Ok(Self {
            available_balance,
            amount,
            quantity,
        })
    }
}

/// Looks up the trading rules of `symbol`.
pub fn symbol_rules<'a>(
    info: &'a ExchangeInfo,
    symbol: &str,
) -> Result<&'a SymbolInfo, SizingError> {
    info.symbol(symbol)
        .ok_or_else(|| SizingError::UnknownSymbol(symbol.to_string()))
}

/// Returns the available balance of `asset`.
pub fn available_balance(balances: &[AccountBalance], asset: &str) -> Result<Decimal, SizingError> {
    let entry = balances
        .iter()
        .find(|b| b.asset == asset)
        .ok_or_else(|| SizingError::UnknownAsset(asset.to_string()))?;
    parse_decimal("availableBalance", &entry.available_balance)
}

fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, SizingError> {
    Decimal::from_str(value.trim()).map_err(|_| SizingError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
