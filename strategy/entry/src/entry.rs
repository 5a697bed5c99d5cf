//! Leveraged entry with a protective stop.
//!
//! Reads the symbol's trading rules and the account balance, sizes the
//! position, configures leverage and margin mode, places the opening limit
//! order and finally a stop-market order that closes the whole position.

use anyhow::{Context, Result};
use binance::{BinanceError, BinancePerpsClient, ClosePositionStop, LimitOrder};
use tracing::info;

use crate::config::EntryStrategyConfig;
use crate::sizing::{self, PositionSizing};
use crate::types::EntryReport;

/// Returned by `/fapi/v1/marginType` when the symbol already uses the requested mode.
const MARGIN_TYPE_UNCHANGED: i64 = -4046;

/// Entry strategy
///
/// Issues its requests strictly one after another; a step runs only after the
/// previous one succeeded.
pub struct EntryStrategy {
    /// Binance futures client instance
    binance_client: BinancePerpsClient,
    config: EntryStrategyConfig,
}

impl EntryStrategy {
    /// Creates a new `EntryStrategy` instance
    ///
    /// # Arguments
    /// * `config` - Parameters of the entry
    /// * `binance_client` - Binance futures client instance
    pub fn new(config: EntryStrategyConfig, binance_client: BinancePerpsClient) -> Self {
        Self {
            binance_client,
            config,
        }
    }

    /// Runs the entry once.
    ///
    /// Order of calls: exchange info, balance, leverage, margin type, limit
    /// order, closing stop. The first failure aborts the run, so a rejected
    /// opening order never gets a stop attached. A margin-type rejection with
    /// code `-4046` only means the mode is already set and does not abort.
    ///
    /// # Returns
    /// An `EntryReport` with every response, or the error of the failed step.
    pub async fn run(&self) -> Result<EntryReport> {
        let cfg = &self.config;

        let exchange_info = self
            .binance_client
            .exchange_info()
            .await
            .context("fetching exchange info")?;
        let symbol_info = sizing::symbol_rules(&exchange_info, &cfg.symbol)?.clone();

        let balances = self
            .binance_client
            .balance()
            .await
            .context("fetching account balance")?;
        let available = sizing::available_balance(&balances, &cfg.quote_asset)?;

        let sizing = PositionSizing::compute(
            available,
            cfg.leverage,
            cfg.risk_percent,
            &cfg.price,
            symbol_info.quantity_precision,
        )?;

        let leverage = self
            .binance_client
            .set_leverage(&cfg.symbol, cfg.leverage)
            .await
            .context("setting leverage")?;
        info!(?leverage, "leverage set");

        info!(
            available_balance = %sizing.available_balance,
            amount = %sizing.amount,
            quantity = %sizing.quantity,
            "position sized"
        );

        let margin_type_changed = match self
            .binance_client
            .set_margin_type(&cfg.symbol, cfg.margin_type)
            .await
        {
            Ok(resp) => {
                info!(?resp, margin_type = %cfg.margin_type, "margin type set");
                true
            }
            Err(BinanceError::Api { code, message }) if code == MARGIN_TYPE_UNCHANGED => {
                info!(code, %message, margin_type = %cfg.margin_type, "margin type already set");
                false
            }
            Err(e) => return Err(e).context("setting margin type"),
        };

        let order = self
            .binance_client
            .place_limit_order(&LimitOrder {
                symbol: cfg.symbol.clone(),
                side: cfg.side,
                quantity: sizing.quantity.to_string(),
                price: cfg.price.clone(),
            })
            .await
            .context("placing limit order")?;
        info!(?order, "limit order placed");

        let stop = self
            .binance_client
            .place_close_position_stop(&ClosePositionStop {
                symbol: cfg.symbol.clone(),
                side: cfg.side.opposite(),
                stop_price: cfg.stop_price.clone(),
            })
            .await
            .context("placing closing stop order")?;
        info!(?stop, "closing stop placed");

        Ok(EntryReport {
            symbol_info,
            sizing,
            leverage,
            margin_type_changed,
            order,
            stop,
        })
    }
}
