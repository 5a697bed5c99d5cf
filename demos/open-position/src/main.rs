//! Open a leveraged position on Binance USDT-M perps and attach a closing stop.
//!
//! Credentials come from `APIKEY` / `APISECRET` (a `.env` file is read if present).
//!
//! Usage: open-position [--symbol ETCUSDT] [--side SELL] [--leverage 5] [--percent 12]
//!                      [--margin-type ISOLATED] [--price 62.123] [--stop-price 68.420]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use clients_binance::{BinancePerpsClient, BinancePerpsClientConfig, MarginType, Side};
use entry::{EntryStrategy, EntryStrategyConfig};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "open-position", about = "Place a risk-sized limit entry with a closing stop")]
struct Args {
    #[arg(long, default_value = "ETCUSDT")]
    symbol: String,
    /// BUY or SELL
    #[arg(long, default_value = "SELL")]
    side: Side,
    #[arg(long, default_value_t = 5)]
    leverage: u32,
    /// Share of the available balance committed as margin, in percent
    #[arg(long, default_value = "12")]
    percent: Decimal,
    /// ISOLATED or CROSSED
    #[arg(long, default_value = "ISOLATED")]
    margin_type: MarginType,
    /// Limit price of the opening order
    #[arg(long, default_value = "62.123")]
    price: String,
    /// Trigger price of the stop that closes the position
    #[arg(long, default_value = "68.420")]
    stop_price: String,
    #[arg(long, default_value = "USDT")]
    quote_asset: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let client = reqwest::Client::builder().build()?;
    let client = Arc::new(client);
    let config = BinancePerpsClientConfig::from_env()?;
    let perps = BinancePerpsClient::new(client, config);
    info!(
        base_url = perps.base_url(),
        symbol = %args.symbol,
        side = %args.side,
        "starting entry"
    );

    let strategy = EntryStrategy::new(
        EntryStrategyConfig {
            symbol: args.symbol,
            side: args.side,
            leverage: args.leverage,
            risk_percent: args.percent,
            margin_type: args.margin_type,
            price: args.price,
            stop_price: args.stop_price,
            quote_asset: args.quote_asset,
        },
        perps,
    );

    let report = strategy.run().await?;
    info!(
        order_id = report.order.order_id,
        stop_order_id = report.stop.order_id,
        quantity = %report.sizing.quantity,
        "entry complete"
    );
    Ok(())
}
