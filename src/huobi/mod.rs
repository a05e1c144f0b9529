//! Reference adapter: Huobi REST Trade API v3. Limit orders only.
//!
//! Public calls take engine-facing market ids (`BTC-USD`, `BTC-CNY`).
//! Authenticated calls need the bare settlement currency (`usd`, `cny`);
//! the mapping lives in [`PublicMarket`] so callers only ever see the
//! public ids. Balance queries use the statically configured
//! `account_info_market` namespace instead.
//!
//! Precision policy: Huobi rejects prices with more than 2 decimal places
//! and amounts with more than 4. Both are rounded half-even before
//! transmission; 250.176 goes out as 250.18.
//!
//! Fees are not exposed over the Huobi API, so the adapter serves the
//! statically configured fractions for every market.
//!
//! An adapter instance is single-owner, single-caller: no interior locking,
//! one in-flight call at a time, so trade-execution order matches the
//! engine's decisions.

pub mod wire;

mod convert;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::api::TradingApi;
use crate::auth;
use crate::config::AdapterConfig;
use crate::domain::{BalanceInfo, MarketOrderBook, OpenOrder, OrderSide};
use crate::error::ExchangeError;
use crate::http::{HttpTransport, Transport};

pub const PUBLIC_API_BASE_URL: &str = "http://api.huobi.com/";
pub const AUTHENTICATED_API_URL: &str = "https://api.huobi.com/apiv3/";

const IMPL_NAME: &str = "Huobi REST Trade API v3";

/// Only BTC trading is supported; `coin_type=1` on every trade call.
const COIN_TYPE_BTC: &str = "1";

const PRICE_DECIMAL_PLACES: u32 = 2;
const AMOUNT_DECIMAL_PLACES: u32 = 4;

// ─── Market-id mapping ───────────────────────────────────────────────────────

/// The markets this adapter serves, with the id translation each call
/// family needs. The mapping is total over the supported set; anything
/// else fails before a request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublicMarket {
    BtcUsd,
    BtcCny,
}

impl PublicMarket {
    const SUPPORTED: &'static str = "BTC-USD, BTC-CNY";

    fn from_market_id(market_id: &str) -> Result<Self, ExchangeError> {
        match market_id {
            "BTC-USD" => Ok(Self::BtcUsd),
            "BTC-CNY" => Ok(Self::BtcCny),
            other => Err(ExchangeError::UnsupportedMarket {
                market_id: other.to_string(),
                supported: Self::SUPPORTED,
            }),
        }
    }

    /// The settlement-currency id authenticated calls expect.
    fn authenticated_id(self) -> &'static str {
        match self {
            Self::BtcUsd => "usd",
            Self::BtcCny => "cny",
        }
    }

    fn order_book_path(self) -> &'static str {
        match self {
            Self::BtcUsd => "usdmarket/detail_btc_json.js",
            Self::BtcCny => "staticmarket/detail_btc_json.js",
        }
    }

    fn ticker_path(self) -> &'static str {
        match self {
            Self::BtcUsd => "usdmarket/ticker_btc_json.js",
            Self::BtcCny => "staticmarket/ticker_btc_json.js",
        }
    }
}

// ─── Precision policy ────────────────────────────────────────────────────────

fn format_price(price: Decimal) -> String {
    price
        .round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .normalize()
        .to_string()
}

fn format_amount(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .normalize()
        .to_string()
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// The Huobi exchange adapter.
///
/// Generic over [`Transport`] so tests can drive it with a recording mock;
/// production code uses [`HuobiAdapter::new`], which wires up a real
/// [`HttpTransport`] against the Huobi endpoints.
pub struct HuobiAdapter<T = HttpTransport> {
    config: AdapterConfig,
    transport: T,
}

impl HuobiAdapter<HttpTransport> {
    /// Builds the adapter and its transport eagerly; construction fails
    /// fast on invalid config or an unbuildable HTTP client.
    pub fn new(config: AdapterConfig) -> Result<Self, ExchangeError> {
        let transport = HttpTransport::new(
            PUBLIC_API_BASE_URL,
            AUTHENTICATED_API_URL,
            config.timeout_secs(),
        )?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> HuobiAdapter<T> {
    /// Builds the adapter over a caller-supplied transport.
    pub fn with_transport(config: AdapterConfig, transport: T) -> Self {
        Self { config, transport }
    }

    async fn authenticated_call(
        &self,
        method: &str,
        market: Option<&str>,
        params: &[(&str, String)],
    ) -> Result<String, ExchangeError> {
        let body = auth::build_signed_payload(
            self.config.api_key(),
            self.config.api_secret(),
            method,
            market,
            params,
            Utc::now().timestamp(),
        );
        self.transport.authenticated_post(body).await
    }
}

#[async_trait]
impl<T: Transport> TradingApi for HuobiAdapter<T> {
    async fn create_order(
        &self,
        market_id: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError> {
        let market = PublicMarket::from_market_id(market_id)?;
        let method = match side {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        };
        let params = [
            ("coin_type", COIN_TYPE_BTC.to_string()),
            ("price", format_price(price)),
            ("amount", format_amount(quantity)),
        ];

        let raw = self
            .authenticated_call(method, Some(market.authenticated_id()), &params)
            .await?;
        tracing::debug!(response = %raw, "create_order response");

        let response: wire::TradeResponse = serde_json::from_str(&raw)?;
        match (response.is_success(), response.id) {
            (true, Some(id)) => Ok(id.to_string()),
            _ => {
                tracing::error!(response = %raw, "exchange rejected order");
                Err(ExchangeError::Api {
                    code: Some(response.status.code).filter(|c| *c != 0),
                    message: format!(
                        "failed to place order on exchange: {} (raw response: {raw})",
                        response.status.reason()
                    ),
                })
            }
        }
    }

    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError> {
        let market = PublicMarket::from_market_id(market_id)?;
        let params = [
            ("coin_type", COIN_TYPE_BTC.to_string()),
            ("id", order_id.to_string()),
        ];

        let raw = self
            .authenticated_call("cancel_order", Some(market.authenticated_id()), &params)
            .await?;
        tracing::debug!(response = %raw, "cancel_order response");

        let response: wire::CancelOrderResponse = serde_json::from_str(&raw)?;
        if response.is_success() {
            Ok(true)
        } else {
            // Defined non-error outcome: the order could not be cancelled
            // (typically already filled or already gone).
            tracing::warn!(
                order_id,
                code = response.status.code,
                reason = response.status.reason(),
                "exchange declined to cancel order"
            );
            Ok(false)
        }
    }

    async fn open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError> {
        let market = PublicMarket::from_market_id(market_id)?;
        let params = [("coin_type", COIN_TYPE_BTC.to_string())];

        let raw = self
            .authenticated_call("get_orders", Some(market.authenticated_id()), &params)
            .await?;
        tracing::debug!(response = %raw, "get_orders response");

        match wire::OpenOrdersResponse::from_json(&raw)? {
            wire::OpenOrdersResponse::Orders(orders) => orders
                .into_iter()
                .map(|order| OpenOrder::try_from((market_id, order)))
                .collect(),
            wire::OpenOrdersResponse::Error(envelope) => Err(ExchangeError::Api {
                code: Some(envelope.code),
                message: format!(
                    "failed to fetch open orders from exchange: {}",
                    envelope.reason()
                ),
            }),
        }
    }

    async fn market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError> {
        let market = PublicMarket::from_market_id(market_id)?;

        let raw = self.transport.public_get(market.order_book_path()).await?;
        tracing::debug!(response = %raw, "order book response");

        let book: wire::OrderBookResponse = serde_json::from_str(&raw)?;
        Ok(MarketOrderBook::from((market_id, book)))
    }

    async fn balance_info(&self) -> Result<BalanceInfo, ExchangeError> {
        let raw = self
            .authenticated_call(
                "get_account_info",
                Some(self.config.account_info_market()),
                &[],
            )
            .await?;
        tracing::debug!(response = %raw, "get_account_info response");

        let info: wire::AccountInfoResponse = serde_json::from_str(&raw)?;
        if info.status.is_success() {
            Ok(BalanceInfo::from(info))
        } else {
            Err(ExchangeError::Api {
                code: Some(info.status.code),
                message: format!(
                    "failed to fetch balance info from exchange: {}",
                    info.status.reason()
                ),
            })
        }
    }

    async fn latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError> {
        let market = PublicMarket::from_market_id(market_id)?;

        let raw = self.transport.public_get(market.ticker_path()).await?;
        tracing::debug!(response = %raw, "ticker response");

        let ticker: wire::TickerResponse = serde_json::from_str(&raw)?;
        Ok(ticker.ticker.last)
    }

    async fn buy_fee_fraction(&self, _market_id: &str) -> Result<Decimal, ExchangeError> {
        // Huobi exposes only per-order fee totals over its API, so the
        // configured fraction serves every market.
        Ok(self.config.buy_fee_fraction())
    }

    async fn sell_fee_fraction(&self, _market_id: &str) -> Result<Decimal, ExchangeError> {
        Ok(self.config.sell_fee_fraction())
    }

    fn impl_name(&self) -> &'static str {
        IMPL_NAME
    }
}
