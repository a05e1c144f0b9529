//! Wire types for the Huobi REST Trade API v3.
//!
//! Authenticated responses share a status envelope (`code`, `message`,
//! legacy `msg`); `code == 0` means success. The envelope is embedded by
//! value in each response struct via `#[serde(flatten)]` rather than
//! through any shared hierarchy.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ExchangeError;

// ─── Status envelope ─────────────────────────────────────────────────────────

/// Status fields carried by every authenticated response.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Status {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    /// Legacy duplicate of `message`, kept by the exchange for backwards
    /// compatibility.
    #[serde(default)]
    pub msg: Option<String>,
}

impl Status {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// The error text, preferring the modern field over the legacy one.
    pub fn reason(&self) -> &str {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .unwrap_or("no error message from exchange")
    }
}

/// Strict form of [`Status`] for endpoints that return a bare error object.
///
/// Unknown fields are fatal here: if the exchange adds fields to this shape
/// it has changed its contract, and guessing would be worse than failing.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ErrorEnvelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorEnvelope {
    pub fn reason(&self) -> &str {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .unwrap_or("no error message from exchange")
    }
}

// ─── buy / sell ──────────────────────────────────────────────────────────────

/// Response to the `buy` and `sell` limit-order calls.
#[derive(Deserialize, Debug, Clone)]
pub struct TradeResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl TradeResponse {
    pub fn is_success(&self) -> bool {
        self.result
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("success"))
    }
}

// ─── cancel_order ────────────────────────────────────────────────────────────

/// Response to the `cancel_order` call.
#[derive(Deserialize, Debug, Clone)]
pub struct CancelOrderResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub result: Option<String>,
}

impl CancelOrderResponse {
    pub fn is_success(&self) -> bool {
        self.result
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("success"))
    }
}

// ─── get_orders ──────────────────────────────────────────────────────────────

/// One resting order from a `get_orders` success response.
#[derive(Deserialize, Debug, Clone)]
pub struct WireOpenOrder {
    pub id: i64,
    /// 1 = buy, 2 = sell.
    #[serde(rename = "type")]
    pub order_type: i64,
    pub order_price: Decimal,
    pub order_amount: Decimal,
    pub processed_amount: Decimal,
    /// Unix timestamp in seconds.
    pub order_time: i64,
}

/// `get_orders` returns a JSON *array* of orders on success but a JSON
/// *object* (error envelope) on failure. The top-level JSON kind is sniffed
/// first, then one of two fixed parse paths runs; there is no blind
/// structural parse.
#[derive(Debug)]
pub enum OpenOrdersResponse {
    Orders(Vec<WireOpenOrder>),
    Error(ErrorEnvelope),
}

impl OpenOrdersResponse {
    pub fn from_json(raw: &str) -> Result<Self, ExchangeError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| ExchangeError::api(format!("get_orders response is not JSON: {e}")))?;
        match value {
            Value::Array(_) => Ok(Self::Orders(serde_json::from_value(value).map_err(
                |e| ExchangeError::api(format!("failed to parse get_orders order list: {e}")),
            )?)),
            Value::Object(_) => Ok(Self::Error(serde_json::from_value(value).map_err(
                |e| {
                    ExchangeError::api(format!(
                        "unrecognized get_orders error response (exchange contract changed?): {e}"
                    ))
                },
            )?)),
            other => Err(ExchangeError::api(format!(
                "get_orders returned neither object nor array: {other}"
            ))),
        }
    }
}

// ─── get_account_info ────────────────────────────────────────────────────────

/// Response to the `get_account_info` call.
///
/// Balance fields default to zero so the error form (status envelope only)
/// still parses; callers must check the status before trusting balances.
#[derive(Deserialize, Debug, Clone)]
pub struct AccountInfoResponse {
    #[serde(flatten)]
    pub status: Status,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub net_asset: Option<Decimal>,
    #[serde(default)]
    pub available_btc_display: Decimal,
    #[serde(default)]
    pub available_cny_display: Decimal,
    #[serde(default)]
    pub available_usd_display: Decimal,
    #[serde(default)]
    pub frozen_btc_display: Decimal,
    #[serde(default)]
    pub frozen_cny_display: Decimal,
    #[serde(default)]
    pub frozen_usd_display: Decimal,
    #[serde(default)]
    pub loan_btc_display: Decimal,
    #[serde(default)]
    pub loan_cny_display: Decimal,
    #[serde(default)]
    pub loan_usd_display: Decimal,
}

// ─── Order book (public) ─────────────────────────────────────────────────────

/// One price level in the public order-book response.
#[derive(Deserialize, Debug, Clone)]
pub struct WireLevel {
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(default)]
    pub level: Option<Decimal>,
}

/// A `top_buy`/`top_sell` level: a plain level plus a running accumulation.
#[derive(Deserialize, Debug, Clone)]
pub struct WireTopLevel {
    #[serde(flatten)]
    pub level: WireLevel,
    #[serde(default)]
    pub accu: Option<Decimal>,
}

/// One public trade record embedded in the order-book response.
#[derive(Deserialize, Debug, Clone)]
pub struct WireTrade {
    pub price: Decimal,
    pub amount: Decimal,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub en_type: Option<String>,
}

/// The `detail_btc_json.js` order-book wrapper. Sells arrive ascending and
/// buys descending; that ordering is trusted as-is downstream.
#[derive(Deserialize, Debug, Clone)]
pub struct OrderBookResponse {
    pub buys: Vec<WireLevel>,
    pub sells: Vec<WireLevel>,
    #[serde(default)]
    pub top_buy: Vec<WireTopLevel>,
    #[serde(default)]
    pub top_sell: Vec<WireTopLevel>,
    #[serde(default)]
    pub trades: Vec<WireTrade>,
    #[serde(default)]
    pub p_new: Option<Decimal>,
    #[serde(default)]
    pub p_last: Option<Decimal>,
    #[serde(default)]
    pub p_high: Option<Decimal>,
    #[serde(default)]
    pub p_low: Option<Decimal>,
    #[serde(default)]
    pub p_open: Option<Decimal>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub amp: Option<Decimal>,
    #[serde(default)]
    pub level: Option<Decimal>,
}

// ─── Ticker (public) ─────────────────────────────────────────────────────────

/// The `ticker_btc_json.js` response.
#[derive(Deserialize, Debug, Clone)]
pub struct TickerResponse {
    #[serde(default)]
    pub time: Option<i64>,
    pub ticker: WireTicker,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WireTicker {
    pub last: Decimal,
    #[serde(default)]
    pub vol: Option<Decimal>,
    #[serde(default)]
    pub buy: Option<Decimal>,
    #[serde(default)]
    pub sell: Option<Decimal>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
}
