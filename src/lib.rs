//! # exchange-adapters
//!
//! An exchange adapter framework for automated trading bots. A strategy
//! engine issues the same small set of trading operations against any
//! exchange; each adapter independently handles wire-level authentication,
//! request construction, response normalization, numeric precision, and
//! failure classification for one exchange.
//!
//! ## Architecture
//!
//! Layered, leaves first:
//!
//! 1. **Domain** — exchange-independent value types and the error taxonomy
//! 2. **Transport** — public (GET) and authenticated (signed POST) HTTP
//!    requests, with transient/fatal failure classification
//! 3. **Auth** — per-exchange request signing over a canonical parameter
//!    encoding
//! 4. **Adapters** — one module per exchange composing the layers behind
//!    the uniform [`TradingApi`](api::TradingApi) contract; each adapter
//!    owns its exchange's credentials, fees, precision rules, and
//!    market-id mapping
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use exchange_adapters::prelude::*;
//!
//! let config = AdapterConfig::builder()
//!     .api_key("your-key")
//!     .api_secret("your-secret")
//!     .buy_fee_percent("0.2".parse()?)
//!     .sell_fee_percent("0.2".parse()?)
//!     .timeout_secs(30)
//!     .account_info_market("usd")
//!     .build()?;
//!
//! let adapter = HuobiAdapter::new(config)?;
//! let book = adapter.market_orders("BTC-USD").await?;
//! let order_id = adapter
//!     .create_order("BTC-USD", OrderSide::Buy, quantity, price)
//!     .await?;
//! ```
//!
//! ## Concurrency
//!
//! An adapter instance is single-owner, single-caller: drive it with one
//! in-flight call at a time to preserve trade-execution ordering. Distinct
//! instances share no mutable state and may run concurrently.

// ── Layer 1: Domain ──────────────────────────────────────────────────────────

/// Exchange-independent domain types.
pub mod domain;

/// Unified adapter error types.
pub mod error;

/// The uniform trading contract.
pub mod api;

/// Per-exchange adapter configuration.
pub mod config;

// ── Layer 2: Transport ───────────────────────────────────────────────────────

/// HTTP transport with transient/fatal failure classification.
pub mod http;

// ── Layer 3: Auth ────────────────────────────────────────────────────────────

/// Request signing for authenticated exchange calls.
pub mod auth;

// ── Layer 4: Adapters ────────────────────────────────────────────────────────

/// Reference adapter: Huobi REST Trade API v3.
pub mod huobi;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::api::TradingApi;
    pub use crate::config::{AdapterConfig, AdapterConfigBuilder};
    pub use crate::domain::{BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderSide};
    pub use crate::error::ExchangeError;
    pub use crate::http::{HttpTransport, Transport};
    pub use crate::huobi::HuobiAdapter;
}
