//! The uniform trading contract every exchange adapter implements.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{BalanceInfo, MarketOrderBook, OpenOrder, OrderSide};
use crate::error::ExchangeError;

/// Trading operations offered by every exchange adapter.
///
/// An engine drives one adapter instance with a single in-flight call at a
/// time; adapters carry no interior locking, and trade-execution ordering is
/// the engine's responsibility. Distinct adapter instances share no mutable
/// state and may be driven concurrently from independent tasks.
///
/// Every operation either returns a fully populated result or fails with an
/// [`ExchangeError`]; partial results are never returned. A `market_id`
/// outside the adapter's supported set fails with
/// [`ExchangeError::UnsupportedMarket`] before any network request is made.
#[async_trait]
pub trait TradingApi: Send + Sync {
    /// Place a limit order and return the exchange-assigned order id.
    ///
    /// Price and quantity are rounded to the exchange's required precision
    /// before transmission; see the adapter's documented precision policy.
    async fn create_order(
        &self,
        market_id: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<String, ExchangeError>;

    /// Cancel a resting order.
    ///
    /// Returns `Ok(false)` when the exchange reports the order could not be
    /// cancelled (already filled, already cancelled). That is a defined
    /// outcome, not an error; transport and parse failures still fail.
    async fn cancel_order(&self, order_id: &str, market_id: &str) -> Result<bool, ExchangeError>;

    /// The caller's own resting orders for a market.
    async fn open_orders(&self, market_id: &str) -> Result<Vec<OpenOrder>, ExchangeError>;

    /// Current order-book snapshot for a market. Public data, unauthenticated.
    async fn market_orders(&self, market_id: &str) -> Result<MarketOrderBook, ExchangeError>;

    /// Wallet balances. Authenticated; the settlement-currency namespace is
    /// fixed by adapter config, independent of any market id.
    async fn balance_info(&self) -> Result<BalanceInfo, ExchangeError>;

    /// Last traded price for a market. Public data, unauthenticated.
    async fn latest_market_price(&self, market_id: &str) -> Result<Decimal, ExchangeError>;

    /// Fraction (0..1) of a buy order taken as exchange fee.
    ///
    /// May be a statically configured constant when the exchange does not
    /// expose fees over its API.
    async fn buy_fee_fraction(&self, market_id: &str) -> Result<Decimal, ExchangeError>;

    /// Fraction (0..1) of a sell order taken as exchange fee.
    async fn sell_fee_fraction(&self, market_id: &str) -> Result<Decimal, ExchangeError>;

    /// Adapter identity string, for logging and diagnostics only.
    fn impl_name(&self) -> &'static str;
}
