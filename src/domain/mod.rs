//! Exchange-independent domain types.
//!
//! Every adapter normalizes its wire responses into these values before
//! handing them to the engine. They are built per call, immutable once
//! built, and owned by the caller on return.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── OrderSide ───────────────────────────────────────────────────────────────

/// Order side: Buy (bid) or Sell (ask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

// ─── MarketOrder ─────────────────────────────────────────────────────────────

/// One order-book level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketOrder {
    pub side: OrderSide,
    pub price: Decimal,
    pub quantity: Decimal,
    /// `price * quantity`, computed at construction.
    pub total: Decimal,
}

impl MarketOrder {
    pub fn new(side: OrderSide, price: Decimal, quantity: Decimal) -> Self {
        Self {
            side,
            price,
            quantity,
            total: price * quantity,
        }
    }
}

// ─── MarketOrderBook ─────────────────────────────────────────────────────────

/// Immutable snapshot of one market's order book.
///
/// `sell_orders` ascend by price, `buy_orders` descend, in the order the
/// exchange returned them. Snapshots are never updated in place; fetch a
/// fresh one instead.
#[derive(Debug, Clone)]
pub struct MarketOrderBook {
    pub market_id: String,
    pub sell_orders: Vec<MarketOrder>,
    pub buy_orders: Vec<MarketOrder>,
}

impl MarketOrderBook {
    pub fn new(
        market_id: impl Into<String>,
        sell_orders: Vec<MarketOrder>,
        buy_orders: Vec<MarketOrder>,
    ) -> Self {
        Self {
            market_id: market_id.into(),
            sell_orders,
            buy_orders,
        }
    }
}

// ─── OpenOrder ───────────────────────────────────────────────────────────────

/// A resting order owned by the caller.
///
/// Invariant: `0 <= quantity <= original_quantity`, where `quantity` is the
/// amount still unfilled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOrder {
    /// Exchange-assigned order id.
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub market_id: String,
    pub side: OrderSide,
    pub price: Decimal,
    /// Quantity remaining unfilled.
    pub quantity: Decimal,
    pub original_quantity: Decimal,
    /// `price * original_quantity`.
    pub total: Decimal,
}

// ─── BalanceInfo ─────────────────────────────────────────────────────────────

/// Wallet balances keyed by uppercase currency code.
///
/// An absent currency key means a zero balance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceInfo {
    /// Funds available for trading.
    pub available: HashMap<String, Decimal>,
    /// Funds locked in resting orders.
    pub on_order: HashMap<String, Decimal>,
}

impl BalanceInfo {
    pub fn new(available: HashMap<String, Decimal>, on_order: HashMap<String, Decimal>) -> Self {
        Self {
            available,
            on_order,
        }
    }

    /// Available balance for a currency; zero when the key is absent.
    pub fn available_for(&self, currency: &str) -> Decimal {
        self.available.get(currency).copied().unwrap_or_default()
    }

    /// On-order balance for a currency; zero when the key is absent.
    pub fn on_order_for(&self, currency: &str) -> Decimal {
        self.on_order.get(currency).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_market_order_total() {
        let order = MarketOrder::new(OrderSide::Buy, dec("270.18"), dec("0.01"));
        assert_eq!(order.total, dec("2.7018"));
    }

    #[test]
    fn test_side_serde() {
        let buy: OrderSide = serde_json::from_str("\"BUY\"").unwrap();
        assert_eq!(buy, OrderSide::Buy);
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn test_balance_absent_currency_is_zero() {
        let mut available = HashMap::new();
        available.insert("BTC".to_string(), dec("1.5"));
        let info = BalanceInfo::new(available, HashMap::new());
        assert_eq!(info.available_for("BTC"), dec("1.5"));
        assert_eq!(info.available_for("LTC"), Decimal::ZERO);
        assert_eq!(info.on_order_for("BTC"), Decimal::ZERO);
    }
}
