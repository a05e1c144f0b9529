//! Conversions: Huobi wire types → domain types.

use chrono::{DateTime, Utc};

use super::wire;
use crate::domain::{BalanceInfo, MarketOrder, MarketOrderBook, OpenOrder, OrderSide};
use crate::error::ExchangeError;

impl TryFrom<(&str, wire::WireOpenOrder)> for OpenOrder {
    type Error = ExchangeError;

    fn try_from((market_id, order): (&str, wire::WireOpenOrder)) -> Result<Self, Self::Error> {
        let side = match order.order_type {
            1 => OrderSide::Buy,
            2 => OrderSide::Sell,
            other => {
                return Err(ExchangeError::api(format!(
                    "unrecognized order type in open order {}: {other}",
                    order.id
                )))
            }
        };

        let created_at = DateTime::<Utc>::from_timestamp(order.order_time, 0).ok_or_else(|| {
            ExchangeError::api(format!(
                "open order {} carries an out-of-range timestamp: {}",
                order.id, order.order_time
            ))
        })?;

        Ok(OpenOrder {
            id: order.id.to_string(),
            created_at,
            market_id: market_id.to_string(),
            side,
            price: order.order_price,
            quantity: order.order_amount - order.processed_amount,
            original_quantity: order.order_amount,
            // Total is not provided on the wire.
            total: order.order_price * order.order_amount,
        })
    }
}

impl From<(&str, wire::OrderBookResponse)> for MarketOrderBook {
    fn from((market_id, book): (&str, wire::OrderBookResponse)) -> Self {
        // Exchange ordering (sells ascending, buys descending) is trusted
        // as-is and not re-sorted.
        let sell_orders = book
            .sells
            .into_iter()
            .map(|level| MarketOrder::new(OrderSide::Sell, level.price, level.amount))
            .collect();
        let buy_orders = book
            .buys
            .into_iter()
            .map(|level| MarketOrder::new(OrderSide::Buy, level.price, level.amount))
            .collect();
        MarketOrderBook::new(market_id, sell_orders, buy_orders)
    }
}

impl From<wire::AccountInfoResponse> for BalanceInfo {
    fn from(info: wire::AccountInfoResponse) -> Self {
        let available = [
            ("BTC".to_string(), info.available_btc_display),
            ("CNY".to_string(), info.available_cny_display),
            ("USD".to_string(), info.available_usd_display),
        ]
        .into_iter()
        .collect();
        let on_order = [
            ("BTC".to_string(), info.frozen_btc_display),
            ("CNY".to_string(), info.frozen_cny_display),
            ("USD".to_string(), info.frozen_usd_display),
        ]
        .into_iter()
        .collect();
        BalanceInfo::new(available, on_order)
    }
}
