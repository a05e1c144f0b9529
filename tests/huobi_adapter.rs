//! Integration tests for the Huobi adapter, driven through a recording
//! mock transport. Asserts both the normalized results and what actually
//! went over the wire (or, for contract errors, that nothing did).

use std::collections::VecDeque;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use exchange_adapters::api::TradingApi;
use exchange_adapters::config::AdapterConfig;
use exchange_adapters::domain::OrderSide;
use exchange_adapters::error::ExchangeError;
use exchange_adapters::http::Transport;
use exchange_adapters::huobi::HuobiAdapter;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordedCall {
    PublicGet(String),
    AuthenticatedPost(String),
}

/// Transport double: replays queued responses and records every call.
#[derive(Default)]
struct MockTransport {
    responses: Mutex<VecDeque<Result<String, ExchangeError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    fn replying(response: &str) -> Self {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        transport
    }

    fn failing(error: ExchangeError) -> Self {
        let transport = Self::default();
        transport.responses.lock().unwrap().push_back(Err(error));
        transport
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<String, ExchangeError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock transport ran out of canned responses")
    }
}

#[async_trait]
impl Transport for &MockTransport {
    async fn public_get(&self, path: &str) -> Result<String, ExchangeError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::PublicGet(path.to_string()));
        self.next_response()
    }

    async fn authenticated_post(&self, body: String) -> Result<String, ExchangeError> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::AuthenticatedPost(body));
        self.next_response()
    }
}

fn config() -> AdapterConfig {
    AdapterConfig::builder()
        .api_key("test-access-key")
        .api_secret("test-secret-key")
        .buy_fee_percent(dec("0.2"))
        .sell_fee_percent(dec("0.3"))
        .timeout_secs(30)
        .account_info_market("usd")
        .build()
        .unwrap()
}

fn adapter(transport: &MockTransport) -> HuobiAdapter<&MockTransport> {
    HuobiAdapter::with_transport(config(), transport)
}

fn authenticated_body(call: &RecordedCall) -> &str {
    match call {
        RecordedCall::AuthenticatedPost(body) => body,
        other => panic!("expected authenticated POST, got {other:?}"),
    }
}

// ─── Contract errors before any network call ─────────────────────────────────

#[tokio::test]
async fn unsupported_market_fails_before_any_network_call() {
    let transport = MockTransport::default();
    let adapter = adapter(&transport);

    let quantity = dec("0.01");
    let price = dec("250.00");

    assert!(matches!(
        adapter
            .create_order("LTC-CNY", OrderSide::Buy, quantity, price)
            .await,
        Err(ExchangeError::UnsupportedMarket { .. })
    ));
    assert!(matches!(
        adapter.cancel_order("37433151", "BTC-EUR").await,
        Err(ExchangeError::UnsupportedMarket { .. })
    ));
    assert!(matches!(
        adapter.open_orders("DOGE-MOON").await,
        Err(ExchangeError::UnsupportedMarket { .. })
    ));
    assert!(matches!(
        adapter.market_orders("LTC-CNY").await,
        Err(ExchangeError::UnsupportedMarket { .. })
    ));
    assert!(matches!(
        adapter.latest_market_price("LTC-CNY").await,
        Err(ExchangeError::UnsupportedMarket { .. })
    ));

    assert!(
        transport.calls().is_empty(),
        "contract errors must not reach the transport"
    );
}

// ─── create_order ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_order_returns_exchange_assigned_id() {
    let transport = MockTransport::replying(r#"{"result":"success","id":37433151}"#);
    let adapter = adapter(&transport);

    let id = adapter
        .create_order("BTC-USD", OrderSide::Buy, dec("0.0125"), dec("250.176"))
        .await
        .unwrap();
    assert_eq!(id, "37433151");
}

#[tokio::test]
async fn create_order_transmits_rounded_price_and_amount() {
    let transport = MockTransport::replying(r#"{"result":"success","id":1}"#);
    let adapter = adapter(&transport);

    adapter
        .create_order("BTC-USD", OrderSide::Buy, dec("0.0125"), dec("250.176"))
        .await
        .unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let body = authenticated_body(&calls[0]);
    assert!(body.starts_with("method=buy&access_key=test-access-key&created="));
    assert!(body.contains("&market=usd&"));
    assert!(body.contains("coin_type=1"));
    // 250.176 at 2 decimal places, half-even.
    assert!(body.contains("price=250.18"));
    assert!(body.contains("amount=0.0125"));
    assert!(body.contains("&sign="));
    assert!(!body.contains("test-secret-key"));
    assert!(!body.contains("secret_key"));
}

#[tokio::test]
async fn create_sell_order_uses_sell_method_and_cny_namespace() {
    let transport = MockTransport::replying(r#"{"result":"success","id":2}"#);
    let adapter = adapter(&transport);

    adapter
        .create_order("BTC-CNY", OrderSide::Sell, dec("1.0"), dec("1500.00"))
        .await
        .unwrap();

    let calls = transport.calls();
    let body = authenticated_body(&calls[0]);
    assert!(body.starts_with("method=sell&"));
    assert!(body.contains("&market=cny&"));
}

#[tokio::test]
async fn create_order_rejection_is_api_error_with_exchange_message() {
    let transport =
        MockTransport::replying(r#"{"code":10,"message":"Insufficient funds","msg":"Insufficient funds"}"#);
    let adapter = adapter(&transport);

    let err = adapter
        .create_order("BTC-USD", OrderSide::Buy, dec("100"), dec("250.00"))
        .await
        .unwrap_err();

    assert!(!err.is_transient());
    assert_eq!(err.exchange_code(), Some(10));
    assert!(err.to_string().contains("Insufficient funds"));
}

// ─── cancel_order ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancel_order_true_on_success() {
    let transport = MockTransport::replying(r#"{"result":"success"}"#);
    let adapter = adapter(&transport);

    assert!(adapter.cancel_order("37433151", "BTC-USD").await.unwrap());

    let calls = transport.calls();
    let body = authenticated_body(&calls[0]);
    assert!(body.starts_with("method=cancel_order&"));
    assert!(body.contains("id=37433151"));
}

#[tokio::test]
async fn cancel_order_false_when_exchange_declines() {
    // e.g. cancelling an already-filled order.
    let transport =
        MockTransport::replying(r#"{"code":41,"message":"Order already filled","msg":"Order already filled"}"#);
    let adapter = adapter(&transport);

    let cancelled = adapter.cancel_order("37433151", "BTC-USD").await.unwrap();
    assert!(!cancelled, "non-success cancel must be Ok(false), not an error");
}

#[tokio::test]
async fn cancel_order_still_fails_on_transport_error() {
    let transport = MockTransport::failing(ExchangeError::Timeout("socket timeout".into()));
    let adapter = adapter(&transport);

    let err = adapter.cancel_order("37433151", "BTC-USD").await.unwrap_err();
    assert!(err.is_transient());
}

// ─── open_orders ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_orders_normalizes_each_array_element() {
    let transport = MockTransport::replying(
        r#"[
            {"id":37433151,"type":2,"order_price":"270.18","order_amount":"0.0100","processed_amount":"0.0010","order_time":1444334637},
            {"id":37432968,"type":1,"order_price":"260.18","order_amount":"0.0100","processed_amount":"0.0000","order_time":1444334609}
        ]"#,
    );
    let adapter = adapter(&transport);

    let orders = adapter.open_orders("BTC-USD").await.unwrap();
    assert_eq!(orders.len(), 2);

    assert_eq!(orders[0].id, "37433151");
    assert_eq!(orders[0].side, OrderSide::Sell);
    assert_eq!(orders[0].quantity, dec("0.0090"));
    assert_eq!(orders[0].original_quantity, dec("0.0100"));
    assert_eq!(orders[0].price, dec("270.18"));
    assert_eq!(orders[0].market_id, "BTC-USD");
    assert_eq!(orders[0].created_at.timestamp(), 1444334637);

    assert_eq!(orders[1].side, OrderSide::Buy);
    assert_eq!(orders[1].quantity, dec("0.0100"));
}

#[tokio::test]
async fn open_orders_error_object_carries_exchange_code() {
    let transport =
        MockTransport::replying(r#"{"code":78,"message":"invalid market","msg":"invalid market"}"#);
    let adapter = adapter(&transport);

    let err = adapter.open_orders("BTC-USD").await.unwrap_err();
    assert_eq!(err.exchange_code(), Some(78));
    assert!(err.to_string().contains("invalid market"));
}

#[tokio::test]
async fn open_orders_unknown_field_in_error_object_is_fatal() {
    let transport =
        MockTransport::replying(r#"{"code":78,"message":"invalid market","extra_field":true}"#);
    let adapter = adapter(&transport);

    let err = adapter.open_orders("BTC-USD").await.unwrap_err();
    assert!(!err.is_transient());
}

// ─── market_orders / latest_market_price (public) ────────────────────────────

#[tokio::test]
async fn market_orders_hits_public_endpoint_and_adapts_levels() {
    let transport = MockTransport::replying(
        r#"{
            "sells": [{"price":245.0,"amount":0.5,"level":1},{"price":246.1,"amount":1.0,"level":1}],
            "buys":  [{"price":244.0,"amount":2.0,"level":1},{"price":243.5,"amount":0.1,"level":1}],
            "p_new": 244.8
        }"#,
    );
    let adapter = adapter(&transport);

    let book = adapter.market_orders("BTC-USD").await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![RecordedCall::PublicGet(
            "usdmarket/detail_btc_json.js".to_string()
        )]
    );
    assert_eq!(book.market_id, "BTC-USD");
    assert_eq!(book.sell_orders[0].total, dec("122.5"));
    assert_eq!(book.buy_orders[0].total, dec("488.0"));
    // Exchange ordering preserved: sells ascend, buys descend.
    assert!(book.sell_orders[0].price < book.sell_orders[1].price);
    assert!(book.buy_orders[0].price > book.buy_orders[1].price);
}

#[tokio::test]
async fn latest_market_price_reads_ticker_last() {
    let transport = MockTransport::replying(
        r#"{"time":1444334637,"ticker":{"vol":1023.5,"last":"244.8","buy":244.7,"sell":244.9,"high":250.0,"low":240.1}}"#,
    );
    let adapter = adapter(&transport);

    let price = adapter.latest_market_price("BTC-CNY").await.unwrap();
    assert_eq!(price, dec("244.8"));
    assert_eq!(
        transport.calls(),
        vec![RecordedCall::PublicGet(
            "staticmarket/ticker_btc_json.js".to_string()
        )]
    );
}

// ─── balance_info ────────────────────────────────────────────────────────────

#[tokio::test]
async fn balance_info_uses_configured_account_namespace() {
    let transport = MockTransport::replying(
        r#"{
            "code": 0,
            "total": "1000.00",
            "net_asset": "990.00",
            "available_btc_display": "1.5000",
            "available_cny_display": "0.00",
            "available_usd_display": "450.25",
            "frozen_btc_display": "0.2500",
            "frozen_cny_display": "0.00",
            "frozen_usd_display": "10.00",
            "loan_btc_display": "0.00",
            "loan_cny_display": "0.00",
            "loan_usd_display": "0.00"
        }"#,
    );
    let adapter = adapter(&transport);

    let balances = adapter.balance_info().await.unwrap();
    assert_eq!(balances.available_for("BTC"), dec("1.5"));
    assert_eq!(balances.available_for("USD"), dec("450.25"));
    assert_eq!(balances.on_order_for("BTC"), dec("0.25"));
    // Absent currency reads as zero.
    assert_eq!(balances.available_for("LTC"), Decimal::ZERO);

    let calls = transport.calls();
    let body = authenticated_body(&calls[0]);
    assert!(body.starts_with("method=get_account_info&"));
    // Settlement namespace comes from config, not from any market id.
    assert!(body.contains("&market=usd"));
}

#[tokio::test]
async fn balance_info_error_code_is_fatal() {
    let transport =
        MockTransport::replying(r#"{"code":71,"message":"no permission","msg":"no permission"}"#);
    let adapter = adapter(&transport);

    let err = adapter.balance_info().await.unwrap_err();
    assert_eq!(err.exchange_code(), Some(71));
    assert!(!err.is_transient());
}

// ─── Error propagation ───────────────────────────────────────────────────────

#[tokio::test]
async fn transient_transport_failures_surface_unchanged() {
    let transport = MockTransport::failing(ExchangeError::Timeout(
        "exchange returned HTTP 503 Service Unavailable".into(),
    ));
    let adapter = adapter(&transport);

    let err = adapter.open_orders("BTC-USD").await.unwrap_err();
    assert!(err.is_transient(), "503 must classify as a timeout");
}

#[tokio::test]
async fn garbage_response_is_fatal_api_error() {
    let transport = MockTransport::replying("<html>502 Bad Gateway</html>");
    let adapter = adapter(&transport);

    let err = adapter.market_orders("BTC-USD").await.unwrap_err();
    assert!(!err.is_transient());
}

// ─── Fees and identity ───────────────────────────────────────────────────────

#[tokio::test]
async fn fees_are_static_fractions_and_never_hit_the_network() {
    let transport = MockTransport::default();
    let adapter = adapter(&transport);

    assert_eq!(
        adapter.buy_fee_fraction("BTC-USD").await.unwrap(),
        dec("0.002")
    );
    assert_eq!(
        adapter.sell_fee_fraction("BTC-CNY").await.unwrap(),
        dec("0.003")
    );
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn impl_name_identifies_the_adapter() {
    let transport = MockTransport::default();
    let adapter = adapter(&transport);
    assert_eq!(adapter.impl_name(), "Huobi REST Trade API v3");
}
