//! Per-exchange adapter configuration.
//!
//! An [`AdapterConfig`] is built once from externally supplied, already
//! validated settings and injected at adapter construction. It is never
//! mutated afterward. Validation is fail-fast: a missing credential or a
//! zero timeout is a configuration bug, caught before any network call.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ExchangeError;

/// Decimal places kept when converting a fee percentage to a fraction.
const FEE_FRACTION_SCALE: u32 = 8;

/// Immutable per-exchange settings captured at adapter construction.
///
/// `Debug` redacts the API secret so the config can appear in diagnostics.
#[derive(Clone)]
pub struct AdapterConfig {
    api_key: String,
    api_secret: String,
    buy_fee_fraction: Decimal,
    sell_fee_fraction: Decimal,
    timeout_secs: u64,
    account_info_market: String,
}

impl AdapterConfig {
    pub fn builder() -> AdapterConfigBuilder {
        AdapterConfigBuilder::default()
    }

    /// The public API key, sent with every authenticated request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The shared secret used for signing. Never transmitted, never logged.
    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }

    /// Buy fee as a fraction in `0..1` (e.g. 0.2% becomes 0.002).
    pub fn buy_fee_fraction(&self) -> Decimal {
        self.buy_fee_fraction
    }

    /// Sell fee as a fraction in `0..1`.
    pub fn sell_fee_fraction(&self) -> Decimal {
        self.sell_fee_fraction
    }

    /// Connect/read timeout for exchange calls, in seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// The settlement-currency namespace (e.g. `"usd"`) used for balance
    /// queries, independent of any market-id argument.
    pub fn account_info_market(&self) -> &str {
        &self.account_info_market
    }
}

impl std::fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("buy_fee_fraction", &self.buy_fee_fraction)
            .field("sell_fee_fraction", &self.sell_fee_fraction)
            .field("timeout_secs", &self.timeout_secs)
            .field("account_info_market", &self.account_info_market)
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

/// Builder for [`AdapterConfig`]. Fees are given as percentages (`0.2` for
/// 0.2%) and converted once at build time to fractions, rounded half-even to
/// eight decimal places.
#[derive(Default)]
pub struct AdapterConfigBuilder {
    api_key: String,
    api_secret: String,
    buy_fee_percent: Option<Decimal>,
    sell_fee_percent: Option<Decimal>,
    timeout_secs: u64,
    account_info_market: String,
}

impl AdapterConfigBuilder {
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = key.to_string();
        self
    }

    pub fn api_secret(mut self, secret: &str) -> Self {
        self.api_secret = secret.to_string();
        self
    }

    pub fn buy_fee_percent(mut self, percent: Decimal) -> Self {
        self.buy_fee_percent = Some(percent);
        self
    }

    pub fn sell_fee_percent(mut self, percent: Decimal) -> Self {
        self.sell_fee_percent = Some(percent);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn account_info_market(mut self, market: &str) -> Self {
        self.account_info_market = market.to_string();
        self
    }

    pub fn build(self) -> Result<AdapterConfig, ExchangeError> {
        if self.api_key.is_empty() {
            return Err(ExchangeError::Config("api_key cannot be empty".into()));
        }
        if self.api_secret.is_empty() {
            return Err(ExchangeError::Config("api_secret cannot be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ExchangeError::Config("timeout_secs cannot be zero".into()));
        }
        if self.account_info_market.is_empty() {
            return Err(ExchangeError::Config(
                "account_info_market cannot be empty".into(),
            ));
        }

        let buy_fee_fraction = fee_fraction("buy fee", self.buy_fee_percent)?;
        let sell_fee_fraction = fee_fraction("sell fee", self.sell_fee_percent)?;

        Ok(AdapterConfig {
            api_key: self.api_key,
            api_secret: self.api_secret,
            buy_fee_fraction,
            sell_fee_fraction,
            timeout_secs: self.timeout_secs,
            account_info_market: self.account_info_market,
        })
    }
}

fn fee_fraction(label: &str, percent: Option<Decimal>) -> Result<Decimal, ExchangeError> {
    let percent = percent.ok_or_else(|| ExchangeError::Config(format!("{label} is not set")))?;
    if percent.is_sign_negative() {
        return Err(ExchangeError::Config(format!(
            "{label} cannot be negative: {percent}"
        )));
    }
    Ok((percent / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(FEE_FRACTION_SCALE, RoundingStrategy::MidpointNearestEven))
}
