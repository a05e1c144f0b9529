//! Unified adapter error types.

use thiserror::Error;

/// Top-level error for every trading operation.
///
/// Splits failures the way an engine needs to see them: [`Timeout`] is safe
/// to retry, everything else is not. Adapters never retry internally.
///
/// [`Timeout`]: ExchangeError::Timeout
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Transient network-layer failure. The exchange (or the route to it)
    /// hiccuped: socket timeout, connection reset/refused, TLS EOF, or an
    /// HTTP 502/503/504. The caller may retry the call as-is.
    #[error("exchange timeout: {0}")]
    Timeout(String),

    /// Non-transient failure: the exchange rejected the call, returned an
    /// unrecognized response shape, or an unexpected IO fault occurred.
    /// `code` carries the exchange's own error code when one was returned.
    #[error("trading API failure: {message}")]
    Api { code: Option<i64>, message: String },

    /// Construction-time contract fault: missing credential, zero timeout,
    /// malformed base URL. Raised before any network call; a configuration
    /// bug, not a runtime trading condition.
    #[error("invalid adapter config: {0}")]
    Config(String),

    /// The caller passed a market id outside the adapter's supported set.
    /// Raised before any network call.
    #[error("unsupported market id '{market_id}': supported markets are {supported}")]
    UnsupportedMarket {
        market_id: String,
        supported: &'static str,
    },
}

impl ExchangeError {
    /// Whether the caller may retry the failed call unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// The exchange-reported error code, when one was surfaced.
    pub fn exchange_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }

    pub(crate) fn api(message: impl Into<String>) -> Self {
        Self::Api {
            code: None,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        Self::api(format!("failed to parse exchange response: {e}"))
    }
}
