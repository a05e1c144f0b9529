//! HTTP transport for exchange calls.
//!
//! Two request shapes: an unauthenticated GET against the public base URL,
//! and a POST of a pre-signed form-encoded body against the authenticated
//! URL. Bodies are read fully into memory before being handed to the
//! response normalizer; no JSON parsing happens here.
//!
//! Failure classification follows the engine's retry contract: socket
//! timeouts, connection resets/refusals, TLS EOFs and HTTP 502/503/504 are
//! transient ([`ExchangeError::Timeout`]); everything else is fatal. These
//! resets are routine mid-session exchange-side behavior, not necessarily
//! network outages.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use std::error::Error as _;
use std::io::ErrorKind;
use std::time::Duration;

use crate::error::ExchangeError;

/// Some exchanges reject requests carrying a bare library user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.114 Safari/537.36";

/// Issues exchange requests. One implementation speaks real HTTP; tests
/// substitute a recording mock to drive adapters without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `{public_base_url}{path}`; returns the raw response body.
    async fn public_get(&self, path: &str) -> Result<String, ExchangeError>;

    /// POST a signed `application/x-www-form-urlencoded` body to the
    /// authenticated URL; returns the raw response body.
    async fn authenticated_post(&self, body: String) -> Result<String, ExchangeError>;
}

/// Real HTTP transport over a shared `reqwest` client.
///
/// The client is built once with the configured connect/read timeout and
/// releases its connection on every exit path, success or failure.
#[derive(Debug)]
pub struct HttpTransport {
    public_base: Url,
    auth_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Builds the transport eagerly; a malformed URL or an unbuildable
    /// client fails fast at construction.
    pub fn new(public_base: &str, auth_url: &str, timeout_secs: u64) -> Result<Self, ExchangeError> {
        let public_base = Url::parse(public_base)
            .map_err(|e| ExchangeError::Config(format!("malformed public base URL '{public_base}': {e}")))?;
        let auth_url = Url::parse(auth_url)
            .map_err(|e| ExchangeError::Config(format!("malformed authenticated URL '{auth_url}': {e}")))?;

        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExchangeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            public_base,
            auth_url,
            client,
        })
    }

    async fn read_body(response: Response) -> Result<String, ExchangeError> {
        let status = response.status();
        // Body read failures get the same transient/fatal classification as
        // connect failures; mid-body resets are common on flaky exchanges.
        let body = response.text().await.map_err(classify_request_error)?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(classify_status(status, &body))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn public_get(&self, path: &str) -> Result<String, ExchangeError> {
        let url = self
            .public_base
            .join(path)
            .map_err(|e| ExchangeError::api(format!("malformed API path '{path}': {e}")))?;
        tracing::debug!(%url, "public exchange call");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(classify_request_error)?;
        Self::read_body(response).await
    }

    async fn authenticated_post(&self, body: String) -> Result<String, ExchangeError> {
        // The body carries access_key and sign; it is never logged.
        tracing::debug!(url = %self.auth_url, "authenticated exchange call");

        let response = self
            .client
            .post(self.auth_url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(classify_request_error)?;
        Self::read_body(response).await
    }
}

/// Maps a request-level failure onto the transient/fatal split.
fn classify_request_error(e: reqwest::Error) -> ExchangeError {
    if e.is_timeout() {
        return ExchangeError::Timeout(format!("socket timeout talking to exchange: {e}"));
    }
    if e.is_connect() {
        return ExchangeError::Timeout(format!("failed to connect to exchange: {e}"));
    }
    if let Some(kind) = source_io_kind(&e) {
        if is_transient_io_kind(kind) {
            return ExchangeError::Timeout(format!("exchange connection dropped mid-call: {e}"));
        }
    }
    ExchangeError::api(format!("unexpected IO failure talking to exchange: {e}"))
}

/// Non-success HTTP statuses: 502/503/504 recover by the next request on
/// most exchanges, so they count as timeouts.
fn classify_status(status: StatusCode, body: &str) -> ExchangeError {
    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ExchangeError::Timeout(format!("exchange returned HTTP {status}"))
        }
        _ => ExchangeError::api(format!("unexpected HTTP status {status}: {body}")),
    }
}

/// Digs the originating `std::io::Error` kind out of a reqwest error chain.
fn source_io_kind(e: &reqwest::Error) -> Option<ErrorKind> {
    let mut source = e.source();
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = inner.source();
    }
    None
}

fn is_transient_io_kind(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionRefused
            | ErrorKind::UnexpectedEof
            | ErrorKind::TimedOut
    )
}
