//! Request signing for authenticated exchange calls.
//!
//! ## Security Model
//!
//! - The shared secret participates in the signature input but is stripped
//!   from the parameter set before the payload is assembled; it is never
//!   transmitted and never logged, at any verbosity.
//! - Signed payloads carry the access key, so they are not logged either.
//!
//! ## Huobi scheme
//!
//! The reference scheme (other exchanges substitute their own digest):
//!
//! 1. Merge caller params with `method`, `access_key`, `created` (unix
//!    seconds) and `secret_key`.
//! 2. Canonicalize: sort parameter names lexicographically and join as
//!    `name=value` pairs with `&`.
//! 3. MD5 the canonical string and render as lowercase hex.
//! 4. Transmit `method`, `access_key`, `created`, `sign`, the optional
//!    unsigned `market` param, then the caller params, URL-form-encoded.

use md5::{Digest, Md5};
use std::collections::BTreeMap;

/// Sorts parameters lexicographically by name and joins them as
/// `name=value` pairs with `&`. The exchange verifies the signature against
/// exactly this encoding.
pub fn canonical_query(params: &BTreeMap<&str, &str>) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// MD5 digest of `input`, rendered as lowercase hexadecimal.
pub fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the signed `application/x-www-form-urlencoded` body for an
/// authenticated call.
///
/// `market` rides along unsigned, per the exchange's contract; `params` are
/// signed and appended in the order given. Same inputs and the same
/// `created` timestamp always produce the same body.
pub fn build_signed_payload(
    access_key: &str,
    secret_key: &str,
    method: &str,
    market: Option<&str>,
    params: &[(&str, String)],
    created: i64,
) -> String {
    let created = created.to_string();

    let mut to_sign: BTreeMap<&str, &str> = params
        .iter()
        .map(|(name, value)| (*name, value.as_str()))
        .collect();
    to_sign.insert("method", method);
    to_sign.insert("access_key", access_key);
    to_sign.insert("created", &created);
    to_sign.insert("secret_key", secret_key);

    let signature = md5_hex(&canonical_query(&to_sign));

    // Secret stays out of the transmitted payload.
    let mut payload = format!(
        "method={}&access_key={}&created={}&sign={}",
        urlencoding::encode(method),
        urlencoding::encode(access_key),
        urlencoding::encode(&created),
        urlencoding::encode(&signature),
    );
    if let Some(market) = market {
        payload.push_str("&market=");
        payload.push_str(market);
    }
    for (name, value) in params {
        payload.push('&');
        payload.push_str(name);
        payload.push('=');
        payload.push_str(&urlencoding::encode(value));
    }
    payload
}
