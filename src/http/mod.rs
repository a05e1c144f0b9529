//! Transport layer — blocking-style HTTP requests with transient/fatal
//! failure classification. No retrying here: classification exists so the
//! engine can decide whether to retry.

pub mod transport;

pub use transport::{HttpTransport, Transport};
