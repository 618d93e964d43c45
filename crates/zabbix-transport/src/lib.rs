//! Transport abstraction layer for the Zabbix API client.
//!
//! The JSON-RPC layer above only ever needs one thing from the network:
//! "POST this body to the API endpoint and give me the response body".
//! [`Transport`] captures exactly that, so the client can run over HTTP in
//! production and over an in-memory mock in tests.
//!
//! # Feature Flags
//!
//! - `http` (default) — HTTP(S) transport via `reqwest`

mod error;
#[cfg(feature = "http")]
mod http;
mod url;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};
pub use url::{normalize_url, JSONRPC_FILE};

use std::future::Future;

/// A single outgoing API request: extra headers plus the encoded body.
///
/// The transport owns the endpoint, so a request carries no URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Header name/value pairs, in insertion order.
    pub headers: Vec<(String, String)>,
    /// The serialized JSON-RPC body.
    pub body: Vec<u8>,
}

impl Request {
    /// Creates a request with the given body and no headers.
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            headers: Vec::new(),
            body,
        }
    }

    /// Appends a header, builder style.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Delivers API requests to the remote endpoint.
///
/// Implementations must not retry: a failed delivery is reported once and
/// the caller decides what to do with it. Timeouts surface as
/// [`TransportError::Timeout`].
pub trait Transport: Send + Sync + 'static {
    /// The endpoint requests are delivered to, used for diagnostics.
    fn endpoint(&self) -> &str;

    /// Sends `request` and returns the raw response body.
    fn post(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}
