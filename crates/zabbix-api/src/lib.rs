//! # zabbix-api
//!
//! Async client for the Zabbix JSON-RPC management API.
//!
//! The client ties together the lower layers: transport → protocol →
//! session. On construction it checks the platform version against the
//! supported range, picks a credential for that version, and then
//! proxies arbitrary API calls with the credential stamped on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zabbix_api::prelude::*;
//!
//! # async fn run() -> Result<(), ApiError> {
//! let api = ZabbixApiBuilder::from_env()
//!     .url("https://zabbix.example.com")
//!     .token("8jF7sGh2Rp4TlQ1ZmXo0uYv3Bc6AiD9E")
//!     .build()
//!     .await?;
//!
//! let users = api
//!     .object("user")
//!     .call("get", serde_json::json!({"output": ["userid", "username"]}))
//!     .await?;
//! println!("{users}");
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod dispatcher;
mod error;
mod gate;
mod object;

pub use client::{HttpZabbixApi, ZabbixApi};
pub use config::{ApiConfig, ZabbixApiBuilder};
pub use dispatcher::{FILES_METHODS, UNAUTH_METHODS};
pub use error::{ApiError, RpcFailure};
pub use gate::VersionGate;
pub use object::ApiObject;

pub use zabbix_protocol::{
    ApiVersion, AuthPlacement, Capability, Features, MaskConfig, Masker,
    ProtocolError, MAX_SUPPORTED, MIN_SUPPORTED,
};
pub use zabbix_session::{AuthState, CredentialKind, Credentials, SessionError};
pub use zabbix_transport::{
    HttpConfig, HttpTransport, Request, Transport, TransportError,
};

/// Everything needed for typical use, in one import.
pub mod prelude {
    pub use crate::{
        ApiConfig, ApiError, ApiVersion, AuthState, Credentials,
        HttpZabbixApi, Transport, ZabbixApi, ZabbixApiBuilder,
    };
}
