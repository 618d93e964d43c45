//! Wire protocol for the Zabbix API client.
//!
//! This crate defines what travels between the client and the API
//! endpoint, and the rules used to interpret it:
//!
//! - **Types** ([`RpcRequest`], [`RpcResponse`], [`RpcErrorObject`]) —
//!   JSON-RPC 2.0 envelopes.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how envelopes are
//!   converted to/from bytes.
//! - **Versions** ([`ApiVersion`], [`Features`]) — parsing the platform
//!   version and deciding which protocol capabilities it offers.
//! - **Masking** ([`Masker`], [`MaskConfig`]) — hiding secrets before
//!   they reach logs or error messages.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (bytes) → Protocol (RpcRequest/RpcResponse) → Session (credentials)
//! ```

mod codec;
mod error;
mod features;
mod mask;
#[cfg(feature = "json")]
mod types;
mod version;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use features::{AuthPlacement, Capability, Features, FEATURE_TABLE};
#[cfg(feature = "json")]
pub use mask::Masker;
pub use mask::{truncate, MaskConfig, HIDING_MASK};
#[cfg(feature = "json")]
pub use types::{RpcErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use version::{ApiVersion, MAX_SUPPORTED, MIN_SUPPORTED};
