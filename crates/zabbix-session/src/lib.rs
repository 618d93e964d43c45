//! Authentication state for the Zabbix API client.
//!
//! This crate owns the client-side half of authentication:
//!
//! 1. **Credentials** — what the caller handed us ([`Credentials`])
//! 2. **Credential selection** — which of them to use on this platform
//!    version ([`LoginPlan`])
//! 3. **Session state** — what is currently stamped on outgoing
//!    requests ([`AuthSession`])
//!
//! It never talks to the network; the client crate performs the calls a
//! plan asks for and reports the results back here.
//!
//! ```text
//! Client (above)  ← runs user.login / user.logout as a plan requires
//!     ↕
//! Session (this crate)  ← decides and remembers the active credential
//!     ↕
//! Protocol (below)  ← provides Features, Masker
//! ```

mod credentials;
mod error;
mod plan;
mod session;

pub use credentials::Credentials;
pub use error::SessionError;
pub use plan::LoginPlan;
pub use session::{AuthSession, AuthState, CredentialKind};
