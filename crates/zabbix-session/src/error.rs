//! Error types for the session layer.

/// Errors raised while choosing or applying credentials.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No usable combination of credentials was supplied for this
    /// platform version.
    #[error("insufficient credentials: {0}")]
    InsufficientCredentials(String),

    /// The operation requires an active credential and there is none.
    #[error("not logged in")]
    NotLoggedIn,
}
