//! Error types for the protocol layer.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: the response was not valid JSON or did
    /// not have the shape of a JSON-RPC response.
    #[cfg(feature = "json")]
    #[error("unable to parse json: {0}")]
    Decode(serde_json::Error),

    /// A version string did not have the `<major>.<minor>.<patch>[text]`
    /// shape.
    #[error(
        "unable to parse API version {0:?}: \
         the '<major>.<minor>.<patch>' format is expected"
    )]
    InvalidVersion(String),

    /// A version was compared with a value that is neither a number nor
    /// a version.
    #[error(
        "cannot compare a version with a value of type {found}, \
         only a number or a version is expected"
    )]
    Incomparable {
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// The message is well-formed JSON but violates protocol rules.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
