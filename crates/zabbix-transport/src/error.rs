/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be delivered (DNS, connect, TLS, I/O).
    #[error("unable to connect to {endpoint}: {reason}")]
    Connect {
        /// Where we tried to send the request.
        endpoint: String,
        /// Human-readable cause reported by the underlying client.
        reason: String,
    },

    /// No response arrived within the configured timeout.
    #[error("request to {0} timed out")]
    Timeout(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    Status {
        /// Where the request was sent.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The transport could not be constructed from its configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),
}
