//! Unified error type for the API client.

use std::fmt;

use zabbix_protocol::ProtocolError;
use zabbix_session::SessionError;
use zabbix_transport::TransportError;

/// Top-level error that wraps all layer-specific errors.
///
/// The `#[from]` variants let `?` convert lower-layer errors
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered the call with a JSON-RPC `error` member.
    #[error("API request error: {0}")]
    Rpc(Box<RpcFailure>),

    /// The request never produced a response (connect, timeout, HTTP
    /// status).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Encoding, decoding or version handling failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The supplied credentials cannot be used.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The platform version is outside the supported range.
    #[error(
        "version of Zabbix API [{version}] is not supported by the library \
         (supported range {min:.1} to {max:.1}); set skip_version_check \
         to bypass this check"
    )]
    UnsupportedVersion {
        /// The version reported by the server.
        version: String,
        /// Oldest supported feature version.
        min: f64,
        /// Newest supported feature version.
        max: f64,
    },

    /// A response was valid JSON-RPC but not what the call promises,
    /// e.g. `user.login` returning something other than a session id.
    #[error("processing error: {0}")]
    Processing(String),
}

impl ApiError {
    /// Returns `true` for failures of the request itself: server-reported
    /// errors and transport failures.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Rpc(_) | Self::Transport(_))
    }

    /// The server-reported failure, if this is one.
    pub fn rpc(&self) -> Option<&RpcFailure> {
        match self {
            Self::Rpc(failure) => Some(failure.as_ref()),
            _ => None,
        }
    }
}

/// A JSON-RPC error returned by the server.
///
/// Keeps the raw request body for programmatic handling. `Display` only
/// ever shows the masked body.
#[derive(Debug, Clone)]
pub struct RpcFailure {
    /// The method that failed.
    pub method: String,
    /// JSON-RPC error code.
    pub code: i64,
    /// Short error message.
    pub message: String,
    /// Detailed description, when the server sent one.
    pub data: Option<serde_json::Value>,
    /// The request body exactly as sent, secrets included.
    pub body: String,
    /// The request body with secrets masked.
    pub masked_body: String,
}

impl fmt::Display for RpcFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.code, self.message)?;
        match &self.data {
            Some(serde_json::Value::String(data)) => write!(f, " {data}")?,
            Some(serde_json::Value::Null) | None => {}
            Some(other) => write!(f, " {other}")?,
        }
        write!(f, " [{}] body: {}", self.method, self.masked_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> RpcFailure {
        RpcFailure {
            method: "host.get".into(),
            code: -32602,
            message: "Invalid params.".into(),
            data: Some("Not authorised.".into()),
            body: r#"{"auth":"q2BTIw85kqmjtXl3zCgSSR26gwCGVFMK"}"#.into(),
            masked_body: r#"{"auth":"q2BT********VFMK"}"#.into(),
        }
    }

    #[test]
    fn test_rpc_display_uses_masked_body() {
        let err = ApiError::Rpc(Box::new(failure()));
        let text = err.to_string();

        assert!(text.contains("(-32602) Invalid params. Not authorised."));
        assert!(text.contains("q2BT********VFMK"));
        assert!(!text.contains("q2BTIw85kqmjtXl3zCgSSR26gwCGVFMK"));
    }

    #[test]
    fn test_is_request_error() {
        assert!(ApiError::Rpc(Box::new(failure())).is_request_error());
        assert!(
            ApiError::from(TransportError::Timeout("x".into()))
                .is_request_error()
        );
        assert!(!ApiError::Processing("x".into()).is_request_error());
    }

    #[test]
    fn test_from_session_error() {
        let err: ApiError = SessionError::NotLoggedIn.into();
        assert!(matches!(err, ApiError::Session(_)));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: ApiError = ProtocolError::InvalidVersion("7".into()).into();
        assert!(matches!(err, ApiError::Protocol(_)));
        assert!(err.to_string().contains("\"7\""));
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = ApiError::UnsupportedVersion {
            version: "7.2.0".into(),
            min: 5.0,
            max: 7.0,
        };

        assert_eq!(
            err.to_string(),
            "version of Zabbix API [7.2.0] is not supported by the library \
             (supported range 5.0 to 7.0); set skip_version_check to bypass \
             this check"
        );
    }
}
