//! JSON-RPC 2.0 envelopes exchanged with the API endpoint.
//!
//! ```text
//! request:  {"jsonrpc":"2.0","method":...,"params":...,"id":...[,"auth":...]}
//! success:  {"jsonrpc":"2.0","result":...,"id":...}
//! failure:  {"jsonrpc":"2.0","error":{"code":...,"message":...,"data":...},"id":...}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The protocol version string every envelope carries.
pub const JSONRPC_VERSION: &str = "2.0";

/// One API call.
///
/// Field order is the serialization order, so the encoded body always
/// reads `jsonrpc, method, params, id[, auth]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: String,

    /// Session id or token for versions that expect the credential in the
    /// body rather than in a header. Omitted from the wire when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl RpcRequest {
    /// Creates a request without credentials.
    ///
    /// A `null` `params` is replaced with an empty object; the API rejects
    /// `null` params for most methods.
    pub fn new(
        method: impl Into<String>,
        params: Value,
        id: impl Into<String>,
    ) -> Self {
        let params = if params.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            params
        };

        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: id.into(),
            auth: None,
        }
    }
}

/// A response envelope. Exactly one of `result` / `error` is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,

    #[serde(default)]
    pub id: Option<Value>,
}

impl RpcResponse {
    /// Splits the envelope into its result or its error.
    ///
    /// A response carrying neither yields `Value::Null`.
    pub fn into_result(self) -> Result<Value, RpcErrorObject> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// The `error` member of a failed call, as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.code, self.message)?;
        match &self.data {
            Some(Value::String(data)) => write!(f, " {data}"),
            Some(Value::Null) | None => Ok(()),
            Some(other) => write!(f, " {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_null_params_become_empty_object() {
        let request = RpcRequest::new("apiinfo.version", Value::Null, "1");

        assert_eq!(request.params, serde_json::json!({}));
        assert_eq!(request.jsonrpc, "2.0");
        assert!(request.auth.is_none());
    }

    #[test]
    fn test_auth_field_serialized_last_when_present() {
        let mut request =
            RpcRequest::new("host.get", serde_json::json!({}), "7");
        request.auth = Some("secret".into());

        let text = serde_json::to_string(&request).unwrap();

        assert_eq!(
            text,
            r#"{"jsonrpc":"2.0","method":"host.get","params":{},"id":"7","auth":"secret"}"#
        );
    }

    #[test]
    fn test_into_result_success() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","result":"7.0.0","id":"1"}"#,
        )
        .unwrap();

        assert_eq!(response.into_result(), Ok(Value::from("7.0.0")));
    }

    #[test]
    fn test_into_result_error_wins() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid params.","data":"Not authorised."},"id":"1"}"#,
        )
        .unwrap();

        let error = response.into_result().unwrap_err();
        assert_eq!(error.code, -32602);
        assert_eq!(error.to_string(), "(-32602) Invalid params. Not authorised.");
    }

    #[test]
    fn test_into_result_missing_result_is_null() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"1"}"#).unwrap();

        assert_eq!(response.into_result(), Ok(Value::Null));
    }

    #[test]
    fn test_error_display_without_data() {
        let error = RpcErrorObject {
            code: -32500,
            message: "Application error.".into(),
            data: None,
        };

        assert_eq!(error.to_string(), "(-32500) Application error.");
    }
}
