//! Sending one JSON-RPC call: encode, stamp, deliver, validate.

use base64::Engine;
use rand::Rng;
use serde_json::Value;
use zabbix_protocol::{
    truncate, AuthPlacement, Codec, JsonCodec, Masker, RpcRequest,
    RpcResponse,
};
use zabbix_transport::{Request, Transport};

use crate::{ApiError, RpcFailure};

/// Methods callable without a credential.
pub const UNAUTH_METHODS: &[&str] =
    &["apiinfo.version", "user.login", "user.checkAuthentication"];

/// Methods whose `result` can be a whole configuration file; their
/// responses are logged shortened.
pub const FILES_METHODS: &[&str] = &[
    "configuration.export",
    "configuration.import",
    "configuration.importcompare",
];

/// Longest `result` logged for [`FILES_METHODS`].
const FILES_RESULT_LOG_LEN: usize = 200;

/// Turns method calls into transport requests and responses into results.
///
/// The dispatcher does not know about sessions; the caller passes the
/// credential to stamp (and where) with every call.
pub(crate) struct Dispatcher<T: Transport> {
    transport: T,
    codec: JsonCodec,
    masker: Masker,
    basic_auth: Option<String>,
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(transport: T, masker: Masker) -> Self {
        Self {
            transport,
            codec: JsonCodec,
            masker,
            basic_auth: None,
        }
    }

    /// Adds HTTP Basic credentials to every request.
    pub(crate) fn with_basic_auth(mut self, user: &str, password: &str) -> Self {
        tracing::debug!(
            user,
            password = zabbix_protocol::HIDING_MASK,
            "enabling HTTP Basic authentication"
        );
        let encoded = base64::engine::general_purpose::STANDARD
            .encode(format!("{user}:{password}"));
        self.basic_auth = Some(encoded);
        self
    }

    pub(crate) fn has_basic_auth(&self) -> bool {
        self.basic_auth.is_some()
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Sends `method` and returns the response's `result`.
    ///
    /// `credential` is stamped as-is; deciding whether a call needs one is
    /// the caller's job.
    pub(crate) async fn send(
        &self,
        method: &str,
        params: Value,
        credential: Option<(AuthPlacement, &str)>,
    ) -> Result<Value, ApiError> {
        let mut request = RpcRequest::new(method, params, generate_request_id());

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "application/json-rpc".to_string()),
            (
                "User-Agent".to_string(),
                concat!("zabbix-api/", env!("CARGO_PKG_VERSION")).to_string(),
            ),
        ];

        match credential {
            Some((AuthPlacement::BodyField, value)) => {
                request.auth = Some(value.to_string());
            }
            Some((AuthPlacement::BearerHeader, value)) => {
                headers.push(("Authorization".into(), format!("Bearer {value}")));
            }
            None => {}
        }

        if let Some(basic) = &self.basic_auth {
            headers.push(("Authorization".into(), format!("Basic {basic}")));
        }

        let body = self.codec.encode(&request)?;
        let body_text = String::from_utf8_lossy(&body).into_owned();
        tracing::debug!(
            endpoint = self.endpoint(),
            body = %self.masker.redact(&body_text),
            "sending request"
        );

        let raw = self.transport.post(Request { headers, body }).await?;
        let response: RpcResponse = self.codec.decode(&raw)?;
        self.log_response(method, &response, &raw);

        response.into_result().map_err(|error| {
            ApiError::Rpc(Box::new(RpcFailure {
                method: method.to_string(),
                code: error.code,
                message: error.message,
                data: error.data,
                masked_body: self.masker.redact(&body_text),
                body: body_text,
            }))
        })
    }

    fn log_response(&self, method: &str, response: &RpcResponse, raw: &[u8]) {
        if !tracing::enabled!(tracing::Level::DEBUG) {
            return;
        }

        if FILES_METHODS.contains(&method) {
            let mut short = response.clone();
            if let Some(Value::String(result)) = &mut short.result {
                *result = truncate(result, FILES_RESULT_LOG_LEN, true);
            }
            let text = serde_json::to_string(&short).unwrap_or_default();
            tracing::debug!(
                method,
                body = %self.masker.redact(&text),
                "received response (short)"
            );
        } else {
            let text = String::from_utf8_lossy(raw);
            tracing::debug!(
                method,
                body = %self.masker.redact(&text),
                "received response"
            );
        }
    }
}

/// A random 32-character hex id, unique per request.
fn generate_request_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
