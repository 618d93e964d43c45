//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use crate::{normalize_url, Request, Transport, TransportError};

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API endpoint; normalized with [`normalize_url`] on construction.
    pub url: String,

    /// Whole-request timeout (connect + send + receive).
    ///
    /// Default: 30 seconds.
    pub timeout: Duration,

    /// Whether TLS certificates are verified.
    ///
    /// Default: `true`. Turning this off is only sensible for lab
    /// installations with self-signed certificates.
    pub validate_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost/zabbix/api_jsonrpc.php".to_string(),
            timeout: Duration::from_secs(30),
            validate_certs: true,
        }
    }
}

/// A [`Transport`] that POSTs requests over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from `config`.
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.validate_certs)
            .build()
            .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;

        let url = normalize_url(&config.url);
        tracing::debug!(%url, timeout = ?config.timeout, "HTTP transport ready");

        Ok(Self { client, url })
    }

    fn classify(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.url.clone())
        } else {
            TransportError::Connect {
                endpoint: self.url.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn post(&self, request: Request) -> Result<Vec<u8>, TransportError> {
        let mut builder = self.client.post(&self.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                endpoint: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.url.clone())
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        Ok(body.to_vec())
    }
}
