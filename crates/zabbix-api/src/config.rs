//! Client configuration and the builder that applies it.

use std::fmt;
use std::time::Duration;

use zabbix_protocol::{MaskConfig, HIDING_MASK};
use zabbix_session::Credentials;
use zabbix_transport::{HttpConfig, HttpTransport, Transport};

use crate::{ApiError, ZabbixApi};

/// Endpoint used when neither the caller nor the environment names one.
pub const DEFAULT_URL: &str = "http://localhost/zabbix/api_jsonrpc.php";

/// Everything needed to construct a [`ZabbixApi`].
#[derive(Clone)]
pub struct ApiConfig {
    /// API endpoint; normalized by the HTTP transport.
    pub url: String,

    /// Token, session id and/or user/password.
    pub credentials: Credentials,

    /// HTTP Basic authentication user, for frontends behind a proxy.
    pub http_user: Option<String>,

    /// HTTP Basic authentication password.
    pub http_password: Option<String>,

    /// Accept any platform version and skip fetching it.
    ///
    /// Default: `false`.
    pub skip_version_check: bool,

    /// Version assumed for feature decisions when the check is skipped.
    ///
    /// Default: `None`, meaning the newest supported version.
    pub assumed_version: Option<String>,

    /// Verify TLS certificates.
    ///
    /// Default: `true`.
    pub validate_certs: bool,

    /// Per-request timeout.
    ///
    /// Default: 30 seconds.
    pub timeout: Duration,

    /// How secrets are masked in logs and error messages.
    pub mask: MaskConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            credentials: Credentials::default(),
            http_user: None,
            http_password: None,
            skip_version_check: false,
            assumed_version: None,
            validate_certs: true,
            timeout: Duration::from_secs(30),
            mask: MaskConfig::default(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("url", &self.url)
            .field("credentials", &self.credentials)
            .field("http_user", &self.http_user)
            .field("http_password", &self.http_password.as_ref().map(|_| HIDING_MASK))
            .field("skip_version_check", &self.skip_version_check)
            .field("assumed_version", &self.assumed_version)
            .field("validate_certs", &self.validate_certs)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    /// Defaults overlaid with `ZABBIX_URL`, `ZABBIX_USER`,
    /// `ZABBIX_PASSWORD` and `ZABBIX_TOKEN` from the process environment.
    pub fn from_env() -> Self {
        Self::default().overlay_env(|key| std::env::var(key).ok())
    }

    /// Overlays values found through `lookup`; empty values are ignored.
    pub fn overlay_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get("ZABBIX_URL") {
            self.url = url;
        }
        if let Some(user) = get("ZABBIX_USER") {
            self.credentials.user = Some(user);
        }
        if let Some(password) = get("ZABBIX_PASSWORD") {
            self.credentials.password = Some(password);
        }
        if let Some(token) = get("ZABBIX_TOKEN") {
            self.credentials.token = Some(token);
        }
        self
    }

    /// The transport settings derived from this configuration.
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            url: self.url.clone(),
            timeout: self.timeout,
            validate_certs: self.validate_certs,
        }
    }
}

/// Fluent construction of a [`ZabbixApi`].
///
/// Later setters win, so values set explicitly override those read by
/// [`from_env`](Self::from_env).
///
/// ```rust,no_run
/// # async fn run() -> Result<(), zabbix_api::ApiError> {
/// use zabbix_api::ZabbixApiBuilder;
///
/// let api = ZabbixApiBuilder::new()
///     .url("127.0.0.1")
///     .user_password("Admin", "zabbix")
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZabbixApiBuilder {
    config: ApiConfig,
}

impl ZabbixApiBuilder {
    /// Starts from [`ApiConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from [`ApiConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            config: ApiConfig::from_env(),
        }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.credentials.token = Some(token.into());
        self
    }

    pub fn user_password(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config.credentials.user = Some(user.into());
        self.config.credentials.password = Some(password.into());
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.config.credentials.session_id = Some(session_id.into());
        self
    }

    /// Enables HTTP Basic authentication.
    pub fn basic_auth(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.config.http_user = Some(user.into());
        self.config.http_password = Some(password.into());
        self
    }

    pub fn skip_version_check(mut self, skip: bool) -> Self {
        self.config.skip_version_check = skip;
        self
    }

    pub fn assumed_version(mut self, version: impl Into<String>) -> Self {
        self.config.assumed_version = Some(version.into());
        self
    }

    pub fn validate_certs(mut self, validate: bool) -> Self {
        self.config.validate_certs = validate;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn mask_config(mut self, mask: MaskConfig) -> Self {
        self.config.mask = mask;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Connects over HTTP.
    pub async fn build(self) -> Result<ZabbixApi<HttpTransport>, ApiError> {
        let transport = HttpTransport::new(self.config.http_config())?;
        ZabbixApi::connect(self.config, transport).await
    }

    /// Connects over the given transport.
    pub async fn build_with_transport<T: Transport>(
        self,
        transport: T,
    ) -> Result<ZabbixApi<T>, ApiError> {
        ZabbixApi::connect(self.config, transport).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ApiConfig::default();

        assert_eq!(config.url, DEFAULT_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate_certs);
        assert!(!config.skip_version_check);
        assert!(config.credentials.is_empty());
    }

    #[test]
    fn test_overlay_env_reads_all_variables() {
        let config = ApiConfig::default().overlay_env(env(&[
            ("ZABBIX_URL", "https://zbx.example.com"),
            ("ZABBIX_USER", "Admin"),
            ("ZABBIX_PASSWORD", "zabbix"),
            ("ZABBIX_TOKEN", "oTmtWu"),
        ]));

        assert_eq!(config.url, "https://zbx.example.com");
        assert_eq!(config.credentials.user.as_deref(), Some("Admin"));
        assert_eq!(config.credentials.password.as_deref(), Some("zabbix"));
        assert_eq!(config.credentials.token.as_deref(), Some("oTmtWu"));
    }

    #[test]
    fn test_overlay_env_ignores_empty_values() {
        let config = ApiConfig::default()
            .overlay_env(env(&[("ZABBIX_URL", ""), ("ZABBIX_TOKEN", "")]));

        assert_eq!(config.url, DEFAULT_URL);
        assert!(config.credentials.token.is_none());
    }

    #[test]
    fn test_builder_explicit_values_override_env() {
        let config = ApiConfig::default()
            .overlay_env(env(&[("ZABBIX_URL", "env-host"), ("ZABBIX_TOKEN", "env")]));

        let builder = ZabbixApiBuilder::from_config(config)
            .url("explicit-host")
            .token("explicit")
            .basic_auth("proxy", "secret")
            .skip_version_check(true)
            .timeout(Duration::from_secs(5));

        let config = builder.config();
        assert_eq!(config.url, "explicit-host");
        assert_eq!(config.credentials.token.as_deref(), Some("explicit"));
        assert_eq!(config.http_user.as_deref(), Some("proxy"));
        assert!(config.skip_version_check);
        assert_eq!(config.http_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_hides_http_password() {
        let config = ZabbixApiBuilder::new()
            .basic_auth("proxy", "proxy-secret")
            .user_password("Admin", "zabbix-secret")
            .config()
            .clone();

        let debug = format!("{config:?}");

        assert!(debug.contains("proxy"));
        assert!(!debug.contains("proxy-secret"));
        assert!(!debug.contains("zabbix-secret"));
    }
}
