//! The API client: version gate, credential lifecycle, call proxy.
//!
//! Construction runs, in order:
//!
//! 1. the version gate (`apiinfo.version`, unless skipped),
//! 2. feature lookup for the effective version,
//! 3. credential selection ([`LoginPlan`]) and, if needed, `user.login`.
//!
//! Any failure aborts construction; no half-authenticated client escapes.

use serde_json::{json, Value};
use zabbix_protocol::{
    ApiVersion, Features, Masker, ProtocolError, HIDING_MASK, MAX_SUPPORTED,
};
use zabbix_session::{
    AuthSession, AuthState, CredentialKind, Credentials, LoginPlan,
    SessionError,
};
use zabbix_transport::{HttpTransport, Transport};

use crate::dispatcher::{Dispatcher, UNAUTH_METHODS};
use crate::{ApiConfig, ApiError, ApiObject, VersionGate};

/// A client talking HTTP, the usual case.
pub type HttpZabbixApi = ZabbixApi<HttpTransport>;

/// An authenticated connection to the management API.
///
/// Methods that change the credential take `&mut self`, so one client
/// cannot be logged out while another task is using it. Independent
/// clients share nothing.
pub struct ZabbixApi<T: Transport> {
    dispatcher: Dispatcher<T>,
    session: AuthSession,
    version: ApiVersion,
    features: Features,
}

impl<T: Transport> ZabbixApi<T> {
    /// Runs the version gate and authenticates with `config.credentials`.
    ///
    /// # Errors
    /// - [`ApiError::UnsupportedVersion`] — version out of range
    /// - [`ApiError::Session`] — unusable credentials
    /// - [`ApiError::Rpc`] / [`ApiError::Transport`] — a call failed
    pub async fn connect(
        config: ApiConfig,
        transport: T,
    ) -> Result<Self, ApiError> {
        let credentials = config.credentials.clone();
        let mut api = Self::connect_unauthenticated(config, transport).await?;
        api.login(credentials).await?;
        Ok(api)
    }

    /// Runs the version gate only; call [`login`](Self::login) later.
    pub async fn connect_unauthenticated(
        config: ApiConfig,
        transport: T,
    ) -> Result<Self, ApiError> {
        let mut dispatcher = Dispatcher::new(
            transport,
            Masker::new(config.mask.clone()),
        );
        let basic = (
            config.http_user.as_deref().filter(|u| !u.is_empty()),
            config.http_password.as_deref().filter(|p| !p.is_empty()),
        );
        if let (Some(user), Some(password)) = basic {
            dispatcher = dispatcher.with_basic_auth(user, password);
        }

        let gate = VersionGate::new(config.skip_version_check);
        let version = if gate.skip {
            let assumed = config
                .assumed_version
                .clone()
                .unwrap_or_else(|| format!("{MAX_SUPPORTED:.1}.0"));
            tracing::debug!(%assumed, "version check skipped, assuming version");
            ApiVersion::parse(&assumed)?
        } else {
            fetch_version(&dispatcher).await?
        };
        gate.check(&version)?;

        let features = Features::for_version(&version);
        tracing::debug!(%version, ?features, endpoint = dispatcher.endpoint(), "API version resolved");

        Ok(Self {
            dispatcher,
            session: AuthSession::new(),
            version,
            features,
        })
    }

    // =====================================================================
    // Authentication
    // =====================================================================

    /// Authenticates with `credentials`, replacing any active credential.
    ///
    /// Precedence is token > session id > user/password, with tokens only
    /// considered on versions that support them. An active session is
    /// logged out first; an active token is simply dropped.
    pub async fn login(&mut self, credentials: Credentials) -> Result<(), ApiError> {
        let credentials = credentials.normalized();
        let plan = LoginPlan::select(credentials.clone(), &self.features)?;

        if self.session.state() == AuthState::Authenticated {
            self.logout().await?;
        }

        match plan {
            LoginPlan::UseToken(token) => {
                tracing::debug!("authenticating with API token");
                self.session.activate_token(token);
                if let Some(session_id) = credentials.session_id {
                    self.session.remember(CredentialKind::SessionId, session_id);
                }
            }
            LoginPlan::UseSessionId(session_id) => {
                tracing::debug!("authenticating with existing session id");
                self.session.activate_session(session_id);
                if let Some(token) = credentials.token {
                    self.session.remember(CredentialKind::Token, token);
                }
            }
            LoginPlan::Login { user, password } => {
                tracing::debug!(%user, password = HIDING_MASK, "logging in");
                let user_field = self.features.login_user_field();
                let params = json!({
                    user_field: user,
                    "password": password,
                });
                let result = self.dispatcher.send("user.login", params, None).await?;
                let Value::String(session_id) = result else {
                    return Err(ApiError::Processing(format!(
                        "user.login returned {} instead of a session id",
                        type_name(&result)
                    )));
                };
                self.session.activate_session(session_id);
                if let Some(token) = credentials.token {
                    self.session.remember(CredentialKind::Token, token);
                }
                tracing::debug!(
                    version = %self.version,
                    endpoint = self.dispatcher.endpoint(),
                    "connected to Zabbix API"
                );
            }
        }

        Ok(())
    }

    /// Ends the current authentication.
    ///
    /// A session is closed server-side with `user.logout`; a token is
    /// only forgotten. Both the session id and the token are cleared in
    /// every case, even if `user.logout` fails.
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let outcome = match self.session.current() {
            Some((CredentialKind::SessionId, _)) => {
                tracing::debug!("logging out");
                self.send_api_request("user.logout", Value::Null, true)
                    .await
                    .map(|_| ())
            }
            Some((CredentialKind::Token, _)) => Ok(()),
            None => {
                tracing::debug!("not logged in, nothing to log out");
                Ok(())
            }
        };

        self.session.clear();
        outcome
    }

    /// Asks the server whether the active credential is still valid.
    ///
    /// Returns `Ok(false)` without a network call when logged out, and
    /// `Ok(false)` when the server rejects the credential.
    pub async fn check_auth(&self) -> Result<bool, ApiError> {
        let Some((kind, credential)) = self.session.current() else {
            tracing::debug!("not logged in");
            return Ok(false);
        };

        let params = match kind {
            CredentialKind::Token => json!({ "token": credential }),
            CredentialKind::SessionId => json!({ "sessionid": credential }),
        };
        tracing::debug!(?kind, "checking authentication");

        match self
            .dispatcher
            .send("user.checkAuthentication", params, None)
            .await
        {
            Ok(result) => Ok(result.get("userid").is_some_and(is_truthy)),
            Err(ApiError::Rpc(failure)) => {
                tracing::debug!(code = failure.code, "credential rejected");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    // =====================================================================
    // Calls
    // =====================================================================

    /// Sends one call and returns its `result`.
    ///
    /// With `need_auth`, the active credential is stamped where this
    /// version expects it; without one the call fails locally.
    pub async fn send_api_request(
        &self,
        method: &str,
        params: Value,
        need_auth: bool,
    ) -> Result<Value, ApiError> {
        let credential = if need_auth {
            let (_, credential) =
                self.session.current().ok_or(SessionError::NotLoggedIn)?;
            let placement =
                self.features.auth_placement(self.dispatcher.has_basic_auth());
            Some((placement, credential))
        } else {
            None
        };

        self.dispatcher.send(method, params, credential).await
    }

    /// Calls `method`, authenticating unless it is one of
    /// [`UNAUTH_METHODS`].
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ApiError> {
        tracing::debug!(method, "executing API method");
        let need_auth = !UNAUTH_METHODS.contains(&method);
        self.send_api_request(method, params, need_auth).await
    }

    /// A proxy for the methods of one API object, e.g. `host`.
    pub fn object(&self, name: impl Into<String>) -> ApiObject<'_, T> {
        ApiObject::new(self, name.into())
    }

    /// Fetches the platform version now, bypassing the cached one.
    pub async fn fetch_version(&self) -> Result<ApiVersion, ApiError> {
        fetch_version(&self.dispatcher).await
    }

    /// Runs `f` with this client, then logs out.
    ///
    /// Logout always runs. If `f` failed its error is returned and a
    /// logout failure is only logged.
    pub async fn scoped<F, R>(mut self, f: F) -> Result<R, ApiError>
    where
        F: AsyncFnOnce(&mut Self) -> Result<R, ApiError>,
    {
        let outcome = f(&mut self).await;
        let logout = self.logout().await;

        match (outcome, logout) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(logout_err)) => {
                tracing::warn!(error = %logout_err, "logout after failed scope also failed");
                Err(e)
            }
        }
    }

    // =====================================================================
    // State
    // =====================================================================

    /// The effective platform version (fetched or assumed).
    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    /// The capabilities of [`version`](Self::version).
    pub fn features(&self) -> Features {
        self.features
    }

    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    /// The stored session id, if any.
    pub fn session_id(&self) -> Option<&str> {
        self.session.session_id()
    }

    /// The stored token, if any (possibly inert on old versions).
    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        self.dispatcher.endpoint()
    }
}

async fn fetch_version<T: Transport>(
    dispatcher: &Dispatcher<T>,
) -> Result<ApiVersion, ApiError> {
    let result = dispatcher.send("apiinfo.version", Value::Null, None).await?;
    match result {
        Value::String(raw) => Ok(ApiVersion::parse(&raw)?),
        other => Err(ProtocolError::InvalidMessage(format!(
            "apiinfo.version returned {} instead of a version string",
            type_name(&other)
        ))
        .into()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
