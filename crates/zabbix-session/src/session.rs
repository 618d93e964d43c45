//! The credential currently stamped on outgoing requests.

/// Whether requests can be authenticated right now.
///
/// ```text
///   Unauthenticated ──(token / session id / login)──→ Authenticated
///          ↑                                               │
///          └──────────────────(logout)─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Which stored value is the active credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// A pre-issued API token; never invalidated by this client.
    Token,
    /// A session id from `user.login`; `logout` must end it server-side.
    SessionId,
}

/// The client's authentication state.
///
/// Both a token and a session id may be *stored* (a token supplied to a
/// version without token support is kept but inert), but at most one of
/// them is *active*, and only the active one is stamped on requests.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    session_id: Option<String>,
    token: Option<String>,
    active: Option<CredentialKind>,
}

impl AuthSession {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `token` the active credential.
    pub fn activate_token(&mut self, token: String) {
        self.token = Some(token);
        self.active = Some(CredentialKind::Token);
        tracing::debug!("token set as active credential");
    }

    /// Makes `session_id` the active credential.
    pub fn activate_session(&mut self, session_id: String) {
        self.session_id = Some(session_id);
        self.active = Some(CredentialKind::SessionId);
        tracing::debug!("session id set as active credential");
    }

    /// Stores a value without activating it.
    pub fn remember(&mut self, kind: CredentialKind, value: String) {
        match kind {
            CredentialKind::Token => self.token = Some(value),
            CredentialKind::SessionId => self.session_id = Some(value),
        }
    }

    /// The active credential, if any.
    pub fn current(&self) -> Option<(CredentialKind, &str)> {
        match self.active? {
            CredentialKind::Token => {
                self.token.as_deref().map(|t| (CredentialKind::Token, t))
            }
            CredentialKind::SessionId => self
                .session_id
                .as_deref()
                .map(|s| (CredentialKind::SessionId, s)),
        }
    }

    /// `Authenticated` iff there is an active credential.
    pub fn state(&self) -> AuthState {
        if self.current().is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// The stored session id, active or not.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The stored token, active or not.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Forgets every stored value and returns what was active.
    pub fn clear(&mut self) -> Option<CredentialKind> {
        let was = self.current().map(|(kind, _)| kind);
        self.session_id = None;
        self.token = None;
        self.active = None;
        was
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unauthenticated() {
        let session = AuthSession::new();

        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.current().is_none());
        assert!(session.session_id().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_activate_token_authenticates() {
        let mut session = AuthSession::new();

        session.activate_token("tok".into());

        assert_eq!(session.state(), AuthState::Authenticated);
        assert_eq!(session.current(), Some((CredentialKind::Token, "tok")));
        assert!(session.session_id().is_none());
    }

    #[test]
    fn test_remembered_token_stays_inert() {
        let mut session = AuthSession::new();
        session.remember(CredentialKind::Token, "tok".into());

        assert_eq!(session.state(), AuthState::Unauthenticated);

        session.activate_session("sid".into());

        assert_eq!(
            session.current(),
            Some((CredentialKind::SessionId, "sid"))
        );
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn test_clear_returns_active_kind_and_forgets_everything() {
        let mut session = AuthSession::new();
        session.remember(CredentialKind::Token, "tok".into());
        session.activate_session("sid".into());

        assert_eq!(session.clear(), Some(CredentialKind::SessionId));
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.session_id().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_clear_when_unauthenticated_returns_none() {
        let mut session = AuthSession::new();

        assert_eq!(session.clear(), None);
    }

    #[test]
    fn test_reactivation_replaces_active_credential() {
        let mut session = AuthSession::new();
        session.activate_session("old".into());

        session.activate_token("tok".into());

        assert_eq!(session.current(), Some((CredentialKind::Token, "tok")));
        // The old session id is still stored, just no longer active.
        assert_eq!(session.session_id(), Some("old"));
    }
}
