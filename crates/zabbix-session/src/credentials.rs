//! The credential inputs a caller can supply.

use std::fmt;

use zabbix_protocol::{Masker, HIDING_MASK};

/// Everything the caller may hand over for authentication.
///
/// Empty strings count as "not supplied", so values read from unset
/// environment variables or blank config fields do not masquerade as
/// credentials.
///
/// Precedence when several are present: token > session id >
/// user/password (see [`LoginPlan`](crate::LoginPlan)).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Pre-issued API token.
    pub token: Option<String>,
    /// Session id from an earlier `user.login`.
    pub session_id: Option<String>,
    /// Login name for `user.login`.
    pub user: Option<String>,
    /// Password for `user.login`.
    pub password: Option<String>,
}

impl Credentials {
    /// Credentials holding only an API token.
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Credentials holding only a user name and password.
    pub fn user_password(
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user: Some(user.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Credentials holding only an existing session id.
    pub fn session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::default()
        }
    }

    /// Adds a token to these credentials, builder style.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Drops every empty value.
    pub fn normalized(self) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            token: present(self.token),
            session_id: present(self.session_id),
            user: present(self.user),
            password: present(self.password),
        }
    }

    /// Returns `true` if nothing usable was supplied.
    pub fn is_empty(&self) -> bool {
        self.clone().normalized() == Self::default()
    }
}

/// Hand-written so secrets never end up in debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masker = Masker::default();
        let hide = |v: &Option<String>| {
            v.as_deref().map(|s| masker.mask(s, masker.config().show_len))
        };

        f.debug_struct("Credentials")
            .field("token", &hide(&self.token))
            .field("session_id", &hide(&self.session_id))
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| HIDING_MASK))
            .finish()
    }
}
