//! Credential selection: which credential to use, and how.
//!
//! The choice depends on what was supplied and on whether the platform
//! version accepts tokens. All outcomes live in one `match` so each row
//! can be tested on its own:
//!
//! | token | tokens supported | session id | user + password | outcome        |
//! |-------|------------------|------------|-----------------|----------------|
//! | yes   | yes              | any        | any             | `UseToken`     |
//! | any   | any              | yes        | any             | `UseSessionId` |
//! | any   | any              | no         | yes             | `Login`        |
//! | any   | any              | no         | no              | error          |

use zabbix_protocol::Features;

use crate::{Credentials, SessionError};

/// What the client has to do to become authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPlan {
    /// Stamp requests with this token; no network call.
    UseToken(String),
    /// Stamp requests with this existing session id; no network call.
    UseSessionId(String),
    /// Call `user.login` and stamp requests with the returned session id.
    Login { user: String, password: String },
}

impl LoginPlan {
    /// Picks the plan for `credentials` on a platform with `features`.
    ///
    /// # Errors
    /// [`SessionError::InsufficientCredentials`] when no row of the table
    /// applies, e.g. a lone token on a version without token support.
    pub fn select(
        credentials: Credentials,
        features: &Features,
    ) -> Result<Self, SessionError> {
        let Credentials {
            token,
            session_id,
            user,
            password,
        } = credentials.normalized();
        let insufficient = |reason: &str| -> Result<Self, SessionError> {
            Err(SessionError::InsufficientCredentials(reason.into()))
        };

        match (token, features.token_auth, session_id, user, password) {
            (Some(token), true, _, _, _) => Ok(Self::UseToken(token)),
            (_, _, Some(session_id), _, _) => Ok(Self::UseSessionId(session_id)),
            (_, _, None, Some(user), Some(password)) => {
                Ok(Self::Login { user, password })
            }
            (Some(_), false, None, None, None) => insufficient(
                "token authentication is not supported by this API version \
                 and no user/password was given",
            ),
            (_, _, None, Some(_), None) => insufficient("user password is missing"),
            (_, _, None, None, Some(_)) => insufficient("username is missing"),
            (None, _, None, None, None) => {
                insufficient("no token, session id or user/password was given")
            }
        }
    }
}
