//! Version-gated protocol capabilities.
//!
//! Everything the client does differently depending on the platform
//! version is decided here, from one table. Supporting a new platform
//! release means adding a row to [`FEATURE_TABLE`], not hunting for
//! version comparisons across the code base.

use crate::ApiVersion;

/// A protocol capability that appeared in some platform release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Pre-issued API tokens can replace `user.login`.
    TokenAuth,
    /// `user.login` takes `username` instead of `user`.
    UsernameField,
    /// The credential travels in an `Authorization: Bearer` header
    /// instead of the `auth` body field.
    AuthHeader,
}

/// `(first feature version, capability)` rows.
pub const FEATURE_TABLE: &[(f64, Capability)] = &[
    (5.4, Capability::TokenAuth),
    (5.4, Capability::UsernameField),
    (6.4, Capability::AuthHeader),
];

/// Where an authenticated request carries its credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPlacement {
    /// `"auth": "<credential>"` in the JSON-RPC body.
    BodyField,
    /// `Authorization: Bearer <credential>` header.
    BearerHeader,
}

/// The capability set of one platform version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub token_auth: bool,
    pub username_field: bool,
    pub auth_header: bool,
}

impl Features {
    /// Looks up every capability available at `version`.
    pub fn for_version(version: &ApiVersion) -> Self {
        Self::for_major(version.major())
    }

    /// Same as [`for_version`](Self::for_version), keyed by feature
    /// version.
    pub fn for_major(major: f64) -> Self {
        let mut features = Self::default();
        for &(since, capability) in FEATURE_TABLE {
            if major >= since {
                features.enable(capability);
            }
        }
        features
    }

    /// Returns `true` if `capability` is available.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::TokenAuth => self.token_auth,
            Capability::UsernameField => self.username_field,
            Capability::AuthHeader => self.auth_header,
        }
    }

    /// Picks where the credential goes. HTTP Basic authentication occupies
    /// the `Authorization` header, which forces the body field.
    pub fn auth_placement(&self, basic_auth: bool) -> AuthPlacement {
        if self.auth_header && !basic_auth {
            AuthPlacement::BearerHeader
        } else {
            AuthPlacement::BodyField
        }
    }

    /// The `user.login` parameter name carrying the user name.
    pub fn login_user_field(&self) -> &'static str {
        if self.username_field {
            "username"
        } else {
            "user"
        }
    }

    fn enable(&mut self, capability: Capability) {
        match capability {
            Capability::TokenAuth => self.token_auth = true,
            Capability::UsernameField => self.username_field = true,
            Capability::AuthHeader => self.auth_header = true,
        }
    }
}
