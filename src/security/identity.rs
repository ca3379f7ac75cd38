//! Request identity resolution.

use axum::http::{header, HeaderMap};

use crate::config::schema::AuthConfig;

/// Header carrying an identity established by an authenticating gateway.
pub const X_FORWARDED_USER: &str = "x-forwarded-user";

/// An authenticated principal, one variant per identity source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    /// Established upstream and forwarded by a trusted gateway.
    Forwarded(String),

    /// Matched a bearer token configured on this service.
    ApiKey(String),
}

impl Identity {
    /// The principal's name.
    pub fn name(&self) -> &str {
        match self {
            Identity::Forwarded(name) | Identity::ApiKey(name) => name,
        }
    }
}

/// Resolves the request identity from headers, once per request.
pub struct IdentityResolver {
    config: AuthConfig,
}

impl IdentityResolver {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Resolve an identity, preferring the upstream-established one.
    pub fn resolve(&self, headers: &HeaderMap) -> Option<Identity> {
        if self.config.trust_forwarded_user {
            if let Some(user) = headers
                .get(X_FORWARDED_USER)
                .and_then(|value| value.to_str().ok())
                .filter(|user| !user.is_empty())
            {
                return Some(Identity::Forwarded(user.to_string()));
            }
        }

        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))?;

        self.config
            .principals
            .iter()
            .find(|principal| principal.token == token)
            .map(|principal| Identity::ApiKey(principal.name.clone()))
    }
}
