//! Caller identity extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use http::{HeaderMap, StatusCode, header};
use uuid::Uuid;

use pagewise_domain::user::UserRole;

use crate::token::{AuthError, TokenInfo};

/// Authenticated caller.
///
/// Built from the [`TokenInfo`] that the tenant-resolving middleware stores in
/// request extensions after validating the bearer token. Returns 401 when the
/// request carried no valid token. Role enforcement (403) is done by handlers
/// after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Identity {
    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.role.is_any_of(roles)
    }
}

impl From<&TokenInfo> for Identity {
    fn from(info: &TokenInfo) -> Self {
        Self {
            user_id: info.user_id,
            role: info.role,
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`. Read the
    // extension synchronously and return a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts.extensions.get::<TokenInfo>().map(Identity::from);
        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}

/// Bearer token from the `Authorization` header.
///
/// `Ok(None)` when the header is absent. A present header that is not a
/// well-formed `Bearer <token>` value is an error.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| AuthError::Malformed)?;
    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(Some(token.trim()))
        }
        _ => Err(AuthError::Malformed),
    }
}
