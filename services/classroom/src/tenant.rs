//! Per-request tenant resolution.
//!
//! The resolved [`TenantScope`] is stored in the request's extensions and read
//! by handlers with `Extension<TenantScope>`. Nothing here is process-wide.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use pagewise_auth_types::identity::bearer_token;
use pagewise_auth_types::token::validate_access_token;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::error::ClassroomError;
use crate::state::AppState;

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Settings the resolver middleware needs from application state.
#[derive(Clone)]
pub struct TenantResolution {
    pub jwt_secret: Arc<str>,
    /// Reject malformed tenant ids with 400 instead of treating them as absent.
    pub strict: bool,
}

impl FromRef<AppState> for TenantResolution {
    fn from_ref(state: &AppState) -> Self {
        state.tenancy.clone()
    }
}

/// Pick the tenant for a request.
///
/// A non-empty `tenant_id` token claim wins and the header is not consulted.
/// Otherwise the `X-Tenant-ID` header is used. Nothing usable means
/// `Unscoped`. A malformed value is an error in strict mode and is ignored
/// (logged) otherwise.
pub fn resolve(
    claim: Option<&str>,
    header: Option<&str>,
    strict: bool,
) -> Result<TenantScope, ClassroomError> {
    fn non_empty(v: &str) -> Option<&str> {
        let v = v.trim();
        (!v.is_empty()).then_some(v)
    }
    let Some(raw) = claim.and_then(non_empty).or_else(|| header.and_then(non_empty)) else {
        return Ok(TenantScope::Unscoped);
    };
    match raw.parse::<Uuid>() {
        Ok(id) => Ok(TenantScope::Tenant(id)),
        Err(_) if strict => Err(ClassroomError::InvalidTenant),
        Err(_) => {
            tracing::warn!(value = raw, "ignoring malformed tenant id");
            Ok(TenantScope::Unscoped)
        }
    }
}

fn tenant_header(headers: &HeaderMap) -> Option<String> {
    headers.get(TENANT_HEADER).map(|v| {
        // Non-visible-ASCII values cannot be a uuid; keep them so they count as malformed.
        v.to_str().map(str::to_owned).unwrap_or_else(|_| "<binary>".to_owned())
    })
}

/// Middleware: validate any bearer token, resolve the tenant, and store both
/// in request extensions.
///
/// An invalid bearer token stops the request with 401 before resolution.
/// Requests without a token continue unauthenticated (registration, health).
pub async fn resolve_tenant(
    State(resolution): State<TenantResolution>,
    mut request: Request,
    next: Next,
) -> Result<Response, ClassroomError> {
    let token_info = match bearer_token(request.headers()) {
        Ok(Some(token)) => match validate_access_token(token, &resolution.jwt_secret) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting bearer token");
                return Err(ClassroomError::Unauthorized);
            }
        },
        Ok(None) => None,
        Err(_) => return Err(ClassroomError::Unauthorized),
    };

    // Once authenticated, only platform admins may pick a school by header.
    let header = match &token_info {
        Some(info) if info.role != UserRole::PlatformAdmin => None,
        _ => tenant_header(request.headers()),
    };
    let claim = token_info.as_ref().and_then(|i| i.tenant_claim.as_deref());
    let scope = resolve(claim, header.as_deref(), resolution.strict)?;

    request.extensions_mut().insert(scope);
    if let Some(info) = token_info {
        request.extensions_mut().insert(info);
    }
    Ok(next.run(request).await)
}
