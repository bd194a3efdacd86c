//! Mock auth helpers for tests.
//!
//! Services validate HS256 bearer tokens themselves. `MockAuth` signs tokens
//! with a shared test secret so requests can be authenticated without a real
//! identity provider.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use uuid::Uuid;

use pagewise_auth_types::token::{JwtClaims, issue_access_token};
use pagewise_domain::user::UserRole;

/// Secret shared by `MockAuth` and the service under test.
pub const TEST_JWT_SECRET: &str = "pagewise-test-secret";

/// Configurable identity minted into test bearer tokens.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
    pub tenant_id: Option<Uuid>,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: UserRole, tenant_id: Option<Uuid>) -> Self {
        Self {
            user_id,
            role,
            tenant_id,
        }
    }

    /// Platform admin with no tenant claim.
    pub fn platform_admin() -> Self {
        Self::new(Uuid::now_v7(), UserRole::PlatformAdmin, None)
    }

    /// Signed HS256 token valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            + 3600;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            role: self.role.as_str().to_owned(),
            tenant_id: self.tenant_id.map(|id| id.to_string()),
            exp,
        };
        issue_access_token(&claims, TEST_JWT_SECRET).expect("sign test token")
    }

    /// `Authorization: Bearer <token>` header value.
    pub fn bearer(&self) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", self.token())).expect("bearer header")
    }

    /// Headers carrying the bearer token.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, self.bearer());
        map
    }
}

/// `X-Tenant-ID` header name.
pub fn tenant_header_name() -> HeaderName {
    HeaderName::from_static("x-tenant-id")
}
