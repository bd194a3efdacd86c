//! Tenant scope carried through every data-access call.
//!
//! A tenant is a school. The scope is resolved once per request and handed to
//! repositories explicitly; it is never stored in process-wide state.

use uuid::Uuid;

use crate::user::UserRole;

/// The tenant a request is allowed to see and write.
///
/// `Unscoped` means "no tenant filter" and is reserved for platform admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TenantScope {
    Tenant(Uuid),
    #[default]
    Unscoped,
}

/// Reasons a tenant scope refuses an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TenantScopeError {
    #[error("tenant context is required")]
    Required,
    #[error("tenant does not match the request tenant")]
    Mismatch,
}

impl TenantScope {
    pub fn from_option(tenant_id: Option<Uuid>) -> Self {
        match tenant_id {
            Some(id) => Self::Tenant(id),
            None => Self::Unscoped,
        }
    }

    pub fn tenant_id(self) -> Option<Uuid> {
        match self {
            Self::Tenant(id) => Some(id),
            Self::Unscoped => None,
        }
    }

    pub fn is_unscoped(self) -> bool {
        matches!(self, Self::Unscoped)
    }

    /// Read predicate: `row.tenant_id == scope OR scope IS UNSET`.
    pub fn permits(self, row_tenant: Option<Uuid>) -> bool {
        match self {
            Self::Tenant(id) => row_tenant == Some(id),
            Self::Unscoped => true,
        }
    }

    /// Tenant id to persist on insert.
    ///
    /// A missing id is filled from the scope. A supplied id that disagrees with a
    /// set scope is rejected rather than trusted.
    pub fn stamp(self, supplied: Option<Uuid>) -> Result<Option<Uuid>, TenantScopeError> {
        match (self, supplied) {
            (Self::Tenant(id), None) => Ok(Some(id)),
            (Self::Tenant(id), Some(given)) if given == id => Ok(Some(id)),
            (Self::Tenant(_), Some(_)) => Err(TenantScopeError::Mismatch),
            (Self::Unscoped, given) => Ok(given),
        }
    }

    /// Tenant id to persist on insert of a row whose tenant is always set.
    ///
    /// Same contract as [`stamp`](Self::stamp) for a supplied id.
    pub fn admit(self, supplied: Uuid) -> Result<Uuid, TenantScopeError> {
        match self {
            Self::Tenant(id) if id != supplied => Err(TenantScopeError::Mismatch),
            _ => Ok(supplied),
        }
    }

    /// Concrete tenant id, for writes to rows whose tenant column is not nullable.
    pub fn require(self) -> Result<Uuid, TenantScopeError> {
        self.tenant_id().ok_or(TenantScopeError::Required)
    }

    /// Gate unscoped access: only platform admins may operate with no tenant set.
    pub fn authorize(self, role: UserRole) -> Result<Self, TenantScopeError> {
        match self {
            Self::Unscoped if role != UserRole::PlatformAdmin => Err(TenantScopeError::Required),
            scope => Ok(scope),
        }
    }
}
