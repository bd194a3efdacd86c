//! Tenant predicate for sea-orm queries.

use sea_orm::{ColumnTrait, QueryFilter};

use pagewise_domain::tenant::TenantScope;

/// Adds `tenant_id = <scope>` to a query when the scope is set.
///
/// Works for `Select`, `UpdateMany` and `DeleteMany` alike, so reads and
/// bulk writes share one predicate. `Unscoped` adds nothing.
pub trait ScopedToTenant: Sized {
    fn scoped_to<C: ColumnTrait>(self, column: C, scope: TenantScope) -> Self;
}

impl<Q: QueryFilter> ScopedToTenant for Q {
    fn scoped_to<C: ColumnTrait>(self, column: C, scope: TenantScope) -> Self {
        match scope {
            TenantScope::Tenant(id) => self.filter(column.eq(id)),
            TenantScope::Unscoped => self,
        }
    }
}
