#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::domain::types::{
    Book, BookAssignment, BookPage, Class, ClassChanges, ClassWithCount, ProgressEvent,
    ProgressSortBy, ProgressSummary, ProgressView, ReadingProgress, School, StudentProfile, User,
};
use crate::error::ClassroomError;

// Every method on a tenant-owned entity takes the request's `TenantScope`.
// Reads filter by it, inserts stamp it, updates and deletes match on id AND it.

/// Repository for schools (tenants). Platform-level, not tenant-filtered.
pub trait SchoolRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<School>, ClassroomError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, ClassroomError>;
    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, ClassroomError>;
    /// Insert the school and its first SchoolAdmin in one transaction.
    async fn create_with_admin(&self, school: &School, admin: &User)
    -> Result<(), ClassroomError>;
    /// Delete a school and, through cascading keys, everything it owns.
    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError>;
}

/// Repository for users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<User>, ClassroomError>;

    /// Exact lookup on the `(tenant_id, email)` key; `None` matches platform users.
    async fn find_by_tenant_email(
        &self,
        tenant_id: Option<Uuid>,
        email: &str,
    ) -> Result<Option<User>, ClassroomError>;

    async fn list(
        &self,
        scope: TenantScope,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Vec<User>, ClassroomError>;

    /// Insert a user, returning it with the stamped tenant.
    async fn create(&self, scope: TenantScope, user: &User) -> Result<User, ClassroomError>;

    /// Replace the profile document. Returns `true` if a row was updated.
    async fn update_profile(
        &self,
        scope: TenantScope,
        id: Uuid,
        profile: Option<serde_json::Value>,
    ) -> Result<bool, ClassroomError>;
}

/// Repository for classes.
pub trait ClassRepository: Send + Sync {
    async fn list(&self, scope: TenantScope) -> Result<Vec<ClassWithCount>, ClassroomError>;
    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<ClassWithCount>, ClassroomError>;
    async fn create(&self, scope: TenantScope, class: &Class) -> Result<(), ClassroomError>;
    /// Returns `true` if a row was updated.
    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        changes: &ClassChanges,
    ) -> Result<bool, ClassroomError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError>;
}

/// Repository for student profiles.
pub trait StudentRepository: Send + Sync {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<StudentProfile>, ClassroomError>;
    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<StudentProfile>, ClassroomError>;
    /// Insert the Student user and its profile in one transaction.
    async fn create_with_user(
        &self,
        scope: TenantScope,
        user: &User,
        profile: &StudentProfile,
    ) -> Result<(), ClassroomError>;
    /// Returns `true` if a row was updated.
    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        display_name: &str,
        class_id: Option<Uuid>,
    ) -> Result<bool, ClassroomError>;
}

/// Repository for book assignments.
pub trait AssignmentRepository: Send + Sync {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<BookAssignment>, ClassroomError>;
    async fn create(
        &self,
        scope: TenantScope,
        assignment: &BookAssignment,
    ) -> Result<(), ClassroomError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError>;
}

/// Repository for the shared book catalog. Not tenant-filtered.
pub trait BookRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Vec<Book>, ClassroomError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ClassroomError>;
    /// Pages of a book ordered by page number.
    async fn list_pages(&self, book_id: Uuid) -> Result<Vec<BookPage>, ClassroomError>;
    async fn create(&self, book: &Book) -> Result<(), ClassroomError>;
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError>;
    /// Insert a page and recompute `page_count` in one transaction.
    async fn add_page(&self, page: &BookPage) -> Result<(), ClassroomError>;
    /// Delete a page and recompute `page_count` in one transaction.
    /// Returns `true` if a row was deleted.
    async fn delete_page(&self, book_id: Uuid, page_id: Uuid) -> Result<bool, ClassroomError>;
}

/// Repository for reading progress.
pub trait ProgressRepository: Send + Sync {
    async fn find(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ProgressView>, ClassroomError>;

    async fn list_for_user(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        sort_by: ProgressSortBy,
        page: PageRequest,
    ) -> Result<Vec<ProgressView>, ClassroomError>;

    /// Merge `event` into the (user, book) record, creating it on the first
    /// event, and rewrite the user's profile counters from the stored rows.
    /// Runs as one transaction.
    async fn reconcile(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        event: &ProgressEvent,
        now: DateTime<Utc>,
    ) -> Result<ReadingProgress, ClassroomError>;

    /// Totals and most recent rows over the scoped progress, optionally for one user.
    async fn summarize(
        &self,
        scope: TenantScope,
        user_id: Option<Uuid>,
    ) -> Result<ProgressSummary, ClassroomError>;
}
