use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::domain::repository::{SchoolRepository, UserRepository};
use crate::domain::types::{User, normalize_email, validate_email};
use crate::error::ClassroomError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub role: UserRole,
    pub tenant_id: Option<Uuid>,
}

pub struct RegisterUseCase<U: UserRepository, S: SchoolRepository> {
    pub users: U,
    pub schools: S,
}

impl<U: UserRepository, S: SchoolRepository> RegisterUseCase<U, S> {
    /// Create a user in the request tenant, or in the body tenant when the
    /// request carries none.
    pub async fn execute(
        &self,
        scope: TenantScope,
        input: RegisterInput,
    ) -> Result<User, ClassroomError> {
        if input.role == UserRole::PlatformAdmin {
            return Err(ClassroomError::Forbidden);
        }
        let tenant_id = scope
            .stamp(input.tenant_id)?
            .ok_or(ClassroomError::TenantRequired)?;
        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(ClassroomError::InvalidEmail);
        }
        self.schools
            .find_by_id(tenant_id)
            .await?
            .ok_or(ClassroomError::SchoolNotFound)?;
        if self
            .users
            .find_by_tenant_email(Some(tenant_id), &email)
            .await?
            .is_some()
        {
            return Err(ClassroomError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            tenant_id: Some(tenant_id),
            email,
            role: input.role,
            profile: None,
            created_at: now,
            updated_at: now,
        };
        let user = self.users.create(scope, &user).await?;
        tracing::info!(user_id = %user.id, %tenant_id, role = %user.role, "user registered");
        Ok(user)
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, scope: TenantScope, user_id: Uuid) -> Result<User, ClassroomError> {
        self.repo
            .find_by_id(scope, user_id)
            .await?
            .ok_or(ClassroomError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        profile: Option<serde_json::Value>,
    ) -> Result<User, ClassroomError> {
        if !self.repo.update_profile(scope, user_id, profile).await? {
            return Err(ClassroomError::UserNotFound);
        }
        self.repo
            .find_by_id(scope, user_id)
            .await?
            .ok_or(ClassroomError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Vec<User>, ClassroomError> {
        self.repo.list(scope, role, page).await
    }
}

// ── SeedPlatformAdmin ────────────────────────────────────────────────────────

pub struct SeedPlatformAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SeedPlatformAdminUseCase<R> {
    /// Create the platform admin unless one with this email exists.
    /// Returns `true` if a user was created.
    pub async fn execute(&self, email: &str) -> Result<bool, ClassroomError> {
        let email = normalize_email(email);
        if !validate_email(&email) {
            return Err(ClassroomError::InvalidEmail);
        }
        if self.repo.find_by_tenant_email(None, &email).await?.is_some() {
            return Ok(false);
        }
        let now = Utc::now();
        let admin = User {
            id: Uuid::now_v7(),
            tenant_id: None,
            email,
            role: UserRole::PlatformAdmin,
            profile: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(TenantScope::Unscoped, &admin).await?;
        Ok(true)
    }
}
