use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::user::UserRole;

use crate::domain::repository::SchoolRepository;
use crate::domain::types::{
    School, User, normalize_email, subdomain_slug, validate_email, validate_subdomain,
};
use crate::error::ClassroomError;

// ── ListSchools ──────────────────────────────────────────────────────────────

pub struct ListSchoolsUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> ListSchoolsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<School>, ClassroomError> {
        self.repo.list().await
    }
}

// ── CreateSchool ─────────────────────────────────────────────────────────────

pub struct CreateSchoolInput {
    pub name: String,
    /// Derived from `name` when absent.
    pub subdomain: Option<String>,
    pub admin_email: String,
}

pub struct CreateSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> CreateSchoolUseCase<R> {
    /// Create a school together with its first SchoolAdmin.
    pub async fn execute(&self, input: CreateSchoolInput) -> Result<School, ClassroomError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ClassroomError::MissingData);
        }
        let subdomain = match input.subdomain.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => subdomain_slug(name),
        };
        if !validate_subdomain(&subdomain) {
            return Err(ClassroomError::InvalidSubdomain);
        }
        let admin_email = normalize_email(&input.admin_email);
        if !validate_email(&admin_email) {
            return Err(ClassroomError::InvalidEmail);
        }
        if self.repo.subdomain_taken(&subdomain).await? {
            return Err(ClassroomError::SchoolAlreadyExists);
        }

        let now = Utc::now();
        let school = School {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            subdomain,
            created_at: now,
        };
        let admin = User {
            id: Uuid::now_v7(),
            tenant_id: Some(school.id),
            email: admin_email,
            role: UserRole::SchoolAdmin,
            profile: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create_with_admin(&school, &admin).await?;
        tracing::info!(school_id = %school.id, subdomain = %school.subdomain, "school created");
        Ok(school)
    }
}

// ── DeleteSchool ─────────────────────────────────────────────────────────────

pub struct DeleteSchoolUseCase<R: SchoolRepository> {
    pub repo: R,
}

impl<R: SchoolRepository> DeleteSchoolUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ClassroomError> {
        if !self.repo.delete(id).await? {
            return Err(ClassroomError::SchoolNotFound);
        }
        tracing::info!(school_id = %id, "school deleted");
        Ok(())
    }
}
