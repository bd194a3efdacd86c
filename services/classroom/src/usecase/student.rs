use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::domain::repository::{ClassRepository, StudentRepository, UserRepository};
use crate::domain::types::{StudentProfile, User, normalize_email, validate_email};
use crate::error::ClassroomError;

// ── ListStudents ─────────────────────────────────────────────────────────────

pub struct ListStudentsUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> ListStudentsUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<StudentProfile>, ClassroomError> {
        self.repo.list(scope, class_id).await
    }
}

// ── GetStudent ───────────────────────────────────────────────────────────────

pub struct GetStudentUseCase<R: StudentRepository> {
    pub repo: R,
}

impl<R: StudentRepository> GetStudentUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<StudentProfile, ClassroomError> {
        self.repo
            .find_by_id(scope, id)
            .await?
            .ok_or(ClassroomError::StudentNotFound)
    }
}

// ── CreateStudent ────────────────────────────────────────────────────────────

pub struct CreateStudentInput {
    pub email: String,
    pub display_name: String,
    pub class_id: Option<Uuid>,
    pub parent_user_id: Option<Uuid>,
}

pub struct CreateStudentUseCase<S: StudentRepository, C: ClassRepository, U: UserRepository> {
    pub students: S,
    pub classes: C,
    pub users: U,
}

impl<S: StudentRepository, C: ClassRepository, U: UserRepository> CreateStudentUseCase<S, C, U> {
    /// Create a Student user and its profile in the scope tenant.
    pub async fn execute(
        &self,
        scope: TenantScope,
        input: CreateStudentInput,
    ) -> Result<StudentProfile, ClassroomError> {
        let tenant_id = scope.require()?;
        let email = normalize_email(&input.email);
        if !validate_email(&email) {
            return Err(ClassroomError::InvalidEmail);
        }
        let display_name = input.display_name.trim();
        if display_name.is_empty() {
            return Err(ClassroomError::MissingData);
        }
        if let Some(class_id) = input.class_id {
            self.classes
                .find_by_id(scope, class_id)
                .await?
                .ok_or(ClassroomError::ClassNotFound)?;
        }
        if let Some(parent_id) = input.parent_user_id {
            self.users
                .find_by_id(scope, parent_id)
                .await?
                .ok_or(ClassroomError::UserNotFound)?;
        }
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
            role: UserRole::Student,
            profile: None,
            created_at: now,
            updated_at: now,
        };
        let profile = StudentProfile {
            id: Uuid::now_v7(),
            tenant_id,
            user_id: user.id,
            display_name: display_name.to_owned(),
            class_id: input.class_id,
            parent_user_id: input.parent_user_id,
            total_books_read: 0,
            total_reading_time_seconds: 0,
            created_at: now,
        };
        self.students.create_with_user(scope, &user, &profile).await?;
        Ok(profile)
    }
}

// ── UpdateStudent ────────────────────────────────────────────────────────────

pub struct UpdateStudentInput {
    pub display_name: String,
    pub class_id: Option<Uuid>,
}

pub struct UpdateStudentUseCase<S: StudentRepository, C: ClassRepository> {
    pub students: S,
    pub classes: C,
}

impl<S: StudentRepository, C: ClassRepository> UpdateStudentUseCase<S, C> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        id: Uuid,
        input: UpdateStudentInput,
    ) -> Result<StudentProfile, ClassroomError> {
        let display_name = input.display_name.trim();
        if display_name.is_empty() {
            return Err(ClassroomError::MissingData);
        }
        if let Some(class_id) = input.class_id {
            self.classes
                .find_by_id(scope, class_id)
                .await?
                .ok_or(ClassroomError::ClassNotFound)?;
        }
        if !self
            .students
            .update(scope, id, display_name, input.class_id)
            .await?
        {
            return Err(ClassroomError::StudentNotFound);
        }
        self.students
            .find_by_id(scope, id)
            .await?
            .ok_or(ClassroomError::StudentNotFound)
    }
}
