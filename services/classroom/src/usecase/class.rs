use chrono::Utc;
use uuid::Uuid;

use pagewise_domain::tenant::TenantScope;

use crate::domain::repository::{ClassRepository, UserRepository};
use crate::domain::types::{Class, ClassChanges, ClassWithCount};
use crate::error::ClassroomError;

// ── ListClasses ──────────────────────────────────────────────────────────────

pub struct ListClassesUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> ListClassesUseCase<R> {
    pub async fn execute(&self, scope: TenantScope) -> Result<Vec<ClassWithCount>, ClassroomError> {
        self.repo.list(scope).await
    }
}

// ── GetClass ─────────────────────────────────────────────────────────────────

pub struct GetClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> GetClassUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<ClassWithCount, ClassroomError> {
        self.repo
            .find_by_id(scope, id)
            .await?
            .ok_or(ClassroomError::ClassNotFound)
    }
}

// ── CreateClass ──────────────────────────────────────────────────────────────

pub struct CreateClassInput {
    pub name: String,
    pub grade_level: i32,
    pub teacher_id: Uuid,
}

pub struct CreateClassUseCase<C: ClassRepository, U: UserRepository> {
    pub classes: C,
    pub users: U,
}

impl<C: ClassRepository, U: UserRepository> CreateClassUseCase<C, U> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        input: CreateClassInput,
    ) -> Result<ClassWithCount, ClassroomError> {
        let tenant_id = scope.require()?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ClassroomError::MissingData);
        }
        self.users
            .find_by_id(scope, input.teacher_id)
            .await?
            .ok_or(ClassroomError::UserNotFound)?;

        let class = Class {
            id: Uuid::now_v7(),
            tenant_id,
            name: name.to_owned(),
            grade_level: input.grade_level,
            teacher_id: input.teacher_id,
            created_at: Utc::now(),
        };
        self.classes.create(scope, &class).await?;
        Ok(ClassWithCount {
            class,
            student_count: 0,
        })
    }
}

// ── UpdateClass ──────────────────────────────────────────────────────────────

pub struct UpdateClassUseCase<C: ClassRepository, U: UserRepository> {
    pub classes: C,
    pub users: U,
}

impl<C: ClassRepository, U: UserRepository> UpdateClassUseCase<C, U> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        id: Uuid,
        mut changes: ClassChanges,
    ) -> Result<ClassWithCount, ClassroomError> {
        if let Some(name) = changes.name.as_deref() {
            let name = name.trim();
            if name.is_empty() {
                return Err(ClassroomError::MissingData);
            }
            changes.name = Some(name.to_owned());
        }
        if let Some(teacher_id) = changes.teacher_id {
            self.users
                .find_by_id(scope, teacher_id)
                .await?
                .ok_or(ClassroomError::UserNotFound)?;
        }
        if !self.classes.update(scope, id, &changes).await? {
            return Err(ClassroomError::ClassNotFound);
        }
        self.classes
            .find_by_id(scope, id)
            .await?
            .ok_or(ClassroomError::ClassNotFound)
    }
}

// ── DeleteClass ──────────────────────────────────────────────────────────────

pub struct DeleteClassUseCase<R: ClassRepository> {
    pub repo: R,
}

impl<R: ClassRepository> DeleteClassUseCase<R> {
    pub async fn execute(&self, scope: TenantScope, id: Uuid) -> Result<(), ClassroomError> {
        if !self.repo.delete(scope, id).await? {
            return Err(ClassroomError::ClassNotFound);
        }
        Ok(())
    }
}
