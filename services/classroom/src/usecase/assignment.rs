use chrono::{DateTime, Utc};
use uuid::Uuid;

use pagewise_domain::tenant::TenantScope;

use crate::domain::repository::{
    AssignmentRepository, BookRepository, ClassRepository, UserRepository,
};
use crate::domain::types::BookAssignment;
use crate::error::ClassroomError;

// ── ListAssignments ──────────────────────────────────────────────────────────

pub struct ListAssignmentsUseCase<R: AssignmentRepository> {
    pub repo: R,
}

impl<R: AssignmentRepository> ListAssignmentsUseCase<R> {
    pub async fn execute(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<BookAssignment>, ClassroomError> {
        self.repo.list(scope, class_id).await
    }
}

// ── CreateAssignment ─────────────────────────────────────────────────────────

pub struct CreateAssignmentInput {
    pub book_id: Uuid,
    pub class_id: Option<Uuid>,
    pub student_user_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

pub struct CreateAssignmentUseCase<
    A: AssignmentRepository,
    B: BookRepository,
    C: ClassRepository,
    U: UserRepository,
> {
    pub assignments: A,
    pub books: B,
    pub classes: C,
    pub users: U,
}

impl<A: AssignmentRepository, B: BookRepository, C: ClassRepository, U: UserRepository>
    CreateAssignmentUseCase<A, B, C, U>
{
    /// Assign a catalog book to a class, a single student, or both.
    pub async fn execute(
        &self,
        scope: TenantScope,
        assigned_by: Uuid,
        input: CreateAssignmentInput,
    ) -> Result<BookAssignment, ClassroomError> {
        let tenant_id = scope.require()?;
        if input.class_id.is_none() && input.student_user_id.is_none() {
            return Err(ClassroomError::MissingData);
        }
        self.books
            .find_by_id(input.book_id)
            .await?
            .ok_or(ClassroomError::BookNotFound)?;
        if let Some(class_id) = input.class_id {
            self.classes
                .find_by_id(scope, class_id)
                .await?
                .ok_or(ClassroomError::ClassNotFound)?;
        }
        if let Some(student_id) = input.student_user_id {
            self.users
                .find_by_id(scope, student_id)
                .await?
                .ok_or(ClassroomError::UserNotFound)?;
        }

        let assignment = BookAssignment {
            id: Uuid::now_v7(),
            tenant_id,
            book_id: input.book_id,
            class_id: input.class_id,
            student_user_id: input.student_user_id,
            assigned_by_user_id: assigned_by,
            due_date: input.due_date,
            created_at: Utc::now(),
        };
        self.assignments.create(scope, &assignment).await?;
        Ok(assignment)
    }
}

// ── DeleteAssignment ─────────────────────────────────────────────────────────

pub struct DeleteAssignmentUseCase<R: AssignmentRepository> {
    pub repo: R,
}

impl<R: AssignmentRepository> DeleteAssignmentUseCase<R> {
    pub async fn execute(&self, scope: TenantScope, id: Uuid) -> Result<(), ClassroomError> {
        if !self.repo.delete(scope, id).await? {
            return Err(ClassroomError::AssignmentNotFound);
        }
        Ok(())
    }
}
