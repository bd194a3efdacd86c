use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, SimpleExpr},
};
use uuid::Uuid;

use pagewise_classroom_schema::{
    book_assignments, books, classes, reading_progress, schools, student_profiles, users,
};
use pagewise_core::tenant_filter::ScopedToTenant;
use pagewise_domain::pagination::{PageRequest, Sort};
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::domain::repository::{
    AssignmentRepository, ClassRepository, ProgressRepository, SchoolRepository,
    StudentRepository, UserRepository,
};
use crate::domain::types::{
    BookAssignment, Class, ClassChanges, ClassWithCount, ProgressEvent, ProgressSortBy,
    ProgressSummary, ProgressTotals, ProgressView, RECENT_ACTIVITY_LIMIT, ReadingProgress, School,
    StudentProfile, User,
};
use crate::error::ClassroomError;
use crate::infra::{is_unique_violation, is_unique_violation_in_txn};

// ── School repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSchoolRepository {
    pub db: DatabaseConnection,
}

impl SchoolRepository for DbSchoolRepository {
    async fn list(&self) -> Result<Vec<School>, ClassroomError> {
        let models = schools::Entity::find()
            .order_by_asc(schools::Column::Name)
            .all(&self.db)
            .await
            .context("list schools")?;
        Ok(models.into_iter().map(school_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, ClassroomError> {
        let model = schools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find school by id")?;
        Ok(model.map(school_from_model))
    }

    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, ClassroomError> {
        let count = schools::Entity::find()
            .filter(schools::Column::Subdomain.eq(subdomain))
            .count(&self.db)
            .await
            .context("count schools by subdomain")?;
        Ok(count > 0)
    }

    async fn create_with_admin(
        &self,
        school: &School,
        admin: &User,
    ) -> Result<(), ClassroomError> {
        let school = school.clone();
        let admin = admin.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    schools::ActiveModel {
                        id: Set(school.id),
                        name: Set(school.name),
                        subdomain: Set(school.subdomain),
                        created_at: Set(school.created_at),
                    }
                    .insert(txn)
                    .await?;
                    user_active_model(&admin, Some(school.id))
                        .insert(txn)
                        .await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                if is_unique_violation_in_txn(&e) {
                    ClassroomError::SchoolAlreadyExists
                } else {
                    anyhow::Error::new(e).context("create school").into()
                }
            })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError> {
        let result = schools::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete school")?;
        Ok(result.rows_affected > 0)
    }
}

fn school_from_model(model: schools::Model) -> School {
    School {
        id: model.id,
        name: model.name,
        subdomain: model.subdomain,
        created_at: model.created_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<User>, ClassroomError> {
        let model = users::Entity::find_by_id(id)
            .scoped_to(users::Column::TenantId, scope)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_tenant_email(
        &self,
        tenant_id: Option<Uuid>,
        email: &str,
    ) -> Result<Option<User>, ClassroomError> {
        let tenant_filter = match tenant_id {
            Some(id) => users::Column::TenantId.eq(id),
            None => users::Column::TenantId.is_null(),
        };
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(tenant_filter)
            .one(&self.db)
            .await
            .context("find user by tenant and email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(
        &self,
        scope: TenantScope,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Vec<User>, ClassroomError> {
        let mut query = users::Entity::find().scoped_to(users::Column::TenantId, scope);
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role.as_str()));
        }
        let models = query
            .order_by_desc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, scope: TenantScope, user: &User) -> Result<User, ClassroomError> {
        let tenant_id = scope.stamp(user.tenant_id)?;
        user_active_model(user, tenant_id)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ClassroomError::UserAlreadyExists
                } else {
                    anyhow::Error::new(e).context("create user").into()
                }
            })?;
        Ok(User {
            tenant_id,
            ..user.clone()
        })
    }

    async fn update_profile(
        &self,
        scope: TenantScope,
        id: Uuid,
        profile: Option<serde_json::Value>,
    ) -> Result<bool, ClassroomError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Profile, Expr::value(profile))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .scoped_to(users::Column::TenantId, scope)
            .exec(&self.db)
            .await
            .context("update user profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_active_model(user: &User, tenant_id: Option<Uuid>) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        tenant_id: Set(tenant_id),
        email: Set(user.email.clone()),
        role: Set(user.role.as_str().to_owned()),
        profile: Set(user.profile.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, ClassroomError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("user {} has unknown role", model.id))?;
    Ok(User {
        id: model.id,
        tenant_id: model.tenant_id,
        email: model.email,
        role,
        profile: model.profile,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Class repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClassRepository {
    pub db: DatabaseConnection,
}

impl ClassRepository for DbClassRepository {
    async fn list(&self, scope: TenantScope) -> Result<Vec<ClassWithCount>, ClassroomError> {
        let models = classes::Entity::find()
            .scoped_to(classes::Column::TenantId, scope)
            .order_by_asc(classes::Column::Name)
            .all(&self.db)
            .await
            .context("list classes")?;

        let counts: Vec<(Uuid, i64)> = student_profiles::Entity::find()
            .select_only()
            .column(student_profiles::Column::ClassId)
            .column_as(student_profiles::Column::Id.count(), "student_count")
            .filter(student_profiles::Column::ClassId.is_not_null())
            .scoped_to(student_profiles::Column::TenantId, scope)
            .group_by(student_profiles::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .context("count students per class")?;

        Ok(models
            .into_iter()
            .map(|model| {
                let student_count = counts
                    .iter()
                    .find(|(class_id, _)| *class_id == model.id)
                    .map_or(0, |(_, n)| u64::try_from(*n).unwrap_or(0));
                ClassWithCount {
                    class: class_from_model(model),
                    student_count,
                }
            })
            .collect())
    }

    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<ClassWithCount>, ClassroomError> {
        let Some(model) = classes::Entity::find_by_id(id)
            .scoped_to(classes::Column::TenantId, scope)
            .one(&self.db)
            .await
            .context("find class by id")?
        else {
            return Ok(None);
        };
        let student_count = student_profiles::Entity::find()
            .filter(student_profiles::Column::ClassId.eq(id))
            .scoped_to(student_profiles::Column::TenantId, scope)
            .count(&self.db)
            .await
            .context("count students in class")?;
        Ok(Some(ClassWithCount {
            class: class_from_model(model),
            student_count,
        }))
    }

    async fn create(&self, scope: TenantScope, class: &Class) -> Result<(), ClassroomError> {
        let tenant_id = scope.admit(class.tenant_id)?;
        classes::ActiveModel {
            id: Set(class.id),
            tenant_id: Set(tenant_id),
            name: Set(class.name.clone()),
            grade_level: Set(class.grade_level),
            teacher_id: Set(class.teacher_id),
            created_at: Set(class.created_at),
        }
        .insert(&self.db)
        .await
        .context("create class")?;
        Ok(())
    }

    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        changes: &ClassChanges,
    ) -> Result<bool, ClassroomError> {
        let mut columns: Vec<(classes::Column, SimpleExpr)> = Vec::new();
        if let Some(name) = &changes.name {
            columns.push((classes::Column::Name, Expr::value(name.clone())));
        }
        if let Some(grade_level) = changes.grade_level {
            columns.push((classes::Column::GradeLevel, Expr::value(grade_level)));
        }
        if let Some(teacher_id) = changes.teacher_id {
            columns.push((classes::Column::TeacherId, Expr::value(teacher_id)));
        }

        if columns.is_empty() {
            let count = classes::Entity::find_by_id(id)
                .scoped_to(classes::Column::TenantId, scope)
                .count(&self.db)
                .await
                .context("check class exists")?;
            return Ok(count > 0);
        }

        let mut update = classes::Entity::update_many();
        for (column, value) in columns {
            update = update.col_expr(column, value);
        }
        let result = update
            .filter(classes::Column::Id.eq(id))
            .scoped_to(classes::Column::TenantId, scope)
            .exec(&self.db)
            .await
            .context("update class")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError> {
        let result = classes::Entity::delete_many()
            .filter(classes::Column::Id.eq(id))
            .scoped_to(classes::Column::TenantId, scope)
            .exec(&self.db)
            .await
            .context("delete class")?;
        Ok(result.rows_affected > 0)
    }
}

fn class_from_model(model: classes::Model) -> Class {
    Class {
        id: model.id,
        tenant_id: model.tenant_id,
        name: model.name,
        grade_level: model.grade_level,
        teacher_id: model.teacher_id,
        created_at: model.created_at,
    }
}

// ── Student repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStudentRepository {
    pub db: DatabaseConnection,
}

impl StudentRepository for DbStudentRepository {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<StudentProfile>, ClassroomError> {
        let mut query = student_profiles::Entity::find()
            .scoped_to(student_profiles::Column::TenantId, scope);
        if let Some(class_id) = class_id {
            query = query.filter(student_profiles::Column::ClassId.eq(class_id));
        }
        let models = query
            .order_by_asc(student_profiles::Column::DisplayName)
            .all(&self.db)
            .await
            .context("list student profiles")?;
        Ok(models.into_iter().map(student_from_model).collect())
    }

    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<StudentProfile>, ClassroomError> {
        let model = student_profiles::Entity::find_by_id(id)
            .scoped_to(student_profiles::Column::TenantId, scope)
            .one(&self.db)
            .await
            .context("find student profile by id")?;
        Ok(model.map(student_from_model))
    }

    async fn create_with_user(
        &self,
        scope: TenantScope,
        user: &User,
        profile: &StudentProfile,
    ) -> Result<(), ClassroomError> {
        let user_tenant = scope.stamp(user.tenant_id)?;
        let profile_tenant = scope.admit(profile.tenant_id)?;
        if user_tenant != Some(profile_tenant) {
            return Err(ClassroomError::TenantMismatch);
        }

        let user = user_active_model(user, user_tenant);
        let profile = student_profiles::ActiveModel {
            id: Set(profile.id),
            tenant_id: Set(profile_tenant),
            user_id: Set(profile.user_id),
            display_name: Set(profile.display_name.clone()),
            class_id: Set(profile.class_id),
            parent_user_id: Set(profile.parent_user_id),
            total_books_read: Set(0),
            total_reading_time_seconds: Set(0),
            created_at: Set(profile.created_at),
        };
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    user.insert(txn).await?;
                    profile.insert(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| {
                if is_unique_violation_in_txn(&e) {
                    ClassroomError::UserAlreadyExists
                } else {
                    anyhow::Error::new(e).context("create student").into()
                }
            })
    }

    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        display_name: &str,
        class_id: Option<Uuid>,
    ) -> Result<bool, ClassroomError> {
        let result = student_profiles::Entity::update_many()
            .col_expr(
                student_profiles::Column::DisplayName,
                Expr::value(display_name.to_owned()),
            )
            .col_expr(student_profiles::Column::ClassId, Expr::value(class_id))
            .filter(student_profiles::Column::Id.eq(id))
            .scoped_to(student_profiles::Column::TenantId, scope)
            .exec(&self.db)
            .await
            .context("update student profile")?;
        Ok(result.rows_affected > 0)
    }
}

fn student_from_model(model: student_profiles::Model) -> StudentProfile {
    StudentProfile {
        id: model.id,
        tenant_id: model.tenant_id,
        user_id: model.user_id,
        display_name: model.display_name,
        class_id: model.class_id,
        parent_user_id: model.parent_user_id,
        total_books_read: model.total_books_read,
        total_reading_time_seconds: model.total_reading_time_seconds,
        created_at: model.created_at,
    }
}

// ── Assignment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAssignmentRepository {
    pub db: DatabaseConnection,
}

impl AssignmentRepository for DbAssignmentRepository {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<BookAssignment>, ClassroomError> {
        let mut query = book_assignments::Entity::find()
            .scoped_to(book_assignments::Column::TenantId, scope);
        if let Some(class_id) = class_id {
            query = query.filter(book_assignments::Column::ClassId.eq(class_id));
        }
        let models = query
            .order_by_desc(book_assignments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list book assignments")?;
        Ok(models.into_iter().map(assignment_from_model).collect())
    }

    async fn create(
        &self,
        scope: TenantScope,
        assignment: &BookAssignment,
    ) -> Result<(), ClassroomError> {
        let tenant_id = scope.admit(assignment.tenant_id)?;
        book_assignments::ActiveModel {
            id: Set(assignment.id),
            tenant_id: Set(tenant_id),
            book_id: Set(assignment.book_id),
            class_id: Set(assignment.class_id),
            student_user_id: Set(assignment.student_user_id),
            assigned_by_user_id: Set(assignment.assigned_by_user_id),
            due_date: Set(assignment.due_date),
            created_at: Set(assignment.created_at),
        }
        .insert(&self.db)
        .await
        .context("create book assignment")?;
        Ok(())
    }

    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError> {
        let result = book_assignments::Entity::delete_many()
            .filter(book_assignments::Column::Id.eq(id))
            .scoped_to(book_assignments::Column::TenantId, scope)
            .exec(&self.db)
            .await
            .context("delete book assignment")?;
        Ok(result.rows_affected > 0)
    }
}

fn assignment_from_model(model: book_assignments::Model) -> BookAssignment {
    BookAssignment {
        id: model.id,
        tenant_id: model.tenant_id,
        book_id: model.book_id,
        class_id: model.class_id,
        student_user_id: model.student_user_id,
        assigned_by_user_id: model.assigned_by_user_id,
        due_date: model.due_date,
        created_at: model.created_at,
    }
}

// ── Progress repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProgressRepository {
    pub db: DatabaseConnection,
}

impl ProgressRepository for DbProgressRepository {
    async fn find(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ProgressView>, ClassroomError> {
        let row = reading_progress::Entity::find()
            .filter(reading_progress::Column::UserId.eq(user_id))
            .filter(reading_progress::Column::BookId.eq(book_id))
            .scoped_to(reading_progress::Column::TenantId, scope)
            .find_also_related(books::Entity)
            .one(&self.db)
            .await
            .context("find reading progress")?;
        Ok(row.map(progress_view_from_models))
    }

    async fn list_for_user(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        sort_by: ProgressSortBy,
        page: PageRequest,
    ) -> Result<Vec<ProgressView>, ClassroomError> {
        let mut query = reading_progress::Entity::find()
            .filter(reading_progress::Column::UserId.eq(user_id))
            .scoped_to(reading_progress::Column::TenantId, scope);
        query = match sort_by {
            ProgressSortBy::CreatedAt(Sort::Desc) => {
                query.order_by_desc(reading_progress::Column::CreatedAt)
            }
            ProgressSortBy::CreatedAt(Sort::Asc) => {
                query.order_by_asc(reading_progress::Column::CreatedAt)
            }
            ProgressSortBy::UpdatedAt(Sort::Desc) => {
                query.order_by_desc(reading_progress::Column::UpdatedAt)
            }
            ProgressSortBy::UpdatedAt(Sort::Asc) => {
                query.order_by_asc(reading_progress::Column::UpdatedAt)
            }
        };
        let rows = query
            .find_also_related(books::Entity)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list reading progress")?;
        Ok(rows.into_iter().map(progress_view_from_models).collect())
    }

    async fn reconcile(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        event: &ProgressEvent,
        now: DateTime<Utc>,
    ) -> Result<ReadingProgress, ClassroomError> {
        let tenant_id = scope.require()?;
        let event = event.clone();
        let result = self
            .db
            .transaction::<_, reading_progress::Model, sea_orm::DbErr>(move |txn| {
                Box::pin(async move {
                    // Serializes concurrent events of one user.
                    student_profiles::Entity::find()
                        .filter(student_profiles::Column::UserId.eq(user_id))
                        .scoped_to(student_profiles::Column::TenantId, scope)
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let existing = reading_progress::Entity::find()
                        .filter(reading_progress::Column::UserId.eq(user_id))
                        .filter(reading_progress::Column::BookId.eq(event.book_id))
                        .scoped_to(reading_progress::Column::TenantId, scope)
                        .lock_exclusive()
                        .one(txn)
                        .await?;

                    let saved = match existing {
                        Some(model) => {
                            let mut progress = progress_from_model(model);
                            progress.apply(&event, now);
                            progress_active_model(&progress).update(txn).await?
                        }
                        None => {
                            let progress = ReadingProgress::start(tenant_id, user_id, &event, now);
                            progress_active_model(&progress).insert(txn).await?
                        }
                    };

                    let rows: Vec<ReadingProgress> = reading_progress::Entity::find()
                        .filter(reading_progress::Column::UserId.eq(user_id))
                        .scoped_to(reading_progress::Column::TenantId, scope)
                        .all(txn)
                        .await?
                        .into_iter()
                        .map(progress_from_model)
                        .collect();
                    let totals = ProgressTotals::from_rows(&rows);

                    // Users without a student profile have nothing to update.
                    student_profiles::Entity::update_many()
                        .col_expr(
                            student_profiles::Column::TotalBooksRead,
                            Expr::value(i32::try_from(totals.completed).unwrap_or(i32::MAX)),
                        )
                        .col_expr(
                            student_profiles::Column::TotalReadingTimeSeconds,
                            Expr::value(totals.reading_time_seconds),
                        )
                        .filter(student_profiles::Column::UserId.eq(user_id))
                        .scoped_to(student_profiles::Column::TenantId, scope)
                        .exec(txn)
                        .await?;

                    Ok(saved)
                })
            })
            .await;

        match result {
            Ok(model) => Ok(progress_from_model(model)),
            Err(e) if is_unique_violation_in_txn(&e) => Err(ClassroomError::ProgressConflict),
            Err(e) => Err(anyhow::Error::new(e)
                .context("reconcile reading progress")
                .into()),
        }
    }

    async fn summarize(
        &self,
        scope: TenantScope,
        user_id: Option<Uuid>,
    ) -> Result<ProgressSummary, ClassroomError> {
        let mut base =
            reading_progress::Entity::find().scoped_to(reading_progress::Column::TenantId, scope);
        if let Some(user_id) = user_id {
            base = base.filter(reading_progress::Column::UserId.eq(user_id));
        }

        let (completed, in_progress, reading_time_seconds, interaction_count): (
            i64,
            i64,
            i64,
            i64,
        ) = base
            .clone()
            .select_only()
            .column_as(
                Expr::cust("COUNT(*) FILTER (WHERE is_completed)"),
                "completed",
            )
            .column_as(
                Expr::cust("COUNT(*) FILTER (WHERE NOT is_completed)"),
                "in_progress",
            )
            .column_as(
                Expr::cust(
                    "CAST(LEAST(COALESCE(SUM(reading_time_seconds), 0), 9223372036854775807) AS BIGINT)",
                ),
                "reading_time_seconds",
            )
            .column_as(
                Expr::cust(
                    "CAST(LEAST(COALESCE(SUM(interaction_count), 0), 9223372036854775807) AS BIGINT)",
                ),
                "interaction_count",
            )
            .into_tuple()
            .one(&self.db)
            .await
            .context("aggregate reading progress")?
            .unwrap_or_default();

        let recent = base
            .order_by_desc(reading_progress::Column::UpdatedAt)
            .find_also_related(books::Entity)
            .limit(RECENT_ACTIVITY_LIMIT)
            .all(&self.db)
            .await
            .context("list recent reading progress")?;

        Ok(ProgressSummary {
            totals: ProgressTotals {
                completed: u64::try_from(completed).unwrap_or(0),
                in_progress: u64::try_from(in_progress).unwrap_or(0),
                reading_time_seconds,
                interaction_count,
            },
            recent: recent.into_iter().map(progress_view_from_models).collect(),
        })
    }
}

fn progress_active_model(progress: &ReadingProgress) -> reading_progress::ActiveModel {
    reading_progress::ActiveModel {
        id: Set(progress.id),
        tenant_id: Set(progress.tenant_id),
        user_id: Set(progress.user_id),
        book_id: Set(progress.book_id),
        current_page: Set(progress.current_page),
        total_pages: Set(progress.total_pages),
        is_completed: Set(progress.is_completed),
        completed_at: Set(progress.completed_at),
        reading_time_seconds: Set(progress.reading_time_seconds),
        interaction_count: Set(progress.interaction_count),
        created_at: Set(progress.created_at),
        updated_at: Set(progress.updated_at),
    }
}

fn progress_from_model(model: reading_progress::Model) -> ReadingProgress {
    ReadingProgress {
        id: model.id,
        tenant_id: model.tenant_id,
        user_id: model.user_id,
        book_id: model.book_id,
        current_page: model.current_page,
        total_pages: model.total_pages,
        is_completed: model.is_completed,
        completed_at: model.completed_at,
        reading_time_seconds: model.reading_time_seconds,
        interaction_count: model.interaction_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn progress_view_from_models(
    (progress, book): (reading_progress::Model, Option<books::Model>),
) -> ProgressView {
    ProgressView {
        progress: progress_from_model(progress),
        book_title: book.map(|b| b.title),
    }
}
