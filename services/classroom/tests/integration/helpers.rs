//! In-memory repositories for multi-step scenarios.
//!
//! `MemoryStore` implements every repository trait over shared vectors and
//! applies the same tenant contract as the database repositories: reads
//! filter by scope, inserts stamp or admit the scope, updates and deletes
//! match on id and scope.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pagewise_classroom::domain::repository::{
    AssignmentRepository, BookRepository, ClassRepository, ProgressRepository, SchoolRepository,
    StudentRepository, UserRepository,
};
use pagewise_classroom::domain::types::{
    Book, BookAssignment, BookPage, Class, ClassChanges, ClassWithCount, ProgressEvent,
    ProgressSortBy, ProgressSummary, ProgressTotals, ProgressView, RECENT_ACTIVITY_LIMIT,
    ReadingProgress, School, StudentProfile, User,
};
use pagewise_classroom::error::ClassroomError;
use pagewise_classroom::usecase::book::{AddPageInput, AddPageUseCase, CreateBookInput, CreateBookUseCase};
use pagewise_classroom::usecase::school::{CreateSchoolInput, CreateSchoolUseCase};
use pagewise_classroom::usecase::student::{CreateStudentInput, CreateStudentUseCase};
use pagewise_domain::pagination::{PageRequest, Sort};
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

#[derive(Default)]
pub struct Tables {
    pub schools: Vec<School>,
    pub users: Vec<User>,
    pub classes: Vec<Class>,
    pub students: Vec<StudentProfile>,
    pub books: Vec<Book>,
    pub pages: Vec<BookPage>,
    pub assignments: Vec<BookAssignment>,
    pub progress: Vec<ReadingProgress>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

fn page_slice<T>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn view(tables: &Tables, progress: &ReadingProgress) -> ProgressView {
    ProgressView {
        progress: progress.clone(),
        book_title: tables
            .books
            .iter()
            .find(|b| b.id == progress.book_id)
            .map(|b| b.title.clone()),
    }
}

// ── Schools ──────────────────────────────────────────────────────────────────

impl SchoolRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<School>, ClassroomError> {
        Ok(self.tables().schools.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<School>, ClassroomError> {
        Ok(self.tables().schools.iter().find(|s| s.id == id).cloned())
    }

    async fn subdomain_taken(&self, subdomain: &str) -> Result<bool, ClassroomError> {
        Ok(self.tables().schools.iter().any(|s| s.subdomain == subdomain))
    }

    async fn create_with_admin(&self, school: &School, admin: &User) -> Result<(), ClassroomError> {
        let mut t = self.tables();
        t.schools.push(school.clone());
        t.users.push(admin.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let before = t.schools.len();
        t.schools.retain(|s| s.id != id);
        let owned = |tenant: Uuid| tenant != id;
        t.users.retain(|u| u.tenant_id != Some(id));
        t.classes.retain(|c| owned(c.tenant_id));
        t.students.retain(|s| owned(s.tenant_id));
        t.assignments.retain(|a| owned(a.tenant_id));
        t.progress.retain(|p| owned(p.tenant_id));
        Ok(t.schools.len() < before)
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, scope: TenantScope, id: Uuid) -> Result<Option<User>, ClassroomError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.id == id && scope.permits(u.tenant_id))
            .cloned())
    }

    async fn find_by_tenant_email(
        &self,
        tenant_id: Option<Uuid>,
        email: &str,
    ) -> Result<Option<User>, ClassroomError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.tenant_id == tenant_id && u.email == email)
            .cloned())
    }

    async fn list(
        &self,
        scope: TenantScope,
        role: Option<UserRole>,
        page: PageRequest,
    ) -> Result<Vec<User>, ClassroomError> {
        let rows = self
            .tables()
            .users
            .iter()
            .filter(|u| scope.permits(u.tenant_id))
            .filter(|u| role.is_none_or(|r| u.role == r))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn create(&self, scope: TenantScope, user: &User) -> Result<User, ClassroomError> {
        let user = User {
            tenant_id: scope.stamp(user.tenant_id)?,
            ..user.clone()
        };
        let mut t = self.tables();
        if t
            .users
            .iter()
            .any(|u| u.tenant_id == user.tenant_id && u.email == user.email)
        {
            return Err(ClassroomError::UserAlreadyExists);
        }
        t.users.push(user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        scope: TenantScope,
        id: Uuid,
        profile: Option<serde_json::Value>,
    ) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        match t
            .users
            .iter_mut()
            .find(|u| u.id == id && scope.permits(u.tenant_id))
        {
            Some(user) => {
                user.profile = profile;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Classes ──────────────────────────────────────────────────────────────────

fn with_count(tables: &Tables, class: &Class) -> ClassWithCount {
    ClassWithCount {
        class: class.clone(),
        student_count: tables
            .students
            .iter()
            .filter(|s| s.class_id == Some(class.id))
            .count() as u64,
    }
}

impl ClassRepository for MemoryStore {
    async fn list(&self, scope: TenantScope) -> Result<Vec<ClassWithCount>, ClassroomError> {
        let t = self.tables();
        Ok(t.classes
            .iter()
            .filter(|c| scope.permits(Some(c.tenant_id)))
            .map(|c| with_count(&t, c))
            .collect())
    }

    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<ClassWithCount>, ClassroomError> {
        let t = self.tables();
        Ok(t.classes
            .iter()
            .find(|c| c.id == id && scope.permits(Some(c.tenant_id)))
            .map(|c| with_count(&t, c)))
    }

    async fn create(&self, scope: TenantScope, class: &Class) -> Result<(), ClassroomError> {
        scope.admit(class.tenant_id)?;
        self.tables().classes.push(class.clone());
        Ok(())
    }

    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        changes: &ClassChanges,
    ) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let Some(class) = t
            .classes
            .iter_mut()
            .find(|c| c.id == id && scope.permits(Some(c.tenant_id)))
        else {
            return Ok(false);
        };
        if let Some(name) = &changes.name {
            class.name = name.clone();
        }
        if let Some(grade_level) = changes.grade_level {
            class.grade_level = grade_level;
        }
        if let Some(teacher_id) = changes.teacher_id {
            class.teacher_id = teacher_id;
        }
        Ok(true)
    }

    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let before = t.classes.len();
        t.classes
            .retain(|c| !(c.id == id && scope.permits(Some(c.tenant_id))));
        let deleted = t.classes.len() < before;
        if deleted {
            for student in t.students.iter_mut().filter(|s| s.class_id == Some(id)) {
                student.class_id = None;
            }
        }
        Ok(deleted)
    }
}

// ── Students ─────────────────────────────────────────────────────────────────

impl StudentRepository for MemoryStore {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<StudentProfile>, ClassroomError> {
        Ok(self
            .tables()
            .students
            .iter()
            .filter(|s| scope.permits(Some(s.tenant_id)))
            .filter(|s| class_id.is_none() || s.class_id == class_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        scope: TenantScope,
        id: Uuid,
    ) -> Result<Option<StudentProfile>, ClassroomError> {
        Ok(self
            .tables()
            .students
            .iter()
            .find(|s| s.id == id && scope.permits(Some(s.tenant_id)))
            .cloned())
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
        let mut t = self.tables();
        if t
            .users
            .iter()
            .any(|u| u.tenant_id == user_tenant && u.email == user.email)
        {
            return Err(ClassroomError::UserAlreadyExists);
        }
        t.users.push(User {
            tenant_id: user_tenant,
            ..user.clone()
        });
        t.students.push(profile.clone());
        Ok(())
    }

    async fn update(
        &self,
        scope: TenantScope,
        id: Uuid,
        display_name: &str,
        class_id: Option<Uuid>,
    ) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        match t
            .students
            .iter_mut()
            .find(|s| s.id == id && scope.permits(Some(s.tenant_id)))
        {
            Some(student) => {
                student.display_name = display_name.to_owned();
                student.class_id = class_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Assignments ──────────────────────────────────────────────────────────────

impl AssignmentRepository for MemoryStore {
    async fn list(
        &self,
        scope: TenantScope,
        class_id: Option<Uuid>,
    ) -> Result<Vec<BookAssignment>, ClassroomError> {
        Ok(self
            .tables()
            .assignments
            .iter()
            .filter(|a| scope.permits(Some(a.tenant_id)))
            .filter(|a| class_id.is_none() || a.class_id == class_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        scope: TenantScope,
        assignment: &BookAssignment,
    ) -> Result<(), ClassroomError> {
        scope.admit(assignment.tenant_id)?;
        self.tables().assignments.push(assignment.clone());
        Ok(())
    }

    async fn delete(&self, scope: TenantScope, id: Uuid) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let before = t.assignments.len();
        t.assignments
            .retain(|a| !(a.id == id && scope.permits(Some(a.tenant_id))));
        Ok(t.assignments.len() < before)
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

fn refresh_page_count(tables: &mut Tables, book_id: Uuid) {
    let count = tables.pages.iter().filter(|p| p.book_id == book_id).count() as i32;
    if let Some(book) = tables.books.iter_mut().find(|b| b.id == book_id) {
        book.page_count = count;
    }
}

impl BookRepository for MemoryStore {
    async fn list(&self, page: PageRequest) -> Result<Vec<Book>, ClassroomError> {
        Ok(page_slice(self.tables().books.clone(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ClassroomError> {
        Ok(self.tables().books.iter().find(|b| b.id == id).cloned())
    }

    async fn list_pages(&self, book_id: Uuid) -> Result<Vec<BookPage>, ClassroomError> {
        let mut pages: Vec<BookPage> = self
            .tables()
            .pages
            .iter()
            .filter(|p| p.book_id == book_id)
            .cloned()
            .collect();
        pages.sort_by_key(|p| p.page_number);
        Ok(pages)
    }

    async fn create(&self, book: &Book) -> Result<(), ClassroomError> {
        self.tables().books.push(Book {
            page_count: 0,
            ..book.clone()
        });
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let before = t.books.len();
        t.books.retain(|b| b.id != id);
        t.pages.retain(|p| p.book_id != id);
        Ok(t.books.len() < before)
    }

    async fn add_page(&self, page: &BookPage) -> Result<(), ClassroomError> {
        let mut t = self.tables();
        if t
            .pages
            .iter()
            .any(|p| p.book_id == page.book_id && p.page_number == page.page_number)
        {
            return Err(ClassroomError::PageNumberTaken);
        }
        t.pages.push(page.clone());
        refresh_page_count(&mut t, page.book_id);
        Ok(())
    }

    async fn delete_page(&self, book_id: Uuid, page_id: Uuid) -> Result<bool, ClassroomError> {
        let mut t = self.tables();
        let before = t.pages.len();
        t.pages.retain(|p| !(p.book_id == book_id && p.id == page_id));
        if t.pages.len() == before {
            return Ok(false);
        }
        refresh_page_count(&mut t, book_id);
        Ok(true)
    }
}

// ── Progress ─────────────────────────────────────────────────────────────────

impl ProgressRepository for MemoryStore {
    async fn find(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<Option<ProgressView>, ClassroomError> {
        let t = self.tables();
        Ok(t.progress
            .iter()
            .find(|p| p.user_id == user_id && p.book_id == book_id && scope.permits(Some(p.tenant_id)))
            .map(|p| view(&t, p)))
    }

    async fn list_for_user(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        sort_by: ProgressSortBy,
        page: PageRequest,
    ) -> Result<Vec<ProgressView>, ClassroomError> {
        let t = self.tables();
        let mut rows: Vec<&ReadingProgress> = t
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && scope.permits(Some(p.tenant_id)))
            .collect();
        match sort_by {
            ProgressSortBy::CreatedAt(Sort::Desc) => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProgressSortBy::CreatedAt(Sort::Asc) => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ProgressSortBy::UpdatedAt(Sort::Desc) => rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            ProgressSortBy::UpdatedAt(Sort::Asc) => rows.sort_by(|a, b| a.updated_at.cmp(&b.updated_at)),
        }
        let views = rows.into_iter().map(|p| view(&t, p)).collect();
        Ok(page_slice(views, page))
    }

    async fn reconcile(
        &self,
        scope: TenantScope,
        user_id: Uuid,
        event: &ProgressEvent,
        now: DateTime<Utc>,
    ) -> Result<ReadingProgress, ClassroomError> {
        let tenant_id = scope.require()?;
        let mut t = self.tables();

        let existing = t
            .progress
            .iter()
            .position(|p| p.user_id == user_id && p.book_id == event.book_id);
        let saved = match existing {
            Some(i) if scope.permits(Some(t.progress[i].tenant_id)) => {
                t.progress[i].apply(event, now);
                t.progress[i].clone()
            }
            // The (user, book) key is global; a row outside the scope is a key collision.
            Some(_) => return Err(ClassroomError::ProgressConflict),
            None => {
                let row = ReadingProgress::start(tenant_id, user_id, event, now);
                t.progress.push(row.clone());
                row
            }
        };

        let totals = ProgressTotals::from_rows(
            t.progress
                .iter()
                .filter(|p| p.user_id == user_id && scope.permits(Some(p.tenant_id))),
        );
        if let Some(profile) = t
            .students
            .iter_mut()
            .find(|s| s.user_id == user_id && scope.permits(Some(s.tenant_id)))
        {
            profile.total_books_read = totals.completed as i32;
            profile.total_reading_time_seconds = totals.reading_time_seconds;
        }
        Ok(saved)
    }

    async fn summarize(
        &self,
        scope: TenantScope,
        user_id: Option<Uuid>,
    ) -> Result<ProgressSummary, ClassroomError> {
        let t = self.tables();
        let mut rows: Vec<&ReadingProgress> = t
            .progress
            .iter()
            .filter(|p| scope.permits(Some(p.tenant_id)))
            .filter(|p| user_id.is_none_or(|u| p.user_id == u))
            .collect();
        let totals = ProgressTotals::from_rows(rows.iter().copied());
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let recent = rows
            .into_iter()
            .take(RECENT_ACTIVITY_LIMIT as usize)
            .map(|p| view(&t, p))
            .collect();
        Ok(ProgressSummary { totals, recent })
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Create a school through the use case and return its id.
pub async fn seed_school(store: &MemoryStore, name: &str) -> Uuid {
    let usecase = CreateSchoolUseCase {
        repo: store.clone(),
    };
    let school = usecase
        .execute(CreateSchoolInput {
            name: name.to_owned(),
            subdomain: None,
            admin_email: format!("admin@{}.edu", name.to_lowercase().replace(' ', "-")),
        })
        .await
        .unwrap();
    school.id
}

/// Create a Student user with a profile. Returns `(user_id, profile_id)`.
pub async fn seed_student(store: &MemoryStore, tenant_id: Uuid, email: &str) -> (Uuid, Uuid) {
    let usecase = CreateStudentUseCase {
        students: store.clone(),
        classes: store.clone(),
        users: store.clone(),
    };
    let profile = usecase
        .execute(
            TenantScope::Tenant(tenant_id),
            CreateStudentInput {
                email: email.to_owned(),
                display_name: email.split('@').next().unwrap_or(email).to_owned(),
                class_id: None,
                parent_user_id: None,
            },
        )
        .await
        .unwrap();
    (profile.user_id, profile.id)
}

/// Create a catalog book with `pages` numbered pages and return its id.
pub async fn seed_book(store: &MemoryStore, title: &str, pages: i32) -> Uuid {
    let create = CreateBookUseCase {
        repo: store.clone(),
    };
    let book = create
        .execute(CreateBookInput {
            title: title.to_owned(),
            author: None,
            language: None,
            description: None,
            status: None,
        })
        .await
        .unwrap();
    let add = AddPageUseCase {
        repo: store.clone(),
    };
    for number in 1..=pages {
        add.execute(
            book.id,
            AddPageInput {
                page_number: number,
                narration_text: None,
                narration_audio_url: None,
                asset_url: None,
            },
        )
        .await
        .unwrap();
    }
    book.id
}

pub fn student_profile(store: &MemoryStore, profile_id: Uuid) -> StudentProfile {
    store
        .tables()
        .students
        .iter()
        .find(|s| s.id == profile_id)
        .cloned()
        .unwrap()
}
