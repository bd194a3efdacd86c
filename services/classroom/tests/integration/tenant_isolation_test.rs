use uuid::Uuid;

use pagewise_classroom::domain::types::ProgressEvent;
use pagewise_classroom::error::ClassroomError;
use pagewise_classroom::usecase::assignment::{
    CreateAssignmentInput, CreateAssignmentUseCase, DeleteAssignmentUseCase,
    ListAssignmentsUseCase,
};
use pagewise_classroom::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetClassUseCase, ListClassesUseCase,
};
use pagewise_classroom::usecase::progress::{ProgressAnalyticsUseCase, RecordProgressUseCase};
use pagewise_classroom::usecase::student::{
    GetStudentUseCase, ListStudentsUseCase, UpdateStudentInput, UpdateStudentUseCase,
};
use pagewise_classroom::usecase::user::{RegisterInput, RegisterUseCase};
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::helpers::{MemoryStore, seed_book, seed_school, seed_student};

struct TwoSchools {
    store: MemoryStore,
    t1: Uuid,
    t2: Uuid,
    teacher1: Uuid,
    teacher2: Uuid,
}

async fn register_teacher(store: &MemoryStore, tenant_id: Uuid, email: &str) -> Uuid {
    RegisterUseCase {
        users: store.clone(),
        schools: store.clone(),
    }
    .execute(
        TenantScope::Tenant(tenant_id),
        RegisterInput {
            email: email.to_owned(),
            role: UserRole::Teacher,
            tenant_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn two_schools() -> TwoSchools {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;
    let teacher1 = register_teacher(&store, t1, "teacher@sunny.edu").await;
    let teacher2 = register_teacher(&store, t2, "teacher@oak.edu").await;
    TwoSchools {
        store,
        t1,
        t2,
        teacher1,
        teacher2,
    }
}

async fn create_class(store: &MemoryStore, tenant_id: Uuid, teacher_id: Uuid, name: &str) -> Uuid {
    CreateClassUseCase {
        classes: store.clone(),
        users: store.clone(),
    }
    .execute(
        TenantScope::Tenant(tenant_id),
        CreateClassInput {
            name: name.to_owned(),
            grade_level: 2,
            teacher_id,
        },
    )
    .await
    .unwrap()
    .class
    .id
}

// ── Classes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_own_tenant_classes() {
    let s = two_schools().await;
    let c1 = create_class(&s.store, s.t1, s.teacher1, "2-A").await;
    let c2 = create_class(&s.store, s.t2, s.teacher2, "2-B").await;
    let list = ListClassesUseCase {
        repo: s.store.clone(),
    };

    let t1_classes = list.execute(TenantScope::Tenant(s.t1)).await.unwrap();
    assert_eq!(t1_classes.len(), 1);
    assert_eq!(t1_classes[0].class.id, c1);

    let all = list.execute(TenantScope::Unscoped).await.unwrap();
    let ids: Vec<Uuid> = all.iter().map(|c| c.class.id).collect();
    assert!(ids.contains(&c1) && ids.contains(&c2));
}

#[tokio::test]
async fn should_hide_foreign_class_by_id() {
    let s = two_schools().await;
    let c2 = create_class(&s.store, s.t2, s.teacher2, "2-B").await;

    let result = GetClassUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), c2)
    .await;

    assert!(
        matches!(result, Err(ClassroomError::ClassNotFound)),
        "expected ClassNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_delete_foreign_class() {
    let s = two_schools().await;
    let c2 = create_class(&s.store, s.t2, s.teacher2, "2-B").await;

    let result = DeleteClassUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), c2)
    .await;

    assert!(
        matches!(result, Err(ClassroomError::ClassNotFound)),
        "expected ClassNotFound, got {result:?}"
    );
    assert_eq!(s.store.tables().classes.len(), 1);
}

#[tokio::test]
async fn should_reject_teacher_from_other_tenant() {
    let s = two_schools().await;

    let result = CreateClassUseCase {
        classes: s.store.clone(),
        users: s.store.clone(),
    }
    .execute(
        TenantScope::Tenant(s.t1),
        CreateClassInput {
            name: "2-A".to_owned(),
            grade_level: 2,
            teacher_id: s.teacher2,
        },
    )
    .await;

    assert!(
        matches!(result, Err(ClassroomError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(s.store.tables().classes.is_empty());
}

// ── Students ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_isolate_student_profiles() {
    let s = two_schools().await;
    let (_, p1) = seed_student(&s.store, s.t1, "ada@sunny.edu").await;
    let (_, p2) = seed_student(&s.store, s.t2, "bob@oak.edu").await;

    let listed = ListStudentsUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), None)
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, p1);

    let foreign = GetStudentUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), p2)
    .await;
    assert!(
        matches!(foreign, Err(ClassroomError::StudentNotFound)),
        "expected StudentNotFound, got {foreign:?}"
    );
}

#[tokio::test]
async fn should_not_update_foreign_student() {
    let s = two_schools().await;
    let (_, p2) = seed_student(&s.store, s.t2, "bob@oak.edu").await;

    let result = UpdateStudentUseCase {
        students: s.store.clone(),
        classes: s.store.clone(),
    }
    .execute(
        TenantScope::Tenant(s.t1),
        p2,
        UpdateStudentInput {
            display_name: "Renamed".to_owned(),
            class_id: None,
        },
    )
    .await;

    assert!(
        matches!(result, Err(ClassroomError::StudentNotFound)),
        "expected StudentNotFound, got {result:?}"
    );
    let tables = s.store.tables();
    let untouched = tables.students.iter().find(|p| p.id == p2).unwrap();
    assert_eq!(untouched.display_name, "bob");
}

#[tokio::test]
async fn should_not_place_student_in_foreign_class() {
    let s = two_schools().await;
    let (_, p1) = seed_student(&s.store, s.t1, "ada@sunny.edu").await;
    let c2 = create_class(&s.store, s.t2, s.teacher2, "2-B").await;

    let result = UpdateStudentUseCase {
        students: s.store.clone(),
        classes: s.store.clone(),
    }
    .execute(
        TenantScope::Tenant(s.t1),
        p1,
        UpdateStudentInput {
            display_name: "ada".to_owned(),
            class_id: Some(c2),
        },
    )
    .await;

    assert!(
        matches!(result, Err(ClassroomError::ClassNotFound)),
        "expected ClassNotFound, got {result:?}"
    );
}

// ── Progress ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_progress_analytics_per_tenant() {
    let s = two_schools().await;
    let (ada, _) = seed_student(&s.store, s.t1, "ada@sunny.edu").await;
    let (bob, _) = seed_student(&s.store, s.t2, "bob@oak.edu").await;
    let book = seed_book(&s.store, "The Little Fox", 10).await;
    let record = RecordProgressUseCase {
        progress: s.store.clone(),
        users: s.store.clone(),
        books: s.store.clone(),
    };
    let event = ProgressEvent {
        book_id: book,
        current_page: 10,
        total_pages: 10,
        reading_time_seconds: 60,
        interaction_count: 1,
        is_completed: true,
    };
    record
        .execute(TenantScope::Tenant(s.t1), ada, event.clone())
        .await
        .unwrap();
    record
        .execute(
            TenantScope::Tenant(s.t2),
            bob,
            ProgressEvent {
                is_completed: false,
                current_page: 3,
                ..event
            },
        )
        .await
        .unwrap();

    let analytics = ProgressAnalyticsUseCase {
        repo: s.store.clone(),
    };
    let t1 = analytics
        .execute(TenantScope::Tenant(s.t1), None)
        .await
        .unwrap();
    assert_eq!(t1.totals.completed, 1);
    assert_eq!(t1.totals.in_progress, 0);
    assert!(t1.recent.iter().all(|v| v.progress.tenant_id == s.t1));

    let everyone = analytics.execute(TenantScope::Unscoped, None).await.unwrap();
    assert_eq!(everyone.totals.total(), 2);
}

#[tokio::test]
async fn should_not_record_progress_for_user_of_other_tenant() {
    let s = two_schools().await;
    let (bob, _) = seed_student(&s.store, s.t2, "bob@oak.edu").await;
    let book = seed_book(&s.store, "The Little Fox", 10).await;

    let result = RecordProgressUseCase {
        progress: s.store.clone(),
        users: s.store.clone(),
        books: s.store.clone(),
    }
    .execute(
        TenantScope::Tenant(s.t1),
        bob,
        ProgressEvent {
            book_id: book,
            current_page: 1,
            total_pages: 10,
            reading_time_seconds: 5,
            interaction_count: 1,
            is_completed: false,
        },
    )
    .await;

    assert!(
        matches!(result, Err(ClassroomError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
    assert!(s.store.tables().progress.is_empty());
}

// ── Assignments ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_isolate_assignments() {
    let s = two_schools().await;
    let book = seed_book(&s.store, "The Little Fox", 10).await;
    let c1 = create_class(&s.store, s.t1, s.teacher1, "2-A").await;
    let c2 = create_class(&s.store, s.t2, s.teacher2, "2-B").await;
    let create = CreateAssignmentUseCase {
        assignments: s.store.clone(),
        books: s.store.clone(),
        classes: s.store.clone(),
        users: s.store.clone(),
    };
    let input = |class_id| CreateAssignmentInput {
        book_id: book,
        class_id: Some(class_id),
        student_user_id: None,
        due_date: None,
    };
    create
        .execute(TenantScope::Tenant(s.t1), s.teacher1, input(c1))
        .await
        .unwrap();
    let foreign = create
        .execute(TenantScope::Tenant(s.t2), s.teacher2, input(c2))
        .await
        .unwrap();

    let listed = ListAssignmentsUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), None)
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].class_id, Some(c1));

    let cross_class = create
        .execute(TenantScope::Tenant(s.t1), s.teacher1, input(c2))
        .await;
    assert!(
        matches!(cross_class, Err(ClassroomError::ClassNotFound)),
        "expected ClassNotFound, got {cross_class:?}"
    );

    let cross_delete = DeleteAssignmentUseCase {
        repo: s.store.clone(),
    }
    .execute(TenantScope::Tenant(s.t1), foreign.id)
    .await;
    assert!(
        matches!(cross_delete, Err(ClassroomError::AssignmentNotFound)),
        "expected AssignmentNotFound, got {cross_delete:?}"
    );
    assert_eq!(s.store.tables().assignments.len(), 2);
}
