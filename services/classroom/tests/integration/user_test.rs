use serde_json::json;
use uuid::Uuid;

use pagewise_classroom::error::ClassroomError;
use pagewise_classroom::usecase::school::{
    CreateSchoolInput, CreateSchoolUseCase, DeleteSchoolUseCase,
};
use pagewise_classroom::usecase::user::{
    GetMeUseCase, ListUsersUseCase, RegisterInput, RegisterUseCase, SeedPlatformAdminUseCase,
    UpdateProfileUseCase,
};
use pagewise_domain::pagination::PageRequest;
use pagewise_domain::tenant::TenantScope;
use pagewise_domain::user::UserRole;

use crate::helpers::{MemoryStore, seed_school, seed_student};

fn register(store: &MemoryStore) -> RegisterUseCase<MemoryStore, MemoryStore> {
    RegisterUseCase {
        users: store.clone(),
        schools: store.clone(),
    }
}

fn teacher(email: &str, tenant_id: Option<Uuid>) -> RegisterInput {
    RegisterInput {
        email: email.to_owned(),
        role: UserRole::Teacher,
        tenant_id,
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_allow_same_email_in_two_schools() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;
    let usecase = register(&store);

    let first = usecase
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", None))
        .await
        .unwrap();
    let second = usecase
        .execute(TenantScope::Tenant(t2), teacher("x@example.com", None))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.tenant_id, Some(t1));
    assert_eq!(second.tenant_id, Some(t2));
}

#[tokio::test]
async fn should_reject_duplicate_email_in_same_school() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let usecase = register(&store);

    usecase
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", None))
        .await
        .unwrap();
    let result = usecase
        .execute(TenantScope::Tenant(t1), teacher("  X@Example.com ", None))
        .await;

    assert!(
        matches!(result, Err(ClassroomError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_body_tenant_that_disagrees_with_request_tenant() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;

    let result = register(&store)
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", Some(t2)))
        .await;

    assert!(
        matches!(result, Err(ClassroomError::TenantMismatch)),
        "expected TenantMismatch, got {result:?}"
    );
}

#[tokio::test]
async fn should_register_into_body_tenant_without_request_tenant() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;

    let user = register(&store)
        .execute(TenantScope::Unscoped, teacher("x@example.com", Some(t1)))
        .await
        .unwrap();

    assert_eq!(user.tenant_id, Some(t1));
}

#[tokio::test]
async fn should_require_some_tenant_to_register() {
    let store = MemoryStore::default();

    let result = register(&store)
        .execute(TenantScope::Unscoped, teacher("x@example.com", None))
        .await;

    assert!(
        matches!(result, Err(ClassroomError::TenantRequired)),
        "expected TenantRequired, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_self_registered_platform_admin() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;

    let result = register(&store)
        .execute(
            TenantScope::Tenant(t1),
            RegisterInput {
                email: "root@example.com".to_owned(),
                role: UserRole::PlatformAdmin,
                tenant_id: None,
            },
        )
        .await;

    assert!(
        matches!(result, Err(ClassroomError::Forbidden)),
        "expected Forbidden, got {result:?}"
    );
}

// ── Profile ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_update_profile_document_and_read_it_back() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let user = register(&store)
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", None))
        .await
        .unwrap();
    let scope = TenantScope::Tenant(t1);

    let updated = UpdateProfileUseCase {
        repo: store.clone(),
    }
    .execute(scope, user.id, Some(json!({ "displayName": "Ms. X" })))
    .await
    .unwrap();
    assert_eq!(updated.profile, Some(json!({ "displayName": "Ms. X" })));

    let me = GetMeUseCase {
        repo: store.clone(),
    }
    .execute(scope, user.id)
    .await
    .unwrap();
    assert_eq!(me.profile, updated.profile);
}

#[tokio::test]
async fn should_not_see_self_through_foreign_tenant() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;
    let user = register(&store)
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", None))
        .await
        .unwrap();

    let result = GetMeUseCase {
        repo: store.clone(),
    }
    .execute(TenantScope::Tenant(t2), user.id)
    .await;

    assert!(
        matches!(result, Err(ClassroomError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_list_users_by_role_within_tenant() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;
    register(&store)
        .execute(TenantScope::Tenant(t1), teacher("x@example.com", None))
        .await
        .unwrap();
    register(&store)
        .execute(TenantScope::Tenant(t2), teacher("y@example.com", None))
        .await
        .unwrap();
    seed_student(&store, t1, "ada@sunny.edu").await;

    let list = ListUsersUseCase {
        repo: store.clone(),
    };
    let page = PageRequest::from_query(None, None);

    let teachers = list
        .execute(TenantScope::Tenant(t1), Some(UserRole::Teacher), page)
        .await
        .unwrap();
    assert_eq!(teachers.len(), 1);
    assert_eq!(teachers[0].email, "x@example.com");

    // School admin, teacher and student.
    let everyone = list
        .execute(TenantScope::Tenant(t1), None, page)
        .await
        .unwrap();
    assert_eq!(everyone.len(), 3);
}

// ── Schools ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_school_with_admin_and_reject_taken_subdomain() {
    let store = MemoryStore::default();
    let usecase = CreateSchoolUseCase {
        repo: store.clone(),
    };

    let school = usecase
        .execute(CreateSchoolInput {
            name: "Sunny Hill".to_owned(),
            subdomain: None,
            admin_email: "Principal@Sunny.edu".to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(school.subdomain, "sunny-hill");
    {
        let tables = store.tables();
        let admin = tables
            .users
            .iter()
            .find(|u| u.tenant_id == Some(school.id))
            .unwrap();
        assert_eq!(admin.role, UserRole::SchoolAdmin);
        assert_eq!(admin.email, "principal@sunny.edu");
    }

    let taken = usecase
        .execute(CreateSchoolInput {
            name: "Another".to_owned(),
            subdomain: Some("sunny-hill".to_owned()),
            admin_email: "other@sunny.edu".to_owned(),
        })
        .await;
    assert!(
        matches!(taken, Err(ClassroomError::SchoolAlreadyExists)),
        "expected SchoolAlreadyExists, got {taken:?}"
    );
}

#[tokio::test]
async fn should_remove_school_owned_rows_on_delete() {
    let store = MemoryStore::default();
    let t1 = seed_school(&store, "Sunny Hill").await;
    let t2 = seed_school(&store, "Oak Park").await;
    seed_student(&store, t1, "ada@sunny.edu").await;
    seed_student(&store, t2, "bob@oak.edu").await;

    DeleteSchoolUseCase {
        repo: store.clone(),
    }
    .execute(t1)
    .await
    .unwrap();

    let tables = store.tables();
    assert_eq!(tables.schools.len(), 1);
    assert!(tables.users.iter().all(|u| u.tenant_id == Some(t2)));
    assert!(tables.students.iter().all(|s| s.tenant_id == t2));
}

// ── Platform admin seed ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_seed_platform_admin_once() {
    let store = MemoryStore::default();
    let usecase = SeedPlatformAdminUseCase {
        repo: store.clone(),
    };

    assert!(usecase.execute("root@pagewise.app").await.unwrap());
    assert!(!usecase.execute("ROOT@pagewise.app").await.unwrap());

    let tables = store.tables();
    let admins: Vec<_> = tables
        .users
        .iter()
        .filter(|u| u.role == UserRole::PlatformAdmin)
        .collect();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].tenant_id, None);
}
