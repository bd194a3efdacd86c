use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;

use pagewise_core::health::{healthz, readiness};
use pagewise_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    assignment::{create_assignment, delete_assignment, list_assignments},
    book::{add_page, create_book, delete_book, delete_page, get_book, list_books},
    class::{create_class, delete_class, get_class, list_classes, update_class},
    progress::{get_progress, list_progress, progress_analytics, record_progress},
    school::{create_school, delete_school, list_schools},
    student::{create_student, get_student, list_students, update_student},
    user::{get_me, list_users, register, update_me},
};
use crate::state::AppState;
use crate::tenant::resolve_tenant;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(&state.db).await
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Progress
        .route("/progress", post(record_progress).get(list_progress))
        .route("/progress/analytics", get(progress_analytics))
        .route("/progress/{book_id}", get(get_progress))
        // Accounts
        .route("/account/register", post(register))
        .route("/users/me", get(get_me).put(update_me))
        .route("/users", get(list_users))
        // Schools
        .route("/management/schools", get(list_schools).post(create_school))
        .route("/management/schools/{id}", delete(delete_school))
        // Classes
        .route("/classes", get(list_classes).post(create_class))
        .route(
            "/classes/{id}",
            get(get_class).put(update_class).delete(delete_class),
        )
        // Students
        .route("/students", get(list_students).post(create_student))
        .route("/students/{id}", get(get_student).put(update_student))
        // Assignments
        .route("/assignments", get(list_assignments).post(create_assignment))
        .route("/assignments/{id}", delete(delete_assignment))
        // Catalog
        .route("/books", get(list_books).post(create_book))
        .route("/books/{id}", get(get_book).delete(delete_book))
        .route("/books/{id}/pages", post(add_page))
        .route("/books/{id}/pages/{page_id}", delete(delete_page))
        .layer(middleware::from_fn_with_state(state.clone(), resolve_tenant));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(trace_layer()),
        )
        .with_state(state)
}
