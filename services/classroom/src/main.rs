use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use pagewise_classroom::config::ClassroomConfig;
use pagewise_classroom::router::build_router;
use pagewise_classroom::state::AppState;
use pagewise_classroom::tenant::TenantResolution;
use pagewise_classroom::usecase::user::SeedPlatformAdminUseCase;
use pagewise_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ClassroomConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        tenancy: TenantResolution {
            jwt_secret: Arc::from(config.jwt_secret.as_str()),
            strict: config.strict_tenant_resolution,
        },
    };

    if let Some(email) = config.seed_admin_email.as_deref() {
        let usecase = SeedPlatformAdminUseCase {
            repo: state.user_repo(),
        };
        match usecase.execute(email).await {
            Ok(true) => info!(email, "platform admin seeded"),
            Ok(false) => info!(email, "platform admin already present"),
            Err(e) => tracing::error!(error = ?e, email, "failed to seed platform admin"),
        }
    }

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.classroom_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!(
        strict_tenant_resolution = config.strict_tenant_resolution,
        "classroom service listening on {http_addr}"
    );
    axum::serve(listener, router).await.expect("server error");
}
