/// Classroom service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ClassroomConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HS256 secret used to validate bearer tokens. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3114). Env var: `CLASSROOM_PORT`.
    pub classroom_port: u16,
    /// Reject malformed tenant ids with 400 (default false).
    /// Env var: `STRICT_TENANT_RESOLUTION`.
    pub strict_tenant_resolution: bool,
    /// Email of the platform admin created at startup when missing.
    /// Env var: `SEED_ADMIN_EMAIL`.
    pub seed_admin_email: Option<String>,
}

impl ClassroomConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            classroom_port: std::env::var("CLASSROOM_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            strict_tenant_resolution: std::env::var("STRICT_TENANT_RESOLUTION")
                .ok()
                .is_some_and(|v| parse_flag(&v)),
            seed_admin_email: std::env::var("SEED_ADMIN_EMAIL")
                .ok()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty()),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
