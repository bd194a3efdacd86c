pub mod health;
pub mod middleware;
pub mod serde;
pub mod tenant_filter;
pub mod tracing;
