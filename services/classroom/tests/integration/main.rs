mod book_test;
mod helpers;
mod tenant_isolation_test;
mod user_test;
