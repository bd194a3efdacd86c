//! Test utilities for Pagewise services.
//!
//! Provides `MockAuth`, which mints signed bearer tokens for test requests.
//! Import in `#[cfg(test)]` blocks and integration tests only, never in
//! production code.

pub mod auth;
