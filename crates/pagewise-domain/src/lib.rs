//! Domain types shared across all Pagewise crates.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod book;
pub mod pagination;
pub mod tenant;
pub mod user;
