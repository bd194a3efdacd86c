//! Auth types shared across Pagewise crates.
//!
//! Provides bearer JWT validation and the `Identity` extractor.

pub mod identity;
pub mod token;
