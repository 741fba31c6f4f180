//! Configuration module for token builds
//!
//! Provides types and parsing for `shift.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
