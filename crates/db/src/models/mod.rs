//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Response structs with references populated, serialized in the camelCase
//!   shape the client consumes
//! - Create/update DTOs (update DTOs use all-`Option` fields for patches)

pub mod activity;
pub mod comment;
pub mod lead;
pub mod performance;
pub mod role;
pub mod tag;
pub mod user;
