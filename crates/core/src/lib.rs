//! LeadHub domain library.
//!
//! Pure domain types shared by the persistence and API layers: the error
//! taxonomy, id/timestamp aliases, role and lead vocabularies, pagination
//! normalization, and payload validation rules. This crate has no database
//! or HTTP dependencies so CLI tooling can use it too.

pub mod activity;
pub mod error;
pub mod lead;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
