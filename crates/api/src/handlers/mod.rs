//! Request handlers for the lead-management resources.
//!
//! Each submodule holds the async handlers for one resource together with
//! its request/response DTOs. Handlers delegate to the repositories in
//! `leadhub_db`, map errors via [`AppError`](crate::error::AppError), and
//! record audit entries through [`record_activity`](crate::activity::record_activity).

pub mod activity;
pub mod comments;
pub mod leads;
pub mod performance;
pub mod tags;
pub mod users;
