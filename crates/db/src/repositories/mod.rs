//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod comment_repo;
pub mod lead_repo;
pub mod performance_repo;
pub mod role_repo;
pub mod tag_repo;
pub mod user_repo;

pub use activity_repo::ActivityLogRepo;
pub use comment_repo::CommentRepo;
pub use lead_repo::LeadRepo;
pub use performance_repo::AgentPerformanceRepo;
pub use role_repo::RoleRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
