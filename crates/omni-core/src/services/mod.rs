//! Domain services (business logic)

pub mod user_directory;

pub use user_directory::{filter_users, status_counts, StatusCounts, UserFilters};
