//! # OmniCore API
//! 
//! HTTP handlers, the JSON response envelope, and the console router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
