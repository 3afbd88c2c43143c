//! # OmniCore Shared
//! 
//! Shared configuration, identifiers, and telemetry for the admin console.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
