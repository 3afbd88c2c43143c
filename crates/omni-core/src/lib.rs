//! # OmniCore Core
//! 
//! Domain entities, the navigation permission model, and the console state
//! container for the admin console.

pub mod domain;
pub mod navigation;
pub mod services;
pub mod seed;
pub mod state;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
pub use state::{ConsoleState, ConsoleStore};
