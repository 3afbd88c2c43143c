//! # OmniCore Assist
//! 
//! Hosted text generation for the console: SRS/BRD drafts, a short security
//! read-out per user, and role suggestions. Every public operation degrades
//! to a fixed placeholder instead of failing.

pub mod assistant;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod markdown;
pub mod prompts;

pub use assistant::{DocumentAssistant, DocumentKind};
pub use error::AssistError;
pub use gemini::GeminiClient;
pub use generator::{GenerationRequest, TextGenerator};
pub use markdown::{document_code, render_markdown};
