//! Application-wide constants

pub const API_PREFIX: &str = "/api/v1";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DOCUMENT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_QUICK_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ASSIST_TIMEOUT_SECS: u64 = 60;
