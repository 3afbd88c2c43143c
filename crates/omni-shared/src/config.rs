//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_ASSIST_TIMEOUT_SECS, DEFAULT_DOCUMENT_MODEL,
    DEFAULT_GEMINI_BASE_URL, DEFAULT_QUICK_MODEL,
};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub log: LogSettings,
    pub assist: AssistSettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

/// Hosted text-generation settings.
///
/// The API key itself is never stored here: `api_key_env` names the
/// environment variable that is read on every request.
#[derive(Debug, Deserialize, Clone)]
pub struct AssistSettings {
    pub base_url: String,
    pub api_key_env: String,
    pub document_model: String,
    pub quick_model: String,
    pub timeout_seconds: u64,
    pub language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConsoleSettings {
    pub seed_mock_data: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    /// Built-in defaults only, without files or environment.
    pub fn from_defaults() -> Result<Self, ConfigError> {
        Self::defaults()?.build()?.try_deserialize()
    }

    fn defaults() -> Result<config::builder::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "omni-server")?
            .set_default("log.level", "info")?
            .set_default("log.format", "json")?
            .set_default("assist.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("assist.api_key_env", DEFAULT_API_KEY_ENV)?
            .set_default("assist.document_model", DEFAULT_DOCUMENT_MODEL)?
            .set_default("assist.quick_model", DEFAULT_QUICK_MODEL)?
            .set_default("assist.timeout_seconds", DEFAULT_ASSIST_TIMEOUT_SECS)?
            .set_default("assist.language", "Vietnamese")?
            .set_default("console.seed_mock_data", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deserialize() {
        let config = AppConfig::from_defaults().unwrap();
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.assist.api_key_env, "GEMINI_API_KEY");
        assert!(config.console.seed_mock_data);
    }
}
