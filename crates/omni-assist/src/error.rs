use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    #[error("Gemini network error: {0}")]
    Network(String),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse Gemini response: {0}")]
    Parse(String),

    #[error("Gemini returned no text")]
    EmptyResponse,
}
