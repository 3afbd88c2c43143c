use omni_core::User;
use omni_shared::config::AssistSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::generator::{GenerationRequest, TextGenerator};
use crate::prompts;

pub const SRS_PLACEHOLDER: &str = "# Error\nThe SRS document cannot be generated right now.";
pub const BRD_PLACEHOLDER: &str = "# Error\nThe BRD document cannot be generated right now.";
pub const SECURITY_PLACEHOLDER: &str = "Security analysis unavailable.";
pub const ROLE_PLACEHOLDER: &str = "No role suggestion available.";

/// Kind of generated requirements document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    Srs,
    Brd,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Srs => "SRS",
            DocumentKind::Brd => "BRD",
        }
    }

    pub fn temperature(&self) -> f32 {
        match self {
            DocumentKind::Srs => 0.2,
            DocumentKind::Brd => 0.3,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            DocumentKind::Srs => SRS_PLACEHOLDER,
            DocumentKind::Brd => BRD_PLACEHOLDER,
        }
    }
}

/// Document and advisory generation on top of a [`TextGenerator`].
///
/// None of the operations fail: any generator error is logged and replaced by
/// the operation's placeholder text.
pub struct DocumentAssistant<G: TextGenerator + ?Sized> {
    generator: Arc<G>,
    document_model: String,
    quick_model: String,
    language: String,
}

impl<G: TextGenerator + ?Sized> DocumentAssistant<G> {
    pub fn new(generator: Arc<G>, settings: &AssistSettings) -> Self {
        Self {
            generator,
            document_model: settings.document_model.clone(),
            quick_model: settings.quick_model.clone(),
            language: settings.language.clone(),
        }
    }

    pub async fn generate_document(&self, kind: DocumentKind, feature: &str) -> String {
        let prompt = match kind {
            DocumentKind::Srs => prompts::srs(feature, &self.language),
            DocumentKind::Brd => prompts::brd(feature, &self.language),
        };
        let request = GenerationRequest::new(&self.document_model, prompt)
            .with_temperature(kind.temperature());

        info!("Generating {} document for feature '{}'", kind.as_str(), feature);
        self.run(request, kind.placeholder()).await
    }

    pub async fn analyze_user_security(&self, user: &User) -> String {
        let request = GenerationRequest::new(
            &self.quick_model,
            prompts::user_security(user, &self.language),
        );
        self.run(request, SECURITY_PLACEHOLDER).await
    }

    pub async fn suggest_role(&self, department: &str, description: &str) -> String {
        let request = GenerationRequest::new(
            &self.quick_model,
            prompts::role_suggestion(department, description, &self.language),
        );
        self.run(request, ROLE_PLACEHOLDER).await
    }

    async fn run(&self, request: GenerationRequest, placeholder: &str) -> String {
        let model = request.model.clone();
        match self.generator.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Text generation with {} failed: {}", model, e);
                placeholder.to_string()
            }
        }
    }
}
