use omni_assist::{DocumentAssistant, TextGenerator};
use omni_core::ConsoleStore;
use omni_shared::config::AppConfig;
use parking_lot::RwLock;
use std::sync::Arc;

pub type SharedStore = Arc<RwLock<ConsoleStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub assistant: Arc<DocumentAssistant<dyn TextGenerator>>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, store: ConsoleStore, generator: Arc<dyn TextGenerator>) -> Self {
        let assistant = DocumentAssistant::new(generator, &config.assist);
        Self {
            store: Arc::new(RwLock::new(store)),
            assistant: Arc::new(assistant),
            config,
        }
    }
}
