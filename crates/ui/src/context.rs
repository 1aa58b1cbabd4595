use std::sync::Arc;

use conjugaison_core::model::TenseSelection;
use services::SessionLoopService;

pub trait UiApp: Send + Sync {
    fn initial_tenses(&self) -> TenseSelection;
    fn session_loop(&self) -> Arc<SessionLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_tenses: TenseSelection,
    session_loop: Arc<SessionLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_tenses: app.initial_tenses(),
            session_loop: app.session_loop(),
        }
    }

    /// Tenses selected when the window opens. Later toggles live in the session.
    #[must_use]
    pub fn initial_tenses(&self) -> TenseSelection {
        self.initial_tenses.clone()
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
