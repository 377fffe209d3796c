use std::sync::Arc;

use services::{AttemptService, LoginService, ResultsService};

pub trait UiApp: Send + Sync {
    fn login_service(&self) -> Arc<LoginService>;
    fn attempt_service(&self) -> Arc<AttemptService>;
    fn results_service(&self) -> Arc<ResultsService>;
}

#[derive(Clone)]
pub struct AppContext {
    login_service: Arc<LoginService>,
    attempt_service: Arc<AttemptService>,
    results_service: Arc<ResultsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            login_service: app.login_service(),
            attempt_service: app.attempt_service(),
            results_service: app.results_service(),
        }
    }

    #[must_use]
    pub fn login_service(&self) -> Arc<LoginService> {
        Arc::clone(&self.login_service)
    }

    #[must_use]
    pub fn attempt_service(&self) -> Arc<AttemptService> {
        Arc::clone(&self.attempt_service)
    }

    #[must_use]
    pub fn results_service(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results_service)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
