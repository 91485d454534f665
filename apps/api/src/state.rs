use std::sync::Arc;

use crate::session::SessionStore;
use crate::summary::SummaryGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable summary backend. `LlmSummaryGenerator` when an API key is configured,
    /// otherwise `DisabledSummaryGenerator`.
    pub summaries: Arc<dyn SummaryGenerator>,
}
