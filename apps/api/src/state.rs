use std::sync::Arc;

use crate::interview::InterviewService;
use crate::store::InterviewStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InterviewStore>,
    pub interviews: Arc<InterviewService>,
}
