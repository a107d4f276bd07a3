use std::sync::Arc;

use crate::interview::follow_up::FollowUpGenerator;
use crate::interview::session_log::SessionLog;
use crate::ner::EntityRecognizer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable tagger. Default: HttpEntityRecognizer. Swap via NER_BACKEND.
    pub recognizer: Arc<dyn EntityRecognizer>,
    pub follow_up: Arc<dyn FollowUpGenerator>,
    pub session_log: Arc<SessionLog>,
}
