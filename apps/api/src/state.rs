use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::Oracle;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The generative oracle is carried as a trait object so tests (and future
/// backends) can substitute a scripted implementation without touching
/// handler code.
#[derive(Clone)]
pub struct AppState {
    pub oracle: Arc<dyn Oracle>,
    pub config: Config,
}
