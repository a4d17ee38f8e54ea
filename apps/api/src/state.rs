use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The resume store is whichever backend configuration picked;
/// handlers only ever see the trait.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub auth: AuthService,
    /// Runtime configuration, kept available to handlers.
    #[allow(dead_code)]
    pub config: Config,
}
