use std::sync::Arc;

use sqlx::PgPool;

use crate::card::icons::TechIconResolver;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable tech icon resolver for card rendering. Default: DeviconResolver.
    pub icon_resolver: Arc<dyn TechIconResolver>,
}
