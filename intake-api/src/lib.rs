//! intake-api library - Form Intake & Triage service
//!
//! Accepts question/answer forms, rates their urgency from answer sentiment,
//! and moves them through the draft/filled/reviewed/closed review lifecycle.

use axum::Router;
use sqlx::SqlitePool;

pub mod api;
pub mod db;
pub mod error;
pub mod listing;
pub mod services;

use services::urgency::UrgencyClassifier;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Urgency classifier backed by the sentiment service
    pub classifier: UrgencyClassifier,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, classifier: UrgencyClassifier) -> Self {
        Self { db, classifier }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{post, put};
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    // Browser clients call this API directly from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/forms", post(api::create_form).get(api::list_forms))
        .route("/v1/forms/:id", put(api::update_form))
        .merge(api::health_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
