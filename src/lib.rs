//! City Guide
//!
//! Event directory front end for a tourist city: turns the filter state
//! carried in listing URLs into queries against the upstream events API and
//! renders paginated, localized listings as JSON views.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod listing;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, FetchError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Events
        .route("/events", get(api::events::list_events))
        .route("/events/:id", get(api::events::get_event))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
