pub mod error;
pub mod flash;
pub mod form;
pub mod handlers;
pub mod hosts;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use chirp_config::AppConfig;
use sea_orm::DatabaseConnection;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

pub use error::AppError;
pub use state::AppState;

/// Builds the full application router over an already migrated database.
pub fn router(config: &AppConfig, db: DatabaseConnection) -> Router {
    let state = Arc::new(AppState::new(config, db));
    let hosts = Arc::new(config.host_policy());

    let create = get(handlers::create_form).post(handlers::create_tweet);

    Router::new()
        .route("/", get(handlers::list_tweets))
        .route("/create/", create.clone())
        .route("/create", create)
        .route("/healthz", get(handlers::healthz))
        .nest_service("/media", ServeDir::new(&config.media_root))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(middleware::from_fn_with_state(
            hosts,
            hosts::require_allowed_host,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
