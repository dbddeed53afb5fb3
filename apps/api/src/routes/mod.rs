pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::errors::AppError;
use crate::extraction::handlers as extraction_handlers;
use crate::proposal::handlers as proposal_handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("The requested endpoint does not exist".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/proposals/generate",
            post(proposal_handlers::handle_generate),
        )
        .route(
            "/api/files/upload",
            post(extraction_handlers::handle_upload),
        )
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
