use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Conversations
        .route("/conversations", post(handlers::create_conversation))
        .route("/conversations/:id", delete(handlers::end_conversation))
        .route("/conversations/:id/start", post(handlers::start_conversation))
        .route("/conversations/:id/messages", post(handlers::send_message))
        .route("/conversations/:id/history", get(handlers::get_history))
        .route("/conversations/:id/clear", post(handlers::clear_memory))
        .route("/conversations/:id/model", post(handlers::select_model))
        // Models
        .route("/models", get(handlers::available_models))
}
