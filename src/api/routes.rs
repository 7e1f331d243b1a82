use crate::api::{handlers, AppState};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        // Ticket management
        .route("/v1/tickets", get(handlers::list_tickets))
        .route("/v1/tickets", post(handlers::create_ticket))
        .route("/v1/tickets/:id", get(handlers::get_ticket))
        .route("/v1/tickets/:id", patch(handlers::patch_ticket))
        .route("/v1/tickets/:id", delete(handlers::delete_ticket))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
