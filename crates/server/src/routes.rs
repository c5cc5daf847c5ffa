use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::storage::todo_store::TodoStore;

use crate::todos;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health plus the todo CRUD surface.
pub fn build_router(store: Arc<TodoStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(todos::list))
        .route("/todos/", post(todos::create))
        .route("/todo/:todo_id", get(todos::get))
        .route("/todo/:todo_id/", patch(todos::update).delete(todos::delete))
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
