use axum::{
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::ContentStore,
    graphql,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::InferenceClient,
};

pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub inference: Arc<dyn InferenceClient>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, inference: Arc<dyn InferenceClient>) -> Self {
        Self { store, inference }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let schema = graphql::build_schema(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/graphql",
            get(graphql::graphql_playground).post(graphql::graphql_handler),
        )
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new().route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
