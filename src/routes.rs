// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{auth::auth_handler, jobs::jobs_handler, profile::profile_handler},
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/user", auth_handler())
        .nest("/jobs", jobs_handler())
        .nest("/profile", profile_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest("/api/v1", api_route)
}
