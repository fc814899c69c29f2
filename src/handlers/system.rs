use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - Service information
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let resources: Vec<&str> = state.services().map(|s| s.resource().base_path()).collect();

    Json(json!({
        "name": "Collectibles API",
        "version": version,
        "description": "Catalogue of collectible items with pagination and group counts",
        "resources": resources,
        "endpoints": {
            "list": "GET /<resource>?skip=&limit=",
            "create": "POST /<resource>",
            "groups": "GET /<resource>/groups",
            "record": "GET|PATCH|DELETE /<resource>/:name",
            "docs": "/api-docs",
            "health": "/health"
        }
    }))
}

/// GET /health - Storage liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    for service in state.services() {
        if let Err(e) = service.ping().await {
            tracing::warn!("Health check failed for {}: {}", service.resource(), e);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            );
        }
    }

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        })),
    )
}

/// Fallback for paths no route matches
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::not_found("Not Found", format!("No route for {} {}", method, uri.path()))
}

/// Fallback for a matched path with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!(
        "Method {} is not allowed on {}",
        method,
        uri.path()
    ))
}
