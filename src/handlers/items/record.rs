use axum::{extract::State, Json};

use crate::api::{ApiPath, JsonBody};
use crate::error::ApiError;
use crate::models::Item;
use crate::services::ItemService;

/// GET /<resource>/:name - Get a single record by name
pub async fn get(
    State(service): State<ItemService>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(service.get_one(&name).await?))
}

/// PATCH /<resource>/:name - Partially update a record; omitted fields are kept
pub async fn patch(
    State(service): State<ItemService>,
    ApiPath(name): ApiPath<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(service.update(&name, body).await?))
}

/// DELETE /<resource>/:name - Remove a record and return it
pub async fn delete(
    State(service): State<ItemService>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(service.delete(&name).await?))
}
