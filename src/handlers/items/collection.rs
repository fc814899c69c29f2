use axum::{extract::State, http::StatusCode, Json};

use crate::api::{ApiQuery, JsonBody, ListQuery};
use crate::error::ApiError;
use crate::models::Item;
use crate::services::ItemService;

/// GET /<resource>?skip=&limit= - List records sorted by name
pub async fn get(
    State(service): State<ItemService>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = service.list(&query).await?;
    Ok(Json(items))
}

/// POST /<resource> - Create a single record
pub async fn post(
    State(service): State<ItemService>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = service.create(body).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
