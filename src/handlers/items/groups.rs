use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::GroupCount;
use crate::services::ItemService;

/// GET /<resource>/groups - Record counts per group, sorted by group
pub async fn get(State(service): State<ItemService>) -> Result<Json<Vec<GroupCount>>, ApiError> {
    Ok(Json(service.group_count().await?))
}
