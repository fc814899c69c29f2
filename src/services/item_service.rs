use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::api::{ListQuery, Pagination};
use crate::database::{DatabaseError, ItemStore};
use crate::error::ApiError;
use crate::models::{GroupCount, Item, ItemPatch, Resource};
use crate::validation;

/// CRUD and aggregation for one resource, translating store results into
/// resource-specific API errors
#[derive(Clone)]
pub struct ItemService {
    resource: Resource,
    store: Arc<dyn ItemStore>,
    pagination: Pagination,
}

impl ItemService {
    pub fn new(resource: Resource, store: Arc<dyn ItemStore>, pagination: Pagination) -> Self {
        Self { resource, store, pagination }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Validate a raw body against the create schema and persist it
    pub async fn create(&self, body: Value) -> Result<Item, ApiError> {
        validation::validate_create(&body)?;
        let item = Item::from_json(body).map_err(|e| ApiError::bad_request(e.to_string()))?;

        let created = self.store.insert(item).await.map_err(|e| self.db_error(e))?;
        info!("Created {} '{}'", self.resource.noun(), created.name);
        Ok(created)
    }

    pub async fn get_one(&self, name: &str) -> Result<Item, ApiError> {
        debug!("Fetching {} '{}'", self.resource.noun(), name);
        self.store
            .find_one(name)
            .await
            .map_err(|e| self.db_error(e))?
            .ok_or_else(|| ApiError::record_not_found(self.resource, name))
    }

    /// Sorted by name; an empty page is an empty list
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Item>, ApiError> {
        let page = self.pagination.page(query)?;
        debug!("Listing {} [skip={}, limit={}]", self.resource, page.skip, page.limit);
        self.store
            .find_many(page.skip, page.limit)
            .await
            .map_err(|e| self.db_error(e))
    }

    /// Validate a raw body against the patch schema and apply it
    pub async fn update(&self, name: &str, body: Value) -> Result<Item, ApiError> {
        validation::validate_patch(&body)?;
        let patch = ItemPatch::from_json(body).map_err(|e| ApiError::bad_request(e.to_string()))?;

        let updated = self
            .store
            .update(name, &patch)
            .await
            .map_err(|e| self.db_error(e))?
            .ok_or_else(|| ApiError::record_not_found(self.resource, name))?;
        info!("Updated {} '{}'", self.resource.noun(), name);
        Ok(updated)
    }

    pub async fn delete(&self, name: &str) -> Result<Item, ApiError> {
        let deleted = self
            .store
            .remove(name)
            .await
            .map_err(|e| self.db_error(e))?
            .ok_or_else(|| ApiError::record_not_found(self.resource, name))?;
        info!("Deleted {} '{}'", self.resource.noun(), name);
        Ok(deleted)
    }

    pub async fn group_count(&self) -> Result<Vec<GroupCount>, ApiError> {
        self.store.count_by_group().await.map_err(|e| self.db_error(e))
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.store.ping().await
    }

    fn db_error(&self, err: DatabaseError) -> ApiError {
        ApiError::from_database(self.resource, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryItemStore;
    use axum::http::StatusCode;
    use serde_json::json;

    fn service() -> ItemService {
        ItemService::new(
            Resource::Collective,
            Arc::new(MemoryItemStore::new()),
            Pagination { default_limit: 2, max_limit: 5 },
        )
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() {
        let svc = service();
        let body = json!({ "name": "plate", "value": 1000, "year": "3000 BC", "group": "relic" });
        let created = svc.create(body.clone()).await.unwrap();
        assert_eq!(serde_json::to_value(&created).unwrap(), body);

        let fetched = svc.get_one("plate").await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let svc = service();
        svc.create(json!({ "name": "plate", "group": "relic" })).await.unwrap();

        let err = svc.create(json!({ "name": "plate", "group": "other" })).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.title(), "Collective Already Exists");

        let kept = svc.get_one("plate").await.unwrap();
        assert_eq!(kept.group.as_deref(), Some("relic"));
    }

    #[tokio::test]
    async fn list_uses_configured_default_limit() {
        let svc = service();
        for name in ["c", "a", "b"] {
            svc.create(json!({ "name": name })).await.unwrap();
        }
        let items = svc.list(&ListQuery::default()).await.unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let svc = service();
        let err = svc.update("ghost", json!({ "group": "x" })).await.unwrap_err();
        assert_eq!(err.detail(), "No collective 'ghost' found.");
        assert_eq!(svc.delete("ghost").await.unwrap_err().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(svc.get_one("ghost").await.unwrap_err().status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_patch_is_rejected_before_storage() {
        let svc = service();
        svc.create(json!({ "name": "plate", "value": 3 })).await.unwrap();
        let err = svc.update("plate", json!({ "value": "three" })).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(svc.get_one("plate").await.unwrap().value, Some(3.into()));
    }
}
