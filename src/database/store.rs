use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::models::{GroupCount, Item, ItemPatch};

/// Document-store operations for one resource table, keyed by item name.
///
/// Implementations return `Ok(None)` for a missing record and
/// `DatabaseError::Duplicate` when a write would break name uniqueness.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fails with `Duplicate` if the name is already taken
    async fn insert(&self, item: Item) -> Result<Item, DatabaseError>;

    async fn find_one(&self, name: &str) -> Result<Option<Item>, DatabaseError>;

    /// Records ordered by name (byte order), after skipping `skip` and capped at `limit`
    async fn find_many(&self, skip: u64, limit: u64) -> Result<Vec<Item>, DatabaseError>;

    /// Apply the present patch fields and return the updated record
    async fn update(&self, name: &str, patch: &ItemPatch) -> Result<Option<Item>, DatabaseError>;

    /// Remove and return the record
    async fn remove(&self, name: &str) -> Result<Option<Item>, DatabaseError>;

    /// Record counts per `group`, ordered by group with the ungrouped bucket first
    async fn count_by_group(&self) -> Result<Vec<GroupCount>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
