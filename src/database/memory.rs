//! In-process document store. Same contract as the PostgreSQL store; used by
//! tests and by `DATABASE_BACKEND=memory` for local runs without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::store::ItemStore;
use crate::models::{GroupCount, Item, ItemPatch};

#[derive(Default)]
pub struct MemoryItemStore {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, item: Item) -> Result<Item, DatabaseError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.name) {
            return Err(DatabaseError::Duplicate(item.name));
        }
        items.insert(item.name.clone(), item.clone());
        Ok(item)
    }

    async fn find_one(&self, name: &str) -> Result<Option<Item>, DatabaseError> {
        Ok(self.items.read().await.get(name).cloned())
    }

    async fn find_many(&self, skip: u64, limit: u64) -> Result<Vec<Item>, DatabaseError> {
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .items
            .read()
            .await
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, name: &str, patch: &ItemPatch) -> Result<Option<Item>, DatabaseError> {
        let mut items = self.items.write().await;
        let target = patch.target_name(name);
        if target != name && items.contains_key(target) {
            return Err(DatabaseError::Duplicate(target.to_string()));
        }

        let Some(mut item) = items.remove(name) else {
            return Ok(None);
        };
        patch.apply(&mut item);
        items.insert(item.name.clone(), item.clone());
        Ok(Some(item))
    }

    async fn remove(&self, name: &str) -> Result<Option<Item>, DatabaseError> {
        Ok(self.items.write().await.remove(name))
    }

    async fn count_by_group(&self) -> Result<Vec<GroupCount>, DatabaseError> {
        // Option orders None first, matching NULLS FIRST on the SQL side
        let mut counts: BTreeMap<Option<String>, i64> = BTreeMap::new();
        for item in self.items.read().await.values() {
            *counts.entry(item.group.clone()).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(group, count)| GroupCount { group, count })
            .collect())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> MemoryItemStore {
        let store = MemoryItemStore::new();
        for (name, group) in [("vase", Some("relic")), ("ball", Some("toy")), ("coin", None), ("kite", Some("toy"))] {
            let mut item = Item::named(name);
            item.group = group.map(str::to_string);
            store.insert(item).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_without_mutation() {
        let store = seeded().await;
        let err = store
            .insert(Item::named("ball").with_group("other"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Duplicate(name) if name == "ball"));

        let kept = store.find_one("ball").await.unwrap().unwrap();
        assert_eq!(kept.group.as_deref(), Some("toy"));
    }

    #[tokio::test]
    async fn find_many_sorts_and_pages() {
        let store = seeded().await;
        let names = |items: Vec<Item>| items.into_iter().map(|i| i.name).collect::<Vec<_>>();

        assert_eq!(names(store.find_many(0, 10).await.unwrap()), ["ball", "coin", "kite", "vase"]);
        assert_eq!(names(store.find_many(1, 2).await.unwrap()), ["coin", "kite"]);
        assert!(store.find_many(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_renames_and_guards_collisions() {
        let store = seeded().await;

        let patch = ItemPatch { name: Some("kite".into()), ..Default::default() };
        assert!(matches!(
            store.update("ball", &patch).await,
            Err(DatabaseError::Duplicate(_))
        ));

        let patch = ItemPatch { name: Some("yoyo".into()), ..Default::default() };
        let renamed = store.update("ball", &patch).await.unwrap().unwrap();
        assert_eq!(renamed.name, "yoyo");
        assert_eq!(renamed.group.as_deref(), Some("toy"));
        assert!(store.find_one("ball").await.unwrap().is_none());

        assert!(store.update("missing", &ItemPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn counts_groups_with_ungrouped_first() {
        let store = seeded().await;
        let counts = store.count_by_group().await.unwrap();
        assert_eq!(
            counts,
            vec![
                GroupCount { group: None, count: 1 },
                GroupCount { group: Some("relic".into()), count: 1 },
                GroupCount { group: Some("toy".into()), count: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn remove_returns_deleted_record() {
        let store = seeded().await;
        let removed = store.remove("vase").await.unwrap().unwrap();
        assert_eq!(removed.name, "vase");
        assert!(store.remove("vase").await.unwrap().is_none());
    }
}
