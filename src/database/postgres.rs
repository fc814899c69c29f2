//! PostgreSQL document store: one table per resource, each record kept as a
//! JSONB document next to its unique `name` key.

use async_trait::async_trait;
use sqlx::{types::Json, PgPool, Row};
use tracing::debug;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::store::ItemStore;
use crate::models::{GroupCount, Item, ItemPatch};

pub struct PgItemStore {
    table: String,
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(table_name: &str, pool: PgPool) -> Result<Self, DatabaseError> {
        Ok(Self {
            table: DatabaseManager::quote_identifier(table_name)?,
            pool,
        })
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn insert(&self, item: Item) -> Result<Item, DatabaseError> {
        let exists = sqlx::query(&format!("SELECT 1 FROM {} WHERE name = $1", self.table))
            .bind(&item.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, &item.name))?;
        if exists.is_some() {
            return Err(DatabaseError::Duplicate(item.name));
        }

        // The unique index still guards against a concurrent insert of the same name
        let sql = format!("INSERT INTO {} (name, doc) VALUES ($1, $2) RETURNING doc", self.table);
        let Json(stored) = sqlx::query_scalar::<_, Json<Item>>(&sql)
            .bind(&item.name)
            .bind(Json(&item))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, &item.name))?;
        Ok(stored)
    }

    async fn find_one(&self, name: &str) -> Result<Option<Item>, DatabaseError> {
        let sql = format!("SELECT doc FROM {} WHERE name = $1", self.table);
        let row = sqlx::query_scalar::<_, Json<Item>>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, name))?;
        Ok(row.map(|Json(item)| item))
    }

    async fn find_many(&self, skip: u64, limit: u64) -> Result<Vec<Item>, DatabaseError> {
        let sql = format!(
            "SELECT doc FROM {} ORDER BY name COLLATE \"C\" ASC OFFSET $1 LIMIT $2",
            self.table
        );
        debug!("{} [skip={}, limit={}]", sql, skip, limit);
        let rows = sqlx::query_scalar::<_, Json<Item>>(&sql)
            .bind(to_i64(skip)?)
            .bind(to_i64(limit)?)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ""))?;
        Ok(rows.into_iter().map(|Json(item)| item).collect())
    }

    async fn update(&self, name: &str, patch: &ItemPatch) -> Result<Option<Item>, DatabaseError> {
        // `doc || patch` merges top-level keys; the key column follows a rename
        let sql = format!(
            "UPDATE {} SET doc = doc || $2::jsonb, name = COALESCE($2::jsonb->>'name', name) \
             WHERE name = $1 RETURNING doc",
            self.table
        );
        let row = sqlx::query_scalar::<_, Json<Item>>(&sql)
            .bind(name)
            .bind(Json(patch))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, patch.target_name(name)))?;
        Ok(row.map(|Json(item)| item))
    }

    async fn remove(&self, name: &str) -> Result<Option<Item>, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE name = $1 RETURNING doc", self.table);
        let row = sqlx::query_scalar::<_, Json<Item>>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, name))?;
        Ok(row.map(|Json(item)| item))
    }

    async fn count_by_group(&self) -> Result<Vec<GroupCount>, DatabaseError> {
        let sql = format!(
            "SELECT doc->>'group' COLLATE \"C\" AS grp, COUNT(*) AS count FROM {} \
             GROUP BY 1 ORDER BY 1 ASC NULLS FIRST",
            self.table
        );
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ""))?;

        rows.iter()
            .map(|row| -> Result<GroupCount, DatabaseError> {
                Ok(GroupCount {
                    group: row.try_get("grp")?,
                    count: row.try_get("count")?,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

fn to_i64(n: u64) -> Result<i64, DatabaseError> {
    i64::try_from(n).map_err(|_| DatabaseError::QueryError(format!("pagination value out of range: {}", n)))
}
