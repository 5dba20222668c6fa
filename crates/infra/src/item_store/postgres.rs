//! Postgres-backed item store.
//!
//! One SQL statement per operation; the merge-and-revalidate step for
//! updates happens in the domain layer between a `SELECT` and an `UPDATE`
//! (last-writer-wins, no optimistic concurrency token).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use carestock_core::ItemId;
use carestock_inventory::{Item, ItemPatch, ItemType, NewItem};

use super::{BulkOutcome, ItemStore, StoreError};

const SELECT_COLUMNS: &str = "id, name, item_type, value, notes, created_at, updated_at";

/// Postgres store over the `items` table.
///
/// Cloning is cheap: the connection pool is shared.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `items` table and its index if missing. Run once at boot.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                item_type TEXT NOT NULL,
                value DOUBLE PRECISION NOT NULL,
                notes TEXT,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS items_updated_at_idx ON items (updated_at DESC)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn persist_update(&self, item: &Item) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE items
            SET name = $2, item_type = $3, value = $4, notes = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.item_type.as_str())
        .bind(item.value)
        .bind(&item.notes)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM items ORDER BY updated_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_item).collect()
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let row = sqlx::query(&format!("SELECT {SELECT_COLUMNS} FROM items WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_item).transpose()
    }

    async fn create(&self, draft: NewItem) -> Result<Item, StoreError> {
        let item = Item::create(ItemId::new(), draft, Utc::now())?;

        sqlx::query(
            r#"
            INSERT INTO items (id, name, item_type, value, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.item_type.as_str())
        .bind(item.value)
        .bind(&item.notes)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    async fn update(&self, id: &ItemId, patch: ItemPatch) -> Result<Option<Item>, StoreError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let updated = existing.apply(&patch, Utc::now())?;

        // The row can disappear between the read and the write; that counts
        // as not found, same as a miss on the initial read.
        if self.persist_update(&updated).await? {
            Ok(Some(updated))
        } else {
            Ok(None)
        }
    }

    async fn update_many(
        &self,
        updates: Vec<(ItemId, ItemPatch)>,
    ) -> Result<Vec<BulkOutcome>, StoreError> {
        let total = updates.len();
        let mut tasks = tokio::task::JoinSet::new();

        for (idx, (id, patch)) in updates.into_iter().enumerate() {
            let store = self.clone();
            tasks.spawn(async move { (idx, super::apply_one(&store, &id, patch).await) });
        }

        // Sub-updates complete in any order; outcomes go back in input order.
        let mut slots: Vec<Option<BulkOutcome>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (idx, outcome) = joined.map_err(|e| StoreError::Unavailable(e.to_string()))?;
            slots[idx] = Some(outcome?);
        }

        Ok(slots.into_iter().flatten().collect())
    }

    async fn delete(&self, id: &ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM items").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn row_to_item(row: &PgRow) -> Result<Item, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let item_type: String = row.try_get("item_type")?;
    let value: f64 = row.try_get("value")?;
    let notes: Option<String> = row.try_get("notes")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

    let item_type = match item_type.as_str() {
        "qty" => ItemType::Quantity,
        "pct" => ItemType::Percentage,
        other => {
            return Err(StoreError::Unavailable(format!(
                "unknown item_type in storage: {other}"
            )));
        }
    };

    Ok(Item {
        id: ItemId::from_uuid(id),
        name,
        item_type,
        value,
        notes,
        created_at,
        updated_at,
    })
}
