//! PostgreSQL implementation of ItemRepository.
//!
//! Updates are guarded by `version`: the `UPDATE` only matches the row the
//! caller read, and a miss is reported as `Conflict` (or `ItemNotFound` if
//! the row is gone).

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ItemId, Timestamp};
use crate::domain::item::{Item, ItemStatus};
use crate::ports::ItemRepository;

use super::{column, optional_price_column, price_column, user_column};

const SELECT_ITEM: &str = r#"
    SELECT id, name, description, price, initial_price, min_price, status,
           seller_id, buyer_id, view_count, ai_negotiation_enabled, image_url,
           created_at, updated_at, version
    FROM items
"#;

#[derive(Clone)]
pub struct PostgresItemRepository {
    pool: PgPool,
}

impl PostgresItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &ItemId) -> Result<bool, DomainError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM items WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check item existence", e))?;
        Ok(result.0)
    }
}

#[async_trait]
impl ItemRepository for PostgresItemRepository {
    async fn insert(&self, item: &Item) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO items (
                id, name, description, price, initial_price, min_price, status,
                seller_id, buyer_id, view_count, ai_negotiation_enabled, image_url,
                created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.name())
        .bind(item.description())
        .bind(item.price().amount())
        .bind(item.initial_price().amount())
        .bind(item.min_price().map(|p| p.amount()))
        .bind(item.status().as_str())
        .bind(item.seller_id().as_str())
        .bind(item.buyer_id().map(|b| b.as_str()))
        .bind(i32::try_from(item.view_count()).unwrap_or(i32::MAX))
        .bind(item.ai_negotiation_enabled())
        .bind(item.image_url())
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .bind(version_to_db(item.version()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert item", e))?;

        Ok(())
    }

    async fn update(&self, item: &Item) -> Result<Item, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE items SET
                name = $2,
                description = $3,
                price = $4,
                initial_price = $5,
                min_price = $6,
                status = $7,
                buyer_id = $8,
                ai_negotiation_enabled = $9,
                image_url = $10,
                updated_at = $11,
                version = version + 1
            WHERE id = $1 AND version = $12
            RETURNING view_count, version
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.name())
        .bind(item.description())
        .bind(item.price().amount())
        .bind(item.initial_price().amount())
        .bind(item.min_price().map(|p| p.amount()))
        .bind(item.status().as_str())
        .bind(item.buyer_id().map(|b| b.as_str()))
        .bind(item.ai_negotiation_enabled())
        .bind(item.image_url())
        .bind(item.updated_at().as_datetime())
        .bind(version_to_db(item.version()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update item", e))?;

        match row {
            Some(row) => {
                let view_count: i32 = column(&row, "view_count")?;
                let version: i64 = column(&row, "version")?;
                Ok(item
                    .clone()
                    .with_storage_state(version_from_db(version), count_from_db(view_count)))
            }
            None if self.exists(item.id()).await? => Err(DomainError::conflict(format!(
                "Item {} was modified concurrently",
                item.id()
            ))),
            None => Err(DomainError::item_not_found(item.id())),
        }
    }

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_ITEM))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch item", e))?;

        row.map(|row| row_to_item(&row)).transpose()
    }

    async fn increment_view_count(&self, id: &ItemId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE items SET view_count = view_count + 1 WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to increment view count", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::item_not_found(id));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Item>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE status <> 'deleted' ORDER BY created_at DESC, id DESC",
            SELECT_ITEM
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list items", e))?;

        rows.iter().map(row_to_item).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn version_to_db(version: u64) -> i64 {
    i64::try_from(version).unwrap_or(i64::MAX)
}

fn version_from_db(version: i64) -> u64 {
    u64::try_from(version).unwrap_or(0)
}

fn count_from_db(count: i32) -> u32 {
    u32::try_from(count).unwrap_or(0)
}

fn row_to_item(row: &PgRow) -> Result<Item, DomainError> {
    let status: String = column(row, "status")?;
    let status: ItemStatus = status.parse()?;
    let buyer_id: Option<String> = column(row, "buyer_id")?;

    Ok(Item::reconstitute(
        ItemId::from_uuid(column(row, "id")?),
        column(row, "name")?,
        column(row, "description")?,
        price_column(row, "price")?,
        price_column(row, "initial_price")?,
        optional_price_column(row, "min_price")?,
        status,
        user_column(row, "seller_id")?,
        buyer_id.map(crate::domain::foundation::UserId::new).transpose()?,
        count_from_db(column(row, "view_count")?),
        column(row, "ai_negotiation_enabled")?,
        column(row, "image_url")?,
        Timestamp::from_datetime(column(row, "created_at")?),
        Timestamp::from_datetime(column(row, "updated_at")?),
        version_from_db(column(row, "version")?),
    ))
}
