//! # Catalog Repository
//!
//! Database operations for catalog items (events/schedule entries).
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Who Touches the Catalog                            │
//! │                                                                     │
//! │  Admin collaborator ──► insert / update_price / set_status          │
//! │                                                                     │
//! │  Checkout path ───────► get_by_id ONLY                              │
//! │    Every reconciliation re-reads current truth; no price is cached  │
//! │    across calls, so an admin price change between two sessions can  │
//! │    never silently apply stale data to an in-flight order.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use encore_core::{CatalogItem, ScheduleStatus};

/// Repository for catalog item database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a catalog item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CatalogItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<CatalogItem>> {
        let item = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, name, price_minor, status, starts_at, created_at, updated_at
            FROM catalog_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists bookable (scheduled) items, soonest first.
    pub async fn list_bookable(&self, limit: u32) -> DbResult<Vec<CatalogItem>> {
        let items = sqlx::query_as::<_, CatalogItem>(
            r#"
            SELECT id, name, price_minor, status, starts_at, created_at, updated_at
            FROM catalog_items
            WHERE status = 'scheduled'
            ORDER BY starts_at
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new catalog item.
    ///
    /// Admin-collaborator operation; the checkout path never calls this.
    pub async fn insert(&self, item: &CatalogItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting catalog item");

        sqlx::query(
            r#"
            INSERT INTO catalog_items (
                id, name, price_minor, status, starts_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_minor)
        .bind(item.status)
        .bind(item.starts_at)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an item's price. `None` marks the event free.
    ///
    /// Existing bookings are unaffected: they hold their own snapshot.
    pub async fn update_price(&self, id: &str, price_minor: Option<i64>) -> DbResult<()> {
        debug!(id = %id, price = ?price_minor, "Updating catalog item price");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items
            SET price_minor = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_minor)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        Ok(())
    }

    /// Updates an item's lifecycle status.
    pub async fn set_status(&self, id: &str, status: ScheduleStatus) -> DbResult<()> {
        debug!(id = %id, status = %status, "Updating catalog item status");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE catalog_items
            SET status = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Catalog item", id));
        }

        Ok(())
    }

    /// Counts catalog items (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM catalog_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new catalog item ID.
pub fn generate_catalog_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn item(id: &str, price: Option<i64>, status: ScheduleStatus) -> CatalogItem {
        let now = Utc::now();
        CatalogItem {
            id: id.to_string(),
            name: format!("Event {}", id),
            price_minor: price,
            status,
            starts_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&item("a", Some(100_000), ScheduleStatus::Scheduled))
            .await
            .unwrap();

        let loaded = repo.get_by_id("a").await.unwrap().unwrap();
        assert_eq!(loaded.name, "Event a");
        assert_eq!(loaded.price_minor, Some(100_000));
        assert_eq!(loaded.status, ScheduleStatus::Scheduled);

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_free_event_persists_null_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&item("free", None, ScheduleStatus::Scheduled))
            .await
            .unwrap();

        let loaded = repo.get_by_id("free").await.unwrap().unwrap();
        assert_eq!(loaded.price_minor, None);
        assert_eq!(loaded.unit_price().minor(), 0);
    }

    #[tokio::test]
    async fn test_update_price_and_status() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&item("a", Some(100_000), ScheduleStatus::Scheduled))
            .await
            .unwrap();

        repo.update_price("a", Some(150_000)).await.unwrap();
        repo.set_status("a", ScheduleStatus::Postponed).await.unwrap();

        let loaded = repo.get_by_id("a").await.unwrap().unwrap();
        assert_eq!(loaded.price_minor, Some(150_000));
        assert_eq!(loaded.status, ScheduleStatus::Postponed);
        assert!(!loaded.is_bookable());

        assert!(repo.update_price("missing", None).await.is_err());
    }

    #[tokio::test]
    async fn test_list_bookable_excludes_other_statuses() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.catalog();

        repo.insert(&item("a", Some(1), ScheduleStatus::Scheduled))
            .await
            .unwrap();
        repo.insert(&item("b", Some(1), ScheduleStatus::Cancelled))
            .await
            .unwrap();
        repo.insert(&item("c", Some(1), ScheduleStatus::Completed))
            .await
            .unwrap();

        let bookable = repo.list_bookable(10).await.unwrap();
        assert_eq!(bookable.len(), 1);
        assert_eq!(bookable[0].id, "a");
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
