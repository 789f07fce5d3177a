//! # Booking Repository
//!
//! Database operations for bookings and their frozen line-item snapshots.
//!
//! ## Booking Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Booking Lifecycle                             │
//! │                                                                     │
//! │  1. CREATE (this core, exactly once)                                │
//! │     └── create_booking() → Booking { status: Pending }              │
//! │         One transaction: booking row + every line item, or nothing  │
//! │                                                                     │
//! │  2. TRANSITIONS (external admin workflow)                           │
//! │     ├── confirm()        pending   → confirmed                      │
//! │     ├── mark_delivered() confirmed → delivered                      │
//! │     └── cancel()         pending | confirmed → cancelled            │
//! │         Guards live in the WHERE clause: an illegal transition       │
//! │         simply matches zero rows. Cancellation never resurrects.    │
//! │                                                                     │
//! │  3. READS (booking history, admin listing, revenue reporting)       │
//! │     └── get_by_id / get_items / list_recent / revenue_total         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use encore_core::{
    Booking, BookingLineItem, BookingStatus, CustomerInfo, PaymentMethod, ReconciledOrder,
};

/// Repository for booking database operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Atomically persists a reconciled order as a pending booking.
    ///
    /// ## Snapshot Pattern
    /// Line-item prices are copied verbatim from the `ReconciledOrder` -
    /// this method never re-reads the catalog store, so the snapshot the
    /// reconciliation froze is exactly what lands on disk.
    ///
    /// ## Atomicity
    /// The booking row and every line item are written in one transaction.
    /// A failure anywhere rolls the whole write back; the caller never
    /// observes a partially written booking. No retry happens here - the
    /// caller resubmits the whole request if it wants one.
    pub async fn create_booking(
        &self,
        order: &ReconciledOrder,
        customer: &CustomerInfo,
        payment_method: PaymentMethod,
        account_id: Option<&str>,
    ) -> DbResult<Booking> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(
            booking_id = %id,
            lines = order.line_items.len(),
            total = order.total_minor,
            "Creating booking"
        );

        let booking = Booking {
            id: id.clone(),
            full_name: customer.full_name.trim().to_string(),
            email: customer.email.trim().to_string(),
            phone: customer.phone.trim().to_string(),
            address: customer.address.clone(),
            notes: customer.notes.clone(),
            account_id: account_id.map(str::to_string),
            payment_method,
            subtotal_minor: order.subtotal_minor,
            promotion_description: order
                .applied_promotion
                .as_ref()
                .map(|rule| rule.description.clone()),
            discount_minor: order.discount_minor,
            total_minor: order.total_minor,
            status: BookingStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, full_name, email, phone, address, notes, account_id,
                payment_method, subtotal_minor, promotion_description,
                discount_minor, total_minor, status, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(&booking.phone)
        .bind(&booking.address)
        .bind(&booking.notes)
        .bind(&booking.account_id)
        .bind(booking.payment_method)
        .bind(booking.subtotal_minor)
        .bind(&booking.promotion_description)
        .bind(booking.discount_minor)
        .bind(booking.total_minor)
        .bind(booking.status)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await?;

        for line in &order.line_items {
            sqlx::query(
                r#"
                INSERT INTO booking_items (
                    id, booking_id, catalog_item_id, name_snapshot,
                    unit_price_minor, quantity, line_total_minor, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&booking.id)
            .bind(&line.catalog_item_id)
            .bind(&line.name_snapshot)
            .bind(line.unit_price_minor)
            .bind(line.quantity)
            .bind(line.line_total().minor())
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            booking_id = %booking.id,
            subtotal = booking.subtotal_minor,
            discount = booking.discount_minor,
            total = booking.total_minor,
            "Booking created"
        );

        Ok(booking)
    }

    /// Gets a booking by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, full_name, email, phone, address, notes, account_id,
                payment_method, subtotal_minor, promotion_description,
                discount_minor, total_minor, status, created_at, updated_at
            FROM bookings
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Gets all line items for a booking, in insertion order.
    pub async fn get_items(&self, booking_id: &str) -> DbResult<Vec<BookingLineItem>> {
        let items = sqlx::query_as::<_, BookingLineItem>(
            r#"
            SELECT
                id, booking_id, catalog_item_id, name_snapshot,
                unit_price_minor, quantity, line_total_minor, created_at
            FROM booking_items
            WHERE booking_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists the most recent bookings (admin listing view).
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(
            r#"
            SELECT
                id, full_name, email, phone, address, notes, account_id,
                payment_method, subtotal_minor, promotion_description,
                discount_minor, total_minor, status, created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Confirms a pending booking (admin workflow).
    pub async fn confirm(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = 'confirmed', updated_at = ?2
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking (pending)", id));
        }

        Ok(())
    }

    /// Marks a confirmed booking as delivered (admin workflow).
    pub async fn mark_delivered(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = 'delivered', updated_at = ?2
            WHERE id = ?1 AND status = 'confirmed'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking (confirmed)", id));
        }

        Ok(())
    }

    /// Cancels a pending or confirmed booking (admin workflow).
    ///
    /// Delivered and already-cancelled bookings match zero rows:
    /// cancellation never resurrects and terminal states never move.
    pub async fn cancel(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE bookings SET status = 'cancelled', updated_at = ?2
            WHERE id = ?1 AND status IN ('pending', 'confirmed')
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Booking", id));
        }

        Ok(())
    }

    /// Total booked revenue across confirmed and delivered bookings.
    ///
    /// Pending bookings are deliberately excluded - this core makes no
    /// promise about counting them as revenue.
    pub async fn revenue_total(&self) -> DbResult<i64> {
        let total: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT SUM(total_minor)
            FROM bookings
            WHERE status IN ('confirmed', 'delivered')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total.unwrap_or(0))
    }

    /// Counts all bookings (used by tests to prove failed requests leave
    /// zero side effects).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use encore_core::{
        CatalogItem, PromotionRule, PromotionTable, ScheduleStatus, ValidatedLineItem,
    };

    fn customer() -> CustomerInfo {
        CustomerInfo {
            full_name: "Tran Thi B".to_string(),
            email: "fan@example.com".to_string(),
            phone: "0912345678".to_string(),
            address: Some("5 Trang Tien, Hanoi".to_string()),
            notes: None,
        }
    }

    fn catalog_item(id: &str, price: Option<i64>) -> CatalogItem {
        let now = Utc::now();
        CatalogItem {
            id: id.to_string(),
            name: format!("Event {}", id),
            price_minor: price,
            status: ScheduleStatus::Scheduled,
            starts_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn reconciled(lines: Vec<ValidatedLineItem>) -> ReconciledOrder {
        let table = PromotionTable::new(vec![PromotionRule::new(3, 10, "3+ events: 10% off")]);
        ReconciledOrder::compute(lines, &customer(), PaymentMethod::Online, &table).unwrap()
    }

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for (id, price) in [("a", Some(100_000)), ("b", Some(200_000)), ("c", Some(50_000))] {
            db.catalog().insert(&catalog_item(id, price)).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_create_booking_persists_everything_atomically() {
        let db = seeded_db().await;
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();
        let item_b = db.catalog().get_by_id("b").await.unwrap().unwrap();
        let item_c = db.catalog().get_by_id("c").await.unwrap().unwrap();

        let order = reconciled(vec![
            ValidatedLineItem::from_catalog(&item_a, 1).unwrap(),
            ValidatedLineItem::from_catalog(&item_b, 1).unwrap(),
            ValidatedLineItem::from_catalog(&item_c, 1).unwrap(),
        ]);

        let booking = db
            .bookings()
            .create_booking(&order, &customer(), PaymentMethod::Online, Some("acct-1"))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.subtotal_minor, 350_000);
        assert_eq!(booking.discount_minor, 35_000);
        assert_eq!(booking.total_minor, 315_000);
        assert_eq!(
            booking.promotion_description.as_deref(),
            Some("3+ events: 10% off")
        );

        let loaded = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.total_minor, 315_000);
        assert_eq!(loaded.account_id.as_deref(), Some("acct-1"));
        assert_eq!(loaded.payment_method, PaymentMethod::Online);

        let items = db.bookings().get_items(&booking.id).await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].unit_price_minor, 100_000);
        assert_eq!(items[0].line_total_minor, 100_000);
    }

    #[tokio::test]
    async fn test_snapshot_survives_catalog_price_change() {
        let db = seeded_db().await;
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();

        let order = reconciled(vec![ValidatedLineItem::from_catalog(&item_a, 2).unwrap()]);
        let booking = db
            .bookings()
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();

        // Admin doubles the price after the booking exists
        db.catalog().update_price("a", Some(200_000)).await.unwrap();

        let items = db.bookings().get_items(&booking.id).await.unwrap();
        assert_eq!(items[0].unit_price_minor, 100_000);
        assert_eq!(items[0].line_total_minor, 200_000);

        let loaded = db.bookings().get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.subtotal_minor, 200_000);
    }

    #[tokio::test]
    async fn test_status_transitions_enforced() {
        let db = seeded_db().await;
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();
        let order = reconciled(vec![ValidatedLineItem::from_catalog(&item_a, 1).unwrap()]);
        let booking = db
            .bookings()
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();
        let repo = db.bookings();

        // pending → delivered is illegal
        assert!(repo.mark_delivered(&booking.id).await.is_err());

        repo.confirm(&booking.id).await.unwrap();
        // confirming twice matches zero rows
        assert!(repo.confirm(&booking.id).await.is_err());

        repo.mark_delivered(&booking.id).await.unwrap();
        // delivered is terminal: cancellation matches zero rows
        assert!(repo.cancel(&booking.id).await.is_err());

        let loaded = repo.get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Delivered);
    }

    #[tokio::test]
    async fn test_cancellation_never_resurrects() {
        let db = seeded_db().await;
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();
        let order = reconciled(vec![ValidatedLineItem::from_catalog(&item_a, 1).unwrap()]);
        let booking = db
            .bookings()
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();
        let repo = db.bookings();

        repo.cancel(&booking.id).await.unwrap();
        assert!(repo.confirm(&booking.id).await.is_err());
        assert!(repo.cancel(&booking.id).await.is_err());

        let loaded = repo.get_by_id(&booking.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_revenue_excludes_pending_and_cancelled() {
        let db = seeded_db().await;
        let repo = db.bookings();
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();

        let order = reconciled(vec![ValidatedLineItem::from_catalog(&item_a, 1).unwrap()]);

        let pending = repo
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();
        let confirmed = repo
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();
        let cancelled = repo
            .create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();

        repo.confirm(&confirmed.id).await.unwrap();
        repo.cancel(&cancelled.id).await.unwrap();

        // Only the confirmed booking counts
        assert_eq!(repo.revenue_total().await.unwrap(), 100_000);
        assert_eq!(repo.count().await.unwrap(), 3);
        let _ = pending;
    }

    #[tokio::test]
    async fn test_list_recent() {
        let db = seeded_db().await;
        let repo = db.bookings();
        let item_a = db.catalog().get_by_id("a").await.unwrap().unwrap();
        let order = reconciled(vec![ValidatedLineItem::from_catalog(&item_a, 1).unwrap()]);

        repo.create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();
        repo.create_booking(&order, &customer(), PaymentMethod::Online, None)
            .await
            .unwrap();

        let recent = repo.list_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
    }
}
