//! # Checkout Service
//!
//! Orchestrates one booking request end to end.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     POST /orders Flow                               │
//! │                                                                     │
//! │  CreateOrderRequest (no trusted prices, no trusted totals)          │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  1. Load every referenced catalog item (current truth)              │
//! │       ├── missing id        → 404, nothing written                  │
//! │       └── not bookable      → 400, nothing written                  │
//! │  2. ReconciledOrder::compute (pure, in encore-core)                 │
//! │       └── any rule violated → 400, nothing written                  │
//! │  3. BookingRepository::create_booking (single transaction)          │
//! │       └── storage failure   → 500, caller resubmits                 │
//! │                                                                     │
//! │  clientReportedTotal is diagnostics only: a mismatch logs a warning │
//! │  and the server total stands.                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use encore_core::{
    Booking, CoreError, CustomerInfo, LineItemRequest, PaymentMethod, PromotionTable,
    ReconciledOrder, ValidatedLineItem, MAX_ORDER_LINES,
};
use encore_db::Database;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Request Type
// =============================================================================

/// An incoming order request.
///
/// ## Strict Schema
/// `deny_unknown_fields` rejects any unexpected field wholesale. The only
/// monetary field a client may send is `clientReportedTotal`, and that one
/// is diagnostics-only - there is no path from it into any computation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub line_items: Vec<LineItemRequest>,
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethod,

    /// Total the client displayed to the customer. Compared against the
    /// server total for drift detection; never used for anything else.
    #[serde(default)]
    pub client_reported_total: Option<i64>,

    /// Customer account to attach the booking to, if logged in.
    #[serde(default)]
    pub account_id: Option<String>,
}

// =============================================================================
// Checkout Service
// =============================================================================

/// Orchestration layer between HTTP handlers, pure reconciliation, and
/// storage. Holds no per-request state.
#[derive(Clone)]
pub struct CheckoutService {
    db: Database,
    promotions: Arc<PromotionTable>,
}

impl CheckoutService {
    pub fn new(db: Database, promotions: Arc<PromotionTable>) -> Self {
        CheckoutService { db, promotions }
    }

    /// Processes one order request: reconcile, then persist atomically.
    ///
    /// Any failure before the final write leaves the store untouched; a
    /// failure during the write rolls back, so the caller can always just
    /// resubmit the whole request.
    pub async fn place_order(
        &self,
        request: CreateOrderRequest,
    ) -> ApiResult<(Booking, ReconciledOrder)> {
        debug!(
            lines = request.line_items.len(),
            payment = ?request.payment_method,
            "Processing order request"
        );

        // Cheap cap check before touching storage
        if request.line_items.len() > MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            }
            .into());
        }

        // Freeze a snapshot per line from current catalog truth. The first
        // bad line aborts the whole request.
        let catalog = self.db.catalog();
        let mut line_items = Vec::with_capacity(request.line_items.len());
        for line in &request.line_items {
            let item = catalog
                .get_by_id(&line.catalog_item_id)
                .await?
                .ok_or_else(|| CoreError::CatalogItemNotFound(line.catalog_item_id.clone()))?;

            line_items.push(ValidatedLineItem::from_catalog(&item, line.quantity)?);
        }

        let order = ReconciledOrder::compute(
            line_items,
            &request.customer,
            request.payment_method,
            &self.promotions,
        )?;

        // Drift diagnostic only; the server-derived total always stands
        if let Some(reported) = request.client_reported_total {
            if reported != order.total_minor {
                warn!(
                    client_total = reported,
                    server_total = order.total_minor,
                    "Client-reported total disagrees with server reconciliation"
                );
            }
        }

        let booking = self
            .db
            .bookings()
            .create_booking(
                &order,
                &request.customer,
                request.payment_method,
                request.account_id.as_deref(),
            )
            .await?;

        info!(
            booking_id = %booking.id,
            total = booking.total_minor,
            promotion = ?booking.promotion_description,
            "Order placed"
        );

        Ok((booking, order))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
