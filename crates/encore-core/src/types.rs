//! # Domain Types
//!
//! Core domain types used throughout Encore Booking.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌──────────────────┐   │
//! │  │   CatalogItem   │  │     Booking      │  │ BookingLineItem  │   │
//! │  │  ─────────────  │  │  ──────────────  │  │  ──────────────  │   │
//! │  │  id (UUID)      │  │  id (UUID)       │  │  id (UUID)       │   │
//! │  │  name           │  │  customer info   │  │  booking_id (FK) │   │
//! │  │  price (null ⇒  │  │  subtotal/total  │  │  price snapshot  │   │
//! │  │   free event)   │  │  status          │  │  quantity        │   │
//! │  │  status, date   │  └──────────────────┘  └──────────────────┘   │
//! │  └─────────────────┘                                               │
//! │                                                                     │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌──────────────────┐   │
//! │  │ ScheduleStatus  │  │  BookingStatus   │  │  PaymentMethod   │   │
//! │  │  ─────────────  │  │  ──────────────  │  │  ──────────────  │   │
//! │  │  Scheduled      │  │  Pending         │  │  CashOnDelivery  │   │
//! │  │  Cancelled      │  │  Confirmed       │  │  Online          │   │
//! │  │  Completed      │  │  Delivered       │  └──────────────────┘   │
//! │  │  Postponed      │  │  Cancelled       │                         │
//! │  └─────────────────┘  └──────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Boundaries
//! - `CatalogItem` is created and mutated only by the external admin
//!   collaborator; this core reads it and never writes it.
//! - `LineItemRequest` is ephemeral - it exists for one request and is never
//!   persisted as such.
//! - `Booking` is write-once at creation; only the external admin workflow
//!   transitions its status afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Schedule Status
// =============================================================================

/// Lifecycle status of a catalog item (an event/schedule entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    /// Event is on the calendar and bookable.
    Scheduled,
    /// Event was called off.
    Cancelled,
    /// Event already happened.
    Completed,
    /// Event is rescheduled to an unknown date.
    Postponed,
}

impl ScheduleStatus {
    /// Whether a newly created booking may reference an item in this status.
    ///
    /// Only `Scheduled` items are bookable; cancelled, completed, and
    /// postponed items can never appear in a new booking.
    #[inline]
    pub const fn is_bookable(&self) -> bool {
        matches!(self, ScheduleStatus::Scheduled)
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Cancelled => "cancelled",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Postponed => "postponed",
        };
        f.write_str(s)
    }
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Scheduled
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A bookable event/schedule entry.
///
/// Owned and mutated only by the external admin collaborator; this core
/// treats it as a read-only source of pricing truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to customers and frozen into bookings.
    pub name: String,

    /// Price in minor units. `None` means the event is free: it contributes
    /// 0 to the subtotal but still counts toward distinct-item promotions.
    pub price_minor: Option<i64>,

    /// Lifecycle status.
    pub status: ScheduleStatus,

    /// When the event takes place.
    pub starts_at: DateTime<Utc>,

    /// When the catalog entry was created.
    pub created_at: DateTime<Utc>,

    /// When the catalog entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Returns the authoritative unit price: the listed price, or zero for
    /// free events.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.price_minor.unwrap_or(0))
    }

    /// Checks whether this item may enter a new booking.
    #[inline]
    pub fn is_bookable(&self) -> bool {
        self.status.is_bookable()
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer intends to pay.
///
/// This core records the choice and enforces the address rule for
/// cash-on-delivery; actual payment processing is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Pay in cash when tickets are delivered. Requires an address.
    CashOnDelivery,
    /// Pay through an external online channel.
    Online,
}

// =============================================================================
// Customer Info
// =============================================================================

/// Customer contact details submitted with an order.
///
/// ## Strict Schema
/// `deny_unknown_fields` rejects payloads wholesale on any unexpected field
/// instead of defensively coalescing at read time. In particular there is no
/// way to smuggle a `finalTotal` in here - totals are structurally excluded
/// from computation inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Delivery address; required when paying cash-on-delivery.
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Line Item Request
// =============================================================================

/// One requested ticket selection.
///
/// Ephemeral: exists only for the duration of one request. Carries no price -
/// every price is re-derived from the catalog store during reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemRequest {
    pub catalog_item_id: String,
    pub quantity: i64,
}

// =============================================================================
// Validated Line Item
// =============================================================================

/// A line item whose price has been frozen from the catalog.
///
/// ## Snapshot Pattern
/// `unit_price_minor` and `name_snapshot` are copied from the `CatalogItem`
/// at reconciliation time. Later catalog edits never retroactively alter a
/// persisted booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedLineItem {
    pub catalog_item_id: String,
    /// Item name at time of booking (frozen).
    pub name_snapshot: String,
    /// Unit price in minor units at time of booking (frozen).
    pub unit_price_minor: i64,
    /// Ticket quantity.
    pub quantity: i64,
}

impl ValidatedLineItem {
    /// Freezes a snapshot from a loaded catalog item.
    ///
    /// Fails if the quantity is not positive or the item is not bookable.
    /// A `None` price snapshots as 0 (free event).
    pub fn from_catalog(item: &CatalogItem, quantity: i64) -> Result<Self, CoreError> {
        crate::validation::validate_quantity(quantity)?;

        if !item.is_bookable() {
            return Err(CoreError::CatalogItemUnavailable {
                id: item.id.clone(),
                status: item.status,
            });
        }

        Ok(ValidatedLineItem {
            catalog_item_id: item.id.clone(),
            name_snapshot: item.name.clone(),
            unit_price_minor: item.unit_price().minor(),
            quantity,
        })
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_minor(self.unit_price_minor)
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Booking Status
// =============================================================================

/// The status of a booking record.
///
/// ## Legal Transitions
/// ```text
/// pending ──► confirmed ──► delivered
///    │            │
///    └────────────┴───────► cancelled   (cancellation never resurrects)
/// ```
/// Transitions are driven by the external admin workflow, never by this
/// core after the initial create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Freshly created, awaiting confirmation.
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Tickets handed over; terminal.
    Delivered,
    /// Called off; terminal.
    Cancelled,
}

impl BookingStatus {
    /// Checks whether moving to `next` is a legal transition.
    pub const fn can_transition_to(&self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Pending, BookingStatus::Cancelled)
                | (BookingStatus::Confirmed, BookingStatus::Delivered)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    /// Whether revenue reporting should count this booking.
    ///
    /// Pending bookings are never counted as revenue.
    #[inline]
    pub const fn counts_as_revenue(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Delivered)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

// =============================================================================
// Booking
// =============================================================================

/// The immutable persisted record of a completed order.
///
/// Line items are stored separately (see [`BookingLineItem`]) and fetched
/// alongside when the full record is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Booking {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub notes: Option<String>,
    /// Customer account this booking was placed under, if any.
    pub account_id: Option<String>,
    pub payment_method: PaymentMethod,
    pub subtotal_minor: i64,
    /// Description of the matched promotion rule, if one applied.
    pub promotion_description: Option<String>,
    pub discount_minor: i64,
    pub total_minor: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor(self.subtotal_minor)
    }

    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_minor)
    }
}

// =============================================================================
// Booking Line Item
// =============================================================================

/// A persisted line item in a booking.
/// Uses the snapshot pattern to freeze catalog data at time of booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BookingLineItem {
    pub id: String,
    pub booking_id: String,
    pub catalog_item_id: String,
    /// Item name at time of booking (frozen).
    pub name_snapshot: String,
    /// Unit price in minor units at time of booking (frozen).
    pub unit_price_minor: i64,
    /// Ticket quantity.
    pub quantity: i64,
    /// Line total (unit_price × quantity).
    pub line_total_minor: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
