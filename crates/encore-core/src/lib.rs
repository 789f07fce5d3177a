//! # encore-core: Pure Business Logic for Encore Booking
//!
//! This crate is the **heart** of the booking engine. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Encore Booking Architecture                     │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  booking-api (Axum HTTP)                      │  │
//! │  │     POST /orders ──► GET /orders/:id ──► GET /health          │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐  │
//! │  │              ★ encore-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────────────┐  │  │
//! │  │  │  types  │ │  money  │ │ promotion │ │     checkout     │  │  │
//! │  │  │ Catalog │ │  Money  │ │ RuleTable │ │ ReconciledOrder  │  │  │
//! │  │  │ Booking │ │  (i64)  │ │ Evaluator │ │ subtotal/total   │  │  │
//! │  │  └─────────┘ └─────────┘ └───────────┘ └──────────────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └───────────────────────────────┬───────────────────────────────┘  │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐  │
//! │  │                  encore-db (Database Layer)                   │  │
//! │  │        SQLite queries, migrations, catalog + bookings         │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Booking, CustomerInfo, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`promotion`] - Tiered volume-discount rules and the evaluator
//! - [`checkout`] - Order reconciliation: snapshots, validation, totals
//! - [`error`] - Domain error types
//! - [`validation`] - Request field validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are minor units (i64), never floats
//! 4. **Server-Computed Totals**: Caller-supplied totals never enter computation;
//!    the input types make that structurally impossible
//!
//! ## Example Usage
//!
//! ```rust
//! use encore_core::money::Money;
//! use encore_core::promotion::{PromotionRule, PromotionTable};
//!
//! let table = PromotionTable::new(vec![
//!     PromotionRule::new(3, 10, "3+ events: 10% off"),
//! ]);
//!
//! // Two distinct events: no tier qualifies
//! assert!(table.evaluate(2).is_none());
//!
//! // Three distinct events: 10% off the whole subtotal, rounded half up
//! let rule = table.evaluate(3).unwrap();
//! let discount = Money::from_minor(350_000).percentage(rule.discount_percent);
//! assert_eq!(discount.minor(), 35_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use encore_core::Money` instead of
// `use encore_core::money::Money`

pub use checkout::ReconciledOrder;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use promotion::{PromotionRule, PromotionTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway requests and keeps reconciliation cheap enough that a
/// failed persistence write can simply be resubmitted.
pub const MAX_ORDER_LINES: usize = 50;

/// Maximum ticket quantity for a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
