//! # Checkout Reconciliation
//!
//! Turns frozen line-item snapshots into an authoritative order total.
//!
//! ## Reconciliation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Order Reconciliation                           │
//! │                                                                     │
//! │  Caller line items            Catalog store (authoritative)         │
//! │  [{id, qty}, ...]   ──load──► CatalogItem {price, status, name}     │
//! │        │                           │                                │
//! │        │          ┌────────────────┘                                │
//! │        ▼          ▼                                                 │
//! │  ValidatedLineItem::from_catalog  (status check + price snapshot)   │
//! │        │                                                            │
//! │        ▼                                                            │
//! │  ReconciledOrder::compute  ◄── THIS MODULE                          │
//! │        ├── subtotal = Σ unit_price × qty                            │
//! │        ├── post-loop validation (first failure wins):               │
//! │        │     empty cart → name → email → phone → COD address        │
//! │        ├── distinct count = unique catalog item ids                 │
//! │        ├── promotion table ──► best tier or none                    │
//! │        └── total = max(0, subtotal − discount)                      │
//! │                                                                     │
//! │  Caller-supplied totals NEVER appear here - the input type has      │
//! │  no field for them.                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subtotal, distinct count, and discount are all commutative over line-item
//! order: reordering the request never changes the computed totals.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::promotion::{PromotionRule, PromotionTable};
use crate::types::{CustomerInfo, PaymentMethod, ValidatedLineItem};
use crate::validation::validate_customer;
use crate::MAX_ORDER_LINES;

// =============================================================================
// Reconciled Order
// =============================================================================

/// The authoritative result of reconciling one order request.
///
/// Every monetary field was re-derived from the catalog store; nothing here
/// came from the caller. This value object is what Booking Persistence
/// copies verbatim - it never re-reads the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledOrder {
    /// Frozen line-item snapshots, in request order.
    pub line_items: Vec<ValidatedLineItem>,

    /// Sum of line totals, in minor units.
    pub subtotal_minor: i64,

    /// The matched promotion rule, or `None` when no tier qualified.
    pub applied_promotion: Option<PromotionRule>,

    /// Discount in minor units, rounded half up, applied once to the
    /// whole subtotal.
    pub discount_minor: i64,

    /// `max(0, subtotal − discount)`.
    pub total_minor: i64,

    /// Summed ticket quantity across all line items.
    pub total_ticket_count: i64,

    /// Number of unique catalog items referenced (promotion input).
    pub distinct_item_count: u32,
}

impl ReconciledOrder {
    /// Computes authoritative totals from frozen snapshots.
    ///
    /// ## Validation Order (first failure wins)
    /// 1. line-item count cap
    /// 2. empty cart (no lines / zero tickets)
    /// 3. customer full name, email, phone
    /// 4. address present when paying cash-on-delivery
    ///
    /// Pure and deterministic: no I/O, no mutation of any catalog state.
    pub fn compute(
        line_items: Vec<ValidatedLineItem>,
        customer: &CustomerInfo,
        payment_method: PaymentMethod,
        promotions: &PromotionTable,
    ) -> CoreResult<ReconciledOrder> {
        if line_items.len() > MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }

        let mut subtotal = Money::zero();
        let mut total_ticket_count: i64 = 0;
        let mut distinct_ids: HashSet<&str> = HashSet::new();

        for item in &line_items {
            subtotal += item.line_total();
            total_ticket_count += item.quantity;
            distinct_ids.insert(item.catalog_item_id.as_str());
        }

        // Post-loop validation, in contract order
        if line_items.is_empty() || total_ticket_count == 0 {
            return Err(CoreError::EmptyCart);
        }

        validate_customer(customer)?;

        if payment_method == PaymentMethod::CashOnDelivery {
            let has_address = customer
                .address
                .as_deref()
                .is_some_and(|a| !a.trim().is_empty());
            if !has_address {
                return Err(CoreError::AddressRequired);
            }
        }

        // Promotion step: distinct items, not summed quantity
        let distinct_item_count = distinct_ids.len() as u32;
        let applied_promotion = promotions.evaluate(distinct_item_count).cloned();

        let discount = applied_promotion
            .as_ref()
            .map_or(Money::zero(), |rule| subtotal.percentage(rule.discount_percent));
        let total = subtotal.saturating_sub_zero(discount);

        Ok(ReconciledOrder {
            line_items,
            subtotal_minor: subtotal.minor(),
            applied_promotion,
            discount_minor: discount.minor(),
            total_minor: total.minor(),
            total_ticket_count,
            distinct_item_count,
        })
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor(self.subtotal_minor)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_minor(self.discount_minor)
    }

    /// Returns the final total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor(self.total_minor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CatalogItem, ScheduleStatus};
    use chrono::Utc;

    fn item(id: &str, price: Option<i64>) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Event {}", id),
            price_minor: price,
            status: ScheduleStatus::Scheduled,
            starts_at: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn line(id: &str, price: Option<i64>, qty: i64) -> ValidatedLineItem {
        ValidatedLineItem::from_catalog(&item(id, price), qty).unwrap()
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            full_name: "Nguyen Van A".to_string(),
            email: "fan@example.com".to_string(),
            phone: "0912345678".to_string(),
            address: Some("12 Ly Thuong Kiet, Hanoi".to_string()),
            notes: None,
        }
    }

    fn table() -> PromotionTable {
        PromotionTable::new(vec![
            PromotionRule::new(3, 10, "3+ events: 10% off"),
            PromotionRule::new(4, 15, "4+ events: 15% off"),
        ])
    }

    #[test]
    fn test_single_item_multiple_tickets_gets_no_discount() {
        // One distinct item at quantity 2: below every tier
        let order = ReconciledOrder::compute(
            vec![line("a", Some(100_000), 2)],
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap();

        assert_eq!(order.subtotal_minor, 200_000);
        assert_eq!(order.discount_minor, 0);
        assert_eq!(order.total_minor, 200_000);
        assert_eq!(order.distinct_item_count, 1);
        assert_eq!(order.total_ticket_count, 2);
        assert!(order.applied_promotion.is_none());
    }

    #[test]
    fn test_three_distinct_items_get_ten_percent() {
        let order = ReconciledOrder::compute(
            vec![
                line("a", Some(100_000), 1),
                line("b", Some(200_000), 1),
                line("c", Some(50_000), 1),
            ],
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap();

        assert_eq!(order.subtotal_minor, 350_000);
        assert_eq!(order.discount_minor, 35_000);
        assert_eq!(order.total_minor, 315_000);
        assert_eq!(
            order.applied_promotion.unwrap().description,
            "3+ events: 10% off"
        );
    }

    #[test]
    fn test_four_distinct_items_take_the_higher_tier() {
        let order = ReconciledOrder::compute(
            vec![
                line("a", Some(100_000), 1),
                line("b", Some(100_000), 1),
                line("c", Some(100_000), 1),
                line("d", Some(100_000), 1),
            ],
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap();

        assert_eq!(order.discount_minor, 60_000); // 15%, not 10%
        assert_eq!(order.total_minor, 340_000);
    }

    #[test]
    fn test_free_event_counts_toward_distinct_items() {
        let order = ReconciledOrder::compute(
            vec![
                line("a", Some(100_000), 1),
                line("b", Some(200_000), 1),
                line("free", None, 1),
            ],
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap();

        // Free event adds nothing to the subtotal but makes count 3
        assert_eq!(order.subtotal_minor, 300_000);
        assert_eq!(order.distinct_item_count, 3);
        assert_eq!(order.discount_minor, 30_000);
    }

    #[test]
    fn test_duplicate_item_ids_count_once() {
        let order = ReconciledOrder::compute(
            vec![
                line("a", Some(100_000), 1),
                line("a", Some(100_000), 2),
                line("b", Some(100_000), 1),
            ],
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap();

        assert_eq!(order.distinct_item_count, 2);
        assert_eq!(order.total_ticket_count, 4);
        assert!(order.applied_promotion.is_none());
    }

    #[test]
    fn test_totals_invariant_under_reordering() {
        let forward = vec![
            line("a", Some(100_000), 1),
            line("b", Some(200_000), 2),
            line("c", Some(50_000), 3),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let c = customer();
        let t = table();
        let one = ReconciledOrder::compute(forward, &c, PaymentMethod::Online, &t).unwrap();
        let two = ReconciledOrder::compute(reversed, &c, PaymentMethod::Online, &t).unwrap();

        assert_eq!(one.subtotal_minor, two.subtotal_minor);
        assert_eq!(one.discount_minor, two.discount_minor);
        assert_eq!(one.total_minor, two.total_minor);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = ReconciledOrder::compute(
            Vec::new(),
            &customer(),
            PaymentMethod::Online,
            &table(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_empty_cart_reported_before_bad_customer_data() {
        let mut bad = customer();
        bad.email = "broken".to_string();

        let err =
            ReconciledOrder::compute(Vec::new(), &bad, PaymentMethod::Online, &table())
                .unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_cash_on_delivery_requires_address() {
        let mut no_address = customer();
        no_address.address = None;

        let err = ReconciledOrder::compute(
            vec![line("a", Some(100_000), 1)],
            &no_address,
            PaymentMethod::CashOnDelivery,
            &table(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::AddressRequired));

        // Blank address is as good as no address
        let mut blank = customer();
        blank.address = Some("   ".to_string());
        let err = ReconciledOrder::compute(
            vec![line("a", Some(100_000), 1)],
            &blank,
            PaymentMethod::CashOnDelivery,
            &table(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::AddressRequired));
    }

    #[test]
    fn test_online_payment_needs_no_address() {
        let mut no_address = customer();
        no_address.address = None;

        let order = ReconciledOrder::compute(
            vec![line("a", Some(100_000), 1)],
            &no_address,
            PaymentMethod::Online,
            &table(),
        );
        assert!(order.is_ok());
    }

    #[test]
    fn test_total_never_negative() {
        let t = PromotionTable::new(vec![PromotionRule::new(1, 100, "everything free")]);
        let order = ReconciledOrder::compute(
            vec![line("a", Some(99), 1)],
            &customer(),
            PaymentMethod::Online,
            &t,
        )
        .unwrap();

        assert_eq!(order.discount_minor, 99);
        assert_eq!(order.total_minor, 0);
        assert!(order.total_minor >= 0);
    }

    #[test]
    fn test_order_line_cap() {
        let lines: Vec<_> = (0..=MAX_ORDER_LINES)
            .map(|i| line(&format!("e{i}"), Some(1_000), 1))
            .collect();
        let err =
            ReconciledOrder::compute(lines, &customer(), PaymentMethod::Online, &table())
                .unwrap_err();
        assert!(matches!(err, CoreError::OrderTooLarge { .. }));
    }
}
