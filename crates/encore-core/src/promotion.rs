//! # Promotion Rules
//!
//! Tiered volume discounts rewarding orders that span multiple events.
//!
//! ## How Matching Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Promotion Rule Evaluation                        │
//! │                                                                     │
//! │  Rules (sorted descending by threshold):                            │
//! │    min 4 distinct ──► 15% off                                       │
//! │    min 3 distinct ──► 10% off                                       │
//! │    min 2 distinct ──►  5% off                                       │
//! │                                                                     │
//! │  Order references 3 distinct events:                                │
//! │    4 ≤ 3?  no                                                       │
//! │    3 ≤ 3?  YES ──► 10% rule wins (highest qualifying threshold)     │
//! │                                                                     │
//! │  Order references 1 event at quantity 5:                            │
//! │    distinct count = 1 (quantity does not count!) ──► no discount    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration, Not Code
//! The rule set is an injectable value passed into [`PromotionTable::new`],
//! so rules can change without redeploying reconciliation logic and unit
//! tests can pin a fixed rule set.

use serde::{Deserialize, Serialize};

// =============================================================================
// Promotion Rule
// =============================================================================

/// One volume-discount tier: a minimum distinct-item threshold paired with a
/// whole-number discount percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRule {
    /// Minimum number of distinct catalog items the order must reference.
    pub min_distinct_items: u32,

    /// Discount percentage, an integer in 0..=100, applied once to the
    /// whole subtotal.
    pub discount_percent: u32,

    /// Human-readable description frozen into the booking record.
    pub description: String,
}

impl PromotionRule {
    /// Creates a rule. Percentages above 100 are clamped: a discount can
    /// never exceed the subtotal.
    pub fn new(min_distinct_items: u32, discount_percent: u32, description: &str) -> Self {
        PromotionRule {
            min_distinct_items,
            discount_percent: discount_percent.min(100),
            description: description.to_string(),
        }
    }
}

// =============================================================================
// Promotion Table
// =============================================================================

/// An ordered set of promotion rules with best-match evaluation.
///
/// On the wire a table is a plain rule array; deserialization funnels
/// through [`PromotionTable::new`], so a table loaded from config carries
/// the same sort order and percentage clamp as one built in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<PromotionRule>", into = "Vec<PromotionRule>")]
pub struct PromotionTable {
    /// Rules sorted descending by `min_distinct_items`.
    rules: Vec<PromotionRule>,
}

impl From<Vec<PromotionRule>> for PromotionTable {
    fn from(rules: Vec<PromotionRule>) -> Self {
        PromotionTable::new(rules)
    }
}

impl From<PromotionTable> for Vec<PromotionRule> {
    fn from(table: PromotionTable) -> Self {
        table.rules
    }
}

impl PromotionTable {
    /// Builds a table from a rule set, in any order.
    ///
    /// Rules are sorted descending by threshold so evaluation returns the
    /// highest qualifying tier first.
    pub fn new(mut rules: Vec<PromotionRule>) -> Self {
        rules.sort_by(|a, b| b.min_distinct_items.cmp(&a.min_distinct_items));
        for rule in &mut rules {
            rule.discount_percent = rule.discount_percent.min(100);
        }
        PromotionTable { rules }
    }

    /// An empty table: no order ever receives a discount.
    pub fn empty() -> Self {
        PromotionTable { rules: Vec::new() }
    }

    /// The standard tier set used when no configuration is supplied.
    pub fn default_rules() -> Vec<PromotionRule> {
        vec![
            PromotionRule::new(2, 5, "2+ distinct events: 5% off"),
            PromotionRule::new(3, 10, "3+ distinct events: 10% off"),
            PromotionRule::new(4, 15, "4+ distinct events: 15% off"),
        ]
    }

    /// Selects the best-matching rule for a distinct-item count.
    ///
    /// Returns the first rule (highest threshold) whose threshold is
    /// ≤ `distinct_item_count`, or `None` when no tier qualifies.
    ///
    /// Deterministic and side-effect free; safe to call repeatedly.
    ///
    /// ## Important
    /// `distinct_item_count` counts unique catalog items in the order, not
    /// summed ticket quantity - 5 tickets for one event is still a count of 1.
    pub fn evaluate(&self, distinct_item_count: u32) -> Option<&PromotionRule> {
        self.rules
            .iter()
            .find(|rule| rule.min_distinct_items <= distinct_item_count)
    }

    /// Read access to the sorted rule set.
    pub fn rules(&self) -> &[PromotionRule] {
        &self.rules
    }
}

impl Default for PromotionTable {
    fn default() -> Self {
        PromotionTable::new(Self::default_rules())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PromotionTable {
        // Deliberately unsorted input
        PromotionTable::new(vec![
            PromotionRule::new(3, 10, "3+"),
            PromotionRule::new(4, 15, "4+"),
            PromotionRule::new(2, 5, "2+"),
        ])
    }

    #[test]
    fn test_below_every_threshold_matches_nothing() {
        let t = table();
        assert!(t.evaluate(0).is_none());
        assert!(t.evaluate(1).is_none());
    }

    #[test]
    fn test_highest_qualifying_threshold_wins() {
        let t = table();

        assert_eq!(t.evaluate(2).unwrap().discount_percent, 5);
        assert_eq!(t.evaluate(3).unwrap().discount_percent, 10);
        // 4 qualifies both the 3-item/10% and 4-item/15% rules: 15% wins
        assert_eq!(t.evaluate(4).unwrap().discount_percent, 15);
        assert_eq!(t.evaluate(40).unwrap().discount_percent, 15);
    }

    #[test]
    fn test_discount_is_monotonic_in_distinct_count() {
        let t = table();
        let mut last = 0;
        for count in 0..10 {
            let percent = t.evaluate(count).map_or(0, |r| r.discount_percent);
            assert!(
                percent >= last,
                "discount decreased at distinct count {count}"
            );
            last = percent;
        }
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let t = table();
        for _ in 0..3 {
            assert_eq!(t.evaluate(3).unwrap().description, "3+");
        }
    }

    #[test]
    fn test_empty_table_never_discounts() {
        let t = PromotionTable::empty();
        assert!(t.evaluate(100).is_none());
    }

    #[test]
    fn test_percent_clamped_to_100() {
        let t = PromotionTable::new(vec![PromotionRule::new(1, 250, "bogus")]);
        assert_eq!(t.evaluate(1).unwrap().discount_percent, 100);
    }

    #[test]
    fn test_config_round_trip() {
        let json = r#"[{"minDistinctItems":3,"discountPercent":10,"description":"3+"}]"#;
        let rules: Vec<PromotionRule> = serde_json::from_str(json).unwrap();
        let t = PromotionTable::new(rules);
        assert_eq!(t.evaluate(3).unwrap().discount_percent, 10);
    }

    #[test]
    fn test_deserialized_table_is_sorted_and_clamped() {
        // Unsorted input with an out-of-range percentage, deserialized as a
        // whole table rather than through new()
        let json = r#"[
            {"minDistinctItems":2,"discountPercent":5,"description":"2+"},
            {"minDistinctItems":4,"discountPercent":250,"description":"4+"}
        ]"#;
        let t: PromotionTable = serde_json::from_str(json).unwrap();

        assert_eq!(t.rules()[0].min_distinct_items, 4);
        assert_eq!(t.evaluate(4).unwrap().discount_percent, 100);
        assert_eq!(t.evaluate(3).unwrap().discount_percent, 5);

        // Serialization is the same plain array shape
        let back = serde_json::to_string(&t).unwrap();
        assert!(back.starts_with('['));
    }
}
