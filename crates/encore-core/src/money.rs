//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer minor units (i64)                            │
//! │    Every price, subtotal, discount and total in the system is an    │
//! │    integer. Rounding happens exactly once, in one documented place  │
//! │    (the whole-subtotal percentage discount), never per line item.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use encore_core::money::Money;
//!
//! let price = Money::from_minor(100_000);
//!
//! // Arithmetic operations
//! let line = price * 2;
//! let total = line + Money::from_minor(50_000);
//! assert_eq!(total.minor(), 250_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Intermediate subtraction may dip below zero before the
///   final clamp; the type does not forbid it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a ticket quantity.
    ///
    /// ## Example
    /// ```rust
    /// use encore_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(100_000);
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.minor(), 200_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes a whole-number percentage of this amount, rounded half up.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────┐
    /// │  percentage = (amount * percent + 50) / 100                     │
    /// │                                                                 │
    /// │  The +50 rounds the result half up. This is THE rounding rule   │
    /// │  of the system: applied once to the whole subtotal when a       │
    /// │  promotion matches, never accumulated per line item, so two     │
    /// │  reconciliations of the same order always agree to the unit.    │
    /// └─────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use encore_core::money::Money;
    ///
    /// let subtotal = Money::from_minor(350_000);
    /// assert_eq!(subtotal.percentage(10).minor(), 35_000);
    ///
    /// // 15 * 15% = 2.25 → rounds half up to 2
    /// assert_eq!(Money::from_minor(15).percentage(15).minor(), 2);
    /// ```
    pub fn percentage(&self, percent: u32) -> Money {
        // Use i128 to prevent overflow on large amounts
        let amount = (self.0 as i128 * percent as i128 + 50) / 100;
        Money::from_minor(amount as i64)
    }

    /// Subtracts `other`, clamping the result at zero.
    ///
    /// Used for the final total: a discount can never push a total negative.
    #[inline]
    pub fn saturating_sub_zero(&self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows the raw minor-unit amount.
///
/// ## Note
/// This is for logs and debugging. Currency formatting is a presentation
/// concern and lives with the consumers of the API.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
