//! # Error Types
//!
//! Domain-specific error types for encore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  encore-core errors (this file)                                     │
//! │  ├── CoreError        - Reconciliation / business rule failures     │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  encore-db errors (separate crate)                                  │
//! │  └── DbError          - Storage operation failures                  │
//! │                                                                     │
//! │  booking-api errors (in app)                                        │
//! │  └── ApiError         - What the HTTP caller sees (serialized)      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ApiError → 400/404             │
//! │        DbError → ApiError → 500 "internal error"                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, status, field name)
//! 3. Errors are enum variants, never String
//! 4. A rejected request reports the single first rule violated,
//!    never an aggregated multi-error response

use thiserror::Error;

use crate::types::ScheduleStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Reconciliation and business rule errors.
///
/// Any of these occurring during reconciliation aborts the whole request
/// before anything is written, so no compensating transaction is ever needed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested catalog item does not exist.
    ///
    /// ## When This Occurs
    /// - The line item references an id absent from the catalog store
    /// - The item was removed by the admin collaborator mid-session
    #[error("catalog item not found: {0}")]
    CatalogItemNotFound(String),

    /// The catalog item exists but cannot be booked.
    ///
    /// Applies to every non-`scheduled` status: a cancelled, completed, or
    /// postponed event can never appear in a newly created booking.
    #[error("catalog item unavailable: {id} is {status}")]
    CatalogItemUnavailable {
        id: String,
        status: ScheduleStatus,
    },

    /// The order resolves to zero line items or zero total tickets.
    #[error("empty cart")]
    EmptyCart,

    /// Cash-on-delivery was selected but no delivery address was given.
    #[error("address required for cash-on-delivery")]
    AddressRequired,

    /// The order exceeds the maximum allowed line items.
    #[error("order cannot have more than {max} line items")]
    OrderTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when request data doesn't meet requirements.
/// Used for early validation before reconciliation math runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("missing customer field: {field}")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Email address is not structurally valid.
    #[error("invalid email")]
    InvalidEmail,

    /// Phone number is not structurally valid.
    #[error("invalid phone")]
    InvalidPhone,

    /// Invalid format (e.g., malformed UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::CatalogItemUnavailable {
            id: "ev-42".to_string(),
            status: ScheduleStatus::Postponed,
        };
        assert_eq!(
            err.to_string(),
            "catalog item unavailable: ev-42 is postponed"
        );

        assert_eq!(CoreError::EmptyCart.to_string(), "empty cart");
        assert_eq!(
            CoreError::AddressRequired.to_string(),
            "address required for cash-on-delivery"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "full name".to_string(),
        };
        assert_eq!(err.to_string(), "missing customer field: full name");

        assert_eq!(ValidationError::InvalidEmail.to_string(), "invalid email");
        assert_eq!(ValidationError::InvalidPhone.to_string(), "invalid phone");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::InvalidEmail;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        // The wrapper adds no prefix: the first violated rule is reported as-is
        assert_eq!(core_err.to_string(), "invalid email");
    }
}
