//! # Validation Module
//!
//! Request field validation for Encore Booking.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Request schema (serde)                                    │
//! │  ├── Type validation (deserialization)                              │
//! │  └── Unknown fields rejected wholesale (deny_unknown_fields)        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE: field + business rule validation             │
//! │  ├── Per-line: quantity positive                                    │
//! │  └── Post-loop, in fixed order, first failure wins:                 │
//! │      empty cart → full name → email → phone → COD address           │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL constraints                                           │
//! │  └── Foreign key constraints                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::CustomerInfo;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Customer Validators
// =============================================================================

/// Validates a customer's full name.
///
/// ## Rules
/// - Must not be blank
/// - Must be at most 200 characters
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "full name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank (reported as a missing field)
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot and no whitespace
///
/// This is deliberately a structural check, not full RFC 5322 - the goal is
/// catching obviously broken input before it is frozen into a booking.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    // Domain must have a dot that is neither leading nor trailing
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be blank (reported as a missing field)
/// - May contain digits, spaces, hyphens, parentheses, and a leading `+`
/// - Must contain 7 to 15 digits
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let mut digits = 0usize;
    for (i, c) in phone.chars().enumerate() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            '+' if i == 0 => {}
            _ => return Err(ValidationError::InvalidPhone),
        }
    }

    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

/// Validates the customer block in the order of the reconciliation contract:
/// full name, then email, then phone. First failure wins.
pub fn validate_customer(customer: &CustomerInfo) -> ValidationResult<()> {
    validate_full_name(&customer.full_name)?;
    validate_email(&customer.email)?;
    validate_phone(&customer.phone)?;
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a ticket quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free events)
pub fn validate_price_minor(minor: i64) -> ValidationResult<()> {
    if minor < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_full_name() {
        assert!(validate_full_name("Nguyen Van A").is_ok());
        assert!(validate_full_name("").is_err());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("fan@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());

        assert!(matches!(
            validate_email(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("fan@nodot").is_err());
        assert!(validate_email("fan@.com").is_err());
        assert!(validate_email("fan @example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("0912345678").is_ok());
        assert!(validate_phone("+84 91 234 5678").is_ok());
        assert!(validate_phone("(091) 234-5678").is_ok());

        assert!(matches!(
            validate_phone(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_phone("12345").is_err()); // too few digits
        assert!(validate_phone("phone-me").is_err());
        assert!(validate_phone("091+234").is_err()); // + only allowed leading
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_minor() {
        assert!(validate_price_minor(0).is_ok());
        assert!(validate_price_minor(100_000).is_ok());
        assert!(validate_price_minor(-1).is_err());
    }

    #[test]
    fn test_customer_validation_order() {
        // Both name and email are bad: name is reported first
        let customer = crate::types::CustomerInfo {
            full_name: "".to_string(),
            email: "broken".to_string(),
            phone: "".to_string(),
            address: None,
            notes: None,
        };
        let err = validate_customer(&customer).unwrap_err();
        assert!(matches!(err, ValidationError::Required { ref field } if field == "full name"));
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
