//! # Validation Module
//!
//! Input validation for SLN Parts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Caller (UI / cart builder)                                │
//! │  ├── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation, BEFORE any write  │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (SQLite)                                         │
//! │  ├── NOT NULL / UNIQUE / foreign key constraints                    │
//! │  └── conditional stock decrement (floor at zero)                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::LineItemRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a part number (business key).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use sln_core::validation::validate_part_number;
///
/// assert!(validate_part_number("BOS-001").is_ok());
/// assert!(validate_part_number("").is_err());
/// assert!(validate_part_number("has space").is_err());
/// ```
pub fn validate_part_number(part_number: &str) -> ValidationResult<()> {
    let part_number = part_number.trim();

    if part_number.is_empty() {
        return Err(ValidationError::Required {
            field: "part_number".to_string(),
        });
    }

    if part_number.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "part_number".to_string(),
            max: 50,
        });
    }

    if !part_number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "part_number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a part display name.
pub fn validate_part_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "part_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "part_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// Can be empty (returns default results). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity (must be ≥ 1).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents (non-negative; zero allowed for giveaways).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a cart of line items before any write happens.
///
/// ## Rules
/// - At least one line item
/// - Every quantity ≥ 1
/// - Every unit price ≥ 0
///
/// ## Example
/// ```rust
/// use sln_core::types::LineItemRequest;
/// use sln_core::validation::validate_line_items;
///
/// assert!(validate_line_items(&[]).is_err());
///
/// let items = vec![LineItemRequest {
///     part_id: "part-1".to_string(),
///     quantity: 2,
///     unit_price_cents: 1250,
/// }];
/// assert!(validate_line_items(&items).is_ok());
/// ```
pub fn validate_line_items(items: &[LineItemRequest]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    for item in items {
        if item.part_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "part_id".to_string(),
            });
        }
        validate_quantity(item.quantity)?;
        validate_price_cents(item.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_part_number() {
        assert!(validate_part_number("BOS-001").is_ok());
        assert!(validate_part_number("NGK_002").is_ok());

        assert!(validate_part_number("").is_err());
        assert!(validate_part_number("   ").is_err());
        assert!(validate_part_number("has space").is_err());
        assert!(validate_part_number(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_part_name() {
        assert!(validate_part_name("Oil Filter").is_ok());
        assert!(validate_part_name("").is_err());
        assert!(validate_part_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1250).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        assert!(matches!(
            validate_line_items(&[]),
            Err(ValidationError::EmptyCart)
        ));

        let good = vec![LineItemRequest {
            part_id: "part-1".to_string(),
            quantity: 2,
            unit_price_cents: 1250,
        }];
        assert!(validate_line_items(&good).is_ok());

        let zero_qty = vec![LineItemRequest {
            part_id: "part-1".to_string(),
            quantity: 0,
            unit_price_cents: 1250,
        }];
        assert!(validate_line_items(&zero_qty).is_err());

        let negative_price = vec![LineItemRequest {
            part_id: "part-1".to_string(),
            quantity: 1,
            unit_price_cents: -5,
        }];
        assert!(validate_line_items(&negative_price).is_err());

        let blank_part = vec![LineItemRequest {
            part_id: "  ".to_string(),
            quantity: 1,
            unit_price_cents: 100,
        }];
        assert!(validate_line_items(&blank_part).is_err());
    }
}
