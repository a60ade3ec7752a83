//! # Error Types
//!
//! Domain-specific error types for sln-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  sln-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  sln-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  sln-sales errors (separate crate)                                  │
//! │  └── SalesError       - What operation callers see                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → SalesError → caller            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (part number, ID, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Part cannot be resolved from the catalog.
    ///
    /// ## When This Occurs
    /// - Part ID or part number doesn't exist
    /// - Part was soft-deleted
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Customer reference cannot be resolved.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - The conditional stock decrement finds `quantity_in_stock` below
    ///   the requested quantity. The whole sale transaction rolls back.
    #[error("Insufficient stock for {part_number}: available {available}, requested {requested}")]
    InsufficientStock {
        part_number: String,
        available: i64,
        requested: i64,
    },

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before any write happens.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A sale was submitted with no line items.
    #[error("sale must contain at least one line item")]
    EmptyCart,

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed amount).
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
        let err = CoreError::InsufficientStock {
            part_number: "BOS-001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for BOS-001: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "part_number".to_string(),
        };
        assert_eq!(err.to_string(), "part_number is required");

        let err = ValidationError::EmptyCart;
        assert_eq!(err.to_string(), "sale must contain at least one line item");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
