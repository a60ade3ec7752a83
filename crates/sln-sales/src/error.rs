//! # Sales Error Types
//!
//! Error handling for sale coordination and reporting.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Sales Error Sources                         │
//! │                                                                 │
//! │  CoreError ──────────┐                                          │
//! │  (validation,        │                                          │
//! │   not-found,         ├──► SalesError ──► caller                 │
//! │   insufficient       │                                          │
//! │   stock)             │                                          │
//! │                      │                                          │
//! │  DbError ────────────┘                                          │
//! │  (query, transaction,                                           │
//! │   connection)                                                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Domain failures (unknown part, insufficient stock) surface as
//! [`SalesError::Core`] so callers can match on them; infrastructure
//! failures surface as [`SalesError::Db`].

use thiserror::Error;

use sln_core::CoreError;
use sln_db::DbError;

/// Errors from sales operations.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Domain-level failure: validation, missing entity, stock shortage.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database-level failure.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type alias for sales operations.
pub type SalesResult<T> = Result<T, SalesError>;

impl SalesError {
    /// True when the failure is a stock shortage the caller can
    /// present to the user (pick a lower quantity, restock first).
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, SalesError::Core(CoreError::InsufficientStock { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sln_core::ValidationError;

    #[test]
    fn test_core_error_converts() {
        let err: SalesError = CoreError::PartNotFound("nope".to_string()).into();
        assert!(matches!(err, SalesError::Core(_)));
    }

    #[test]
    fn test_validation_error_converts_through_core() {
        let core: CoreError = ValidationError::EmptyCart.into();
        let err: SalesError = core.into();
        assert!(matches!(
            err,
            SalesError::Core(CoreError::Validation(ValidationError::EmptyCart))
        ));
    }

    #[test]
    fn test_insufficient_stock_detection() {
        let err: SalesError = CoreError::InsufficientStock {
            part_number: "BOS-001".to_string(),
            available: 2,
            requested: 5,
        }
        .into();
        assert!(err.is_insufficient_stock());

        let other: SalesError = CoreError::PartNotFound("x".to_string()).into();
        assert!(!other.is_insufficient_stock());
    }
}
