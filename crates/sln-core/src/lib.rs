//! # sln-core: Pure Business Logic for SLN Parts
//!
//! The heart of the SLN Parts backend: all business rules as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      SLN Parts Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │          Presentation layer (UI, export - out of scope)       │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │          sln-sales: create_sale / search_part_for_sale /      │ │
//! │  │                     dashboard_stats                           │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │                 ★ sln-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │  ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌───────────┐          │ │
//! │  │  │  types  │ │  money  │ │ pricing  │ │ numbering │          │ │
//! │  │  │  Part   │ │  Money  │ │  tiers   │ │ INV-....  │          │ │
//! │  │  │ Invoice │ │ TaxCalc │ │          │ │           │          │ │
//! │  │  └─────────┘ └─────────┘ └──────────┘ └───────────┘          │ │
//! │  │                                                               │ │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │ │
//! │  └────────────────────────────┬──────────────────────────────────┘ │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐ │
//! │  │               sln-db: SQLite repositories                     │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Part, Customer, Invoice, ledger entries, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Customer-tier price adjustment
//! - [`numbering`] - Invoice number generation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Deterministic apart from the random invoice suffix
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: Typed errors, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod numbering;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat sales tax applied to every sale, in basis points (8%).
///
/// The original shop operates under a single fixed rate; per-part or
/// per-jurisdiction rates would hang off `Part`/config instead.
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;
