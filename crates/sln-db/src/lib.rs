//! # sln-db: Database Layer for SLN Parts
//!
//! This crate provides database access for the SLN Parts shop backend.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SLN Parts Data Flow                              │
//! │                                                                         │
//! │  Sales Operation (create_sale)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      sln-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (part.rs)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ PartRepo      │    │ 001_initial_ │  │   │
//! │  │   │ Transactions  │◄───│ InvoiceRepo   │    │  schema.sql  │  │   │
//! │  │   │ Management    │    │ CustomerRepo  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │            sln_parts.db (WAL mode, foreign keys on)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, and transactions
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (part, customer, invoice, expense)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sln_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/sln_parts.db");
//! let db = Database::new(config).await?;
//!
//! // Run migrations
//! db.run_migrations().await?;
//!
//! // Use repositories
//! let parts = db.parts().search("oil filter", 20).await?;
//!
//! // Transactional writes
//! let mut tx = db.begin().await?;
//! db.invoices().insert(&mut tx, &invoice).await?;
//! tx.commit().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::part::PartRepository;
