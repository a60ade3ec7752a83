//! # Repository Module
//!
//! Database repository implementations for SLN Parts.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Sale Service                                                          │
//! │       │                                                                 │
//! │       │  db.parts().search("oil filter")                               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  PartRepository                                                        │
//! │  ├── search(&self, query, limit)                                       │
//! │  ├── get_by_part_number(&self, number)                                 │
//! │  ├── insert(&self, part)                                               │
//! │  └── decrement_stock(&self, conn, id, qty)                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory SQLite)                                     │
//! │  • SQL is isolated in one place                                        │
//! │  • Transaction-scoped writes take &mut SqliteConnection                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`PartRepository`] - Parts catalog CRUD, search, and stock movements
//! - [`CustomerRepository`] - Customer lookup and tier management
//! - [`InvoiceRepository`] - Invoices, line items, and the sales ledger
//! - [`ExpenseRepository`] - Business expenses

pub mod customer;
pub mod expense;
pub mod invoice;
pub mod part;

pub use customer::CustomerRepository;
pub use expense::ExpenseRepository;
pub use invoice::InvoiceRepository;
pub use part::PartRepository;
