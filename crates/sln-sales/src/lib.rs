//! # sln-sales: Sales Operations for SLN Parts
//!
//! This crate coordinates everything that happens at the sale counter
//! and on the shop dashboard, on top of the sln-db data layer.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sales Layer Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    SaleService (Coordinator)                     │  │
//! │  │                                                                  │  │
//! │  │  Validates carts, resolves parts and customers, then writes      │  │
//! │  │  invoice + items + ledger + stock in one SQLite transaction      │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ Catalog        │  │ Dashboard      │  │ sln-db repositories    │    │
//! │  │                │  │                │  │                        │    │
//! │  │ Tier-priced    │  │ Day/week/month │  │ PartRepository         │    │
//! │  │ part lookup    │  │ sales, expense │  │ InvoiceRepository      │    │
//! │  │ for carts      │  │ & profit       │  │ CustomerRepository     │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`sale`] - `SaleService`, the transactional sale coordinator
//! - [`catalog`] - Tier-aware part lookup for cart building
//! - [`dashboard`] - Calendar-window aggregation and inventory overview
//! - [`error`] - Sales error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod sale;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{search_part_for_sale, search_parts, PartForSale};
pub use dashboard::{
    dashboard_stats, inventory_overview, CategoryCount, DashboardStats, InventoryOverview,
    TimeWindow,
};
pub use error::{SalesError, SalesResult};
pub use sale::{CreateSaleRequest, SaleReceipt, SaleService};
