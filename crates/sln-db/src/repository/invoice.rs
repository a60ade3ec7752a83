//! # Invoice Repository
//!
//! Database operations for invoices, invoice line items, and the
//! append-only sales ledger.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Sale Write Sequence                             │
//! │                                                                     │
//! │  BEGIN TRANSACTION            (Database::begin, owned by caller)    │
//! │    │                                                                │
//! │    ├── insert(invoice)              status: completed               │
//! │    │                                                                │
//! │    ├── per line item:                                               │
//! │    │     ├── parts.decrement_stock  conditional, floor at zero      │
//! │    │     ├── add_item               snapshot row                    │
//! │    │     └── append_ledger_entry    audit row                       │
//! │    │                                                                │
//! │  COMMIT  ─ or ─  ROLLBACK on any failure                            │
//! │                                                                     │
//! │  All write methods here take &mut SqliteConnection: they only       │
//! │  ever run inside a transaction someone else owns.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use sln_core::{Invoice, InvoiceItem, SalesLedgerEntry};

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Inserts an invoice inside a transaction.
    ///
    /// Invoices are immutable once the surrounding transaction commits;
    /// there is no update method by design.
    pub async fn insert(&self, conn: &mut SqliteConnection, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, invoice_number = %invoice.invoice_number, "Inserting invoice");

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, customer_id, status,
                subtotal_cents, tax_rate_bps, tax_cents, total_cents,
                payment_method, notes, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8,
                ?9, ?10, ?11
            )
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(&invoice.customer_id)
        .bind(invoice.status)
        .bind(invoice.subtotal_cents)
        .bind(invoice.tax_rate_bps)
        .bind(invoice.tax_cents)
        .bind(invoice.total_cents)
        .bind(invoice.payment_method)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Adds a line item to an invoice inside a transaction.
    ///
    /// ## Snapshot Pattern
    /// Part details (number, name, price) are copied onto the row,
    /// preserving sale history even if the catalog changes later.
    pub async fn add_item(&self, conn: &mut SqliteConnection, item: &InvoiceItem) -> DbResult<()> {
        debug!(invoice_id = %item.invoice_id, part_id = %item.part_id, "Adding invoice item");

        sqlx::query(
            r#"
            INSERT INTO invoice_items (
                id, invoice_id, part_id,
                part_number_snapshot, part_name_snapshot,
                quantity, unit_price_cents, line_total_cents,
                created_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5,
                ?6, ?7, ?8,
                ?9
            )
            "#,
        )
        .bind(&item.id)
        .bind(&item.invoice_id)
        .bind(&item.part_id)
        .bind(&item.part_number_snapshot)
        .bind(&item.part_name_snapshot)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.line_total_cents)
        .bind(item.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Appends a sales-ledger audit row inside a transaction.
    ///
    /// Write-once: no update or delete exists for ledger rows.
    pub async fn append_ledger_entry(
        &self,
        conn: &mut SqliteConnection,
        entry: &SalesLedgerEntry,
    ) -> DbResult<()> {
        debug!(invoice_id = %entry.invoice_id, part_number = %entry.part_number, "Appending ledger entry");

        sqlx::query(
            r#"
            INSERT INTO sales_ledger (
                id, invoice_id, part_id,
                part_number, part_name,
                quantity, unit_price_cents, line_total_cents,
                created_at
            ) VALUES (
                ?1, ?2, ?3,
                ?4, ?5,
                ?6, ?7, ?8,
                ?9
            )
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.invoice_id)
        .bind(&entry.part_id)
        .bind(&entry.part_number)
        .bind(&entry.part_name)
        .bind(entry.quantity)
        .bind(entry.unit_price_cents)
        .bind(entry.line_total_cents)
        .bind(entry.created_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Gets an invoice by its storage key.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT
                id, invoice_number, customer_id, status,
                subtotal_cents, tax_rate_bps, tax_cents, total_cents,
                payment_method, notes, created_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Gets all line items for an invoice, in insertion order.
    pub async fn get_items(&self, invoice_id: &str) -> DbResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            r#"
            SELECT
                id, invoice_id, part_id,
                part_number_snapshot, part_name_snapshot,
                quantity, unit_price_cents, line_total_cents,
                created_at
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets the ledger rows written for an invoice.
    pub async fn ledger_for_invoice(&self, invoice_id: &str) -> DbResult<Vec<SalesLedgerEntry>> {
        let entries = sqlx::query_as::<_, SalesLedgerEntry>(
            r#"
            SELECT
                id, invoice_id, part_id,
                part_number, part_name,
                quantity, unit_price_cents, line_total_cents,
                created_at
            FROM sales_ledger
            WHERE invoice_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Sums invoice totals created in the half-open window [start, end).
    ///
    /// Backs the dashboard's sales figures; uses the created_at index.
    pub async fn sales_total_cents_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_cents), 0)
            FROM invoices
            WHERE created_at >= ?1 AND created_at < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Counts all invoices (for diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts all sales-ledger rows (for diagnostics and tests).
    pub async fn ledger_count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_ledger")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new invoice storage key.
pub fn generate_invoice_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new invoice-item ID.
pub fn generate_invoice_item_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a new ledger-entry ID.
pub fn generate_ledger_entry_id() -> String {
    Uuid::new_v4().to_string()
}
