//! # Sale Transaction Coordinator
//!
//! Creates sales as a single database transaction: the invoice, its
//! line-item snapshots, the sales-ledger audit rows, and the stock
//! decrements all commit together or not at all.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       create_sale(request)                          │
//! │                                                                     │
//! │  validate line items            (empty cart, qty ≥ 1, price ≥ 0)    │
//! │  resolve customer               (when a customer_id is given)       │
//! │  resolve every part             (unknown part fails before writes)  │
//! │  compute totals                 (subtotal, tax, total)              │
//! │  generate invoice number        (INV-YYYYMMDD-XXXXXXXX)             │
//! │                                                                     │
//! │  BEGIN ───────────────────────────────────────────────────────────  │
//! │    insert invoice (completed)                                       │
//! │    for each line item:                                              │
//! │      decrement stock            (conditional, floor at zero)        │
//! │        └── short? ──► ROLLBACK, InsufficientStock                   │
//! │      insert invoice item        (part snapshot)                     │
//! │      append ledger entry                                            │
//! │  COMMIT ──────────────────────────────────────────────────────────  │
//! │                                                                     │
//! │  Dropping the transaction on any error path rolls it back.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit prices arrive on the request already tier-adjusted (see
//! [`crate::catalog::search_part_for_sale`]); the coordinator validates
//! them but charges what the cart says.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sln_core::{
    numbering::generate_invoice_number, validation::validate_line_items, CoreError, Invoice,
    InvoiceItem, InvoiceStatus, LineItemRequest, Part, PaymentMethod, SaleTotals,
    SalesLedgerEntry, TaxRate, DEFAULT_TAX_RATE_BPS,
};
use sln_db::repository::invoice::{
    generate_invoice_id, generate_invoice_item_id, generate_ledger_entry_id,
};
use sln_db::Database;

use crate::error::SalesResult;

// =============================================================================
// Request / Response Types
// =============================================================================

/// A request to record a completed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    /// Business customer ID (e.g. "CUST001"). Walk-in sales omit it.
    pub customer_id: Option<String>,
    /// Cart lines with tier-adjusted unit prices.
    pub items: Vec<LineItemRequest>,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

/// What the caller gets back after a committed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleReceipt {
    /// Invoice storage key, for later retrieval.
    pub invoice_id: String,
    /// Display label printed on the receipt.
    pub invoice_number: String,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Sale Service
// =============================================================================

/// Coordinates sale transactions against the database.
#[derive(Debug, Clone)]
pub struct SaleService {
    db: Database,
    tax_rate: TaxRate,
}

impl SaleService {
    /// Creates a service charging the default tax rate.
    pub fn new(db: Database) -> Self {
        SaleService {
            db,
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }

    /// Creates a service with an explicit tax rate.
    pub fn with_tax_rate(db: Database, tax_rate: TaxRate) -> Self {
        SaleService { db, tax_rate }
    }

    /// The tax rate applied to every sale's subtotal.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Records a completed sale.
    ///
    /// All validation and lookups run before the transaction opens, so
    /// a rejected request leaves no trace in the database. Inside the
    /// transaction a stock shortage on any line rolls back every write,
    /// including decrements already applied for earlier lines.
    pub async fn create_sale(&self, request: CreateSaleRequest) -> SalesResult<SaleReceipt> {
        validate_line_items(&request.items).map_err(CoreError::from)?;

        // Resolve the customer reference before any write. The reference
        // stored on the invoice is weak, but a dangling ID at creation
        // time is a caller error.
        if let Some(customer_id) = request.customer_id.as_deref() {
            if self
                .db
                .customers()
                .get_by_customer_id(customer_id)
                .await?
                .is_none()
            {
                return Err(CoreError::CustomerNotFound(customer_id.to_string()).into());
            }
        }

        // Resolve every part up front. Unknown or retired parts fail the
        // whole sale here, before the transaction opens; a soft-deleted
        // part is gone as far as the counter is concerned.
        let mut parts: Vec<Part> = Vec::with_capacity(request.items.len());
        for item in &request.items {
            match self.db.parts().get_by_id(&item.part_id).await? {
                Some(part) if part.is_active => parts.push(part),
                _ => return Err(CoreError::PartNotFound(item.part_id.clone()).into()),
            }
        }

        let totals = SaleTotals::compute(&request.items, self.tax_rate);
        let now = Utc::now();
        let invoice_number = generate_invoice_number(now.date_naive());
        let invoice_id = generate_invoice_id();

        let invoice = Invoice {
            id: invoice_id.clone(),
            invoice_number: invoice_number.clone(),
            customer_id: request.customer_id.clone(),
            status: InvoiceStatus::Completed,
            subtotal_cents: totals.subtotal_cents,
            tax_rate_bps: self.tax_rate.bps() as i64,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
            payment_method: request.payment_method,
            notes: request.notes.clone(),
            created_at: now,
        };

        debug!(
            invoice_number = %invoice.invoice_number,
            lines = request.items.len(),
            total_cents = totals.total_cents,
            "Opening sale transaction"
        );

        let mut tx = self.db.begin().await?;

        self.db.invoices().insert(&mut tx, &invoice).await?;

        for (item, part) in request.items.iter().zip(&parts) {
            let decremented = self
                .db
                .parts()
                .decrement_stock(&mut tx, &part.id, item.quantity)
                .await?;

            if !decremented {
                // Re-read inside the transaction so the error reports the
                // quantity that actually blocked the sale. Dropping tx
                // rolls back everything written so far.
                let available = self
                    .db
                    .parts()
                    .stock_on_hand(&mut tx, &part.id)
                    .await?
                    .unwrap_or(0);

                warn!(
                    part_number = %part.part_number,
                    available,
                    requested = item.quantity,
                    "Sale rolled back: insufficient stock"
                );

                return Err(CoreError::InsufficientStock {
                    part_number: part.part_number.clone(),
                    available,
                    requested: item.quantity,
                }
                .into());
            }

            let invoice_item = InvoiceItem {
                id: generate_invoice_item_id(),
                invoice_id: invoice_id.clone(),
                part_id: part.id.clone(),
                part_number_snapshot: part.part_number.clone(),
                part_name_snapshot: part.part_name.clone(),
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
                line_total_cents: item.line_total().cents(),
                created_at: now,
            };
            self.db.invoices().add_item(&mut tx, &invoice_item).await?;

            let entry = SalesLedgerEntry {
                id: generate_ledger_entry_id(),
                invoice_id: invoice_id.clone(),
                part_id: part.id.clone(),
                part_number: part.part_number.clone(),
                part_name: part.part_name.clone(),
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
                line_total_cents: item.line_total().cents(),
                created_at: now,
            };
            self.db.invoices().append_ledger_entry(&mut tx, &entry).await?;
        }

        tx.commit()
            .await
            .map_err(sln_db::DbError::from)?;

        info!(
            invoice_number = %invoice.invoice_number,
            total_cents = totals.total_cents,
            "Sale committed"
        );

        Ok(SaleReceipt {
            invoice_id,
            invoice_number,
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            total_cents: totals.total_cents,
        })
    }

    /// Fetches a committed invoice with its line items.
    pub async fn get_invoice(
        &self,
        invoice_id: &str,
    ) -> SalesResult<(Invoice, Vec<InvoiceItem>)> {
        let invoice = self
            .db
            .invoices()
            .get_by_id(invoice_id)
            .await?
            .ok_or_else(|| CoreError::InvoiceNotFound(invoice_id.to_string()))?;

        let items = self.db.invoices().get_items(invoice_id).await?;

        Ok((invoice, items))
    }
}

// =============================================================================
// Tests
// =============================================================================
