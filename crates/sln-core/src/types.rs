//! # Domain Types
//!
//! Core domain types used throughout SLN Parts.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌──────────────────┐      │
//! │  │     Part       │  │    Invoice     │  │ SalesLedgerEntry │      │
//! │  │ ────────────── │  │ ────────────── │  │ ──────────────── │      │
//! │  │ id (UUID)      │  │ id (UUID)      │  │ id (UUID)        │      │
//! │  │ part_number    │  │ invoice_number │  │ invoice_id (FK)  │      │
//! │  │ quantity_in_   │  │ status         │  │ part snapshot    │      │
//! │  │   stock        │  │ total_cents    │  │ line_total_cents │      │
//! │  └────────────────┘  └────────────────┘  └──────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐  ┌────────────────┐  ┌──────────────────┐      │
//! │  │   Customer     │  │  CustomerTier  │  │  PaymentMethod   │      │
//! │  │ ────────────── │  │ ────────────── │  │ ──────────────── │      │
//! │  │ customer_id    │  │ Regular        │  │ Cash             │      │
//! │  │ tier           │  │ Wholesale      │  │ Card             │      │
//! │  └────────────────┘  │ Vip            │  │ Upi              │      │
//! │                      └────────────────┘  └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (part_number, customer_id, invoice_number) -
//!   human-readable, a display/lookup label, never a storage key

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8.00%, the shop's flat sales tax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Customer Tier
// =============================================================================

/// Customer classification used for tier pricing.
///
/// The discount schedule lives in [`crate::pricing`]; this type only names
/// the tiers and maps free-text tags onto them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    /// Walk-in customer, full catalog price.
    Regular,
    /// Trade/garage account, 15% off.
    Wholesale,
    /// Loyalty tier, 10% off.
    Vip,
}

impl CustomerTier {
    /// Maps a free-text tier tag to a tier.
    ///
    /// Unknown or absent tags return `None`: the caller charges full price.
    /// Silent fallback is a pricing policy decision, not a failure.
    pub fn parse_tag(tag: &str) -> Option<CustomerTier> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "regular" => Some(CustomerTier::Regular),
            "wholesale" => Some(CustomerTier::Wholesale),
            "vip" => Some(CustomerTier::Vip),
            _ => None,
        }
    }
}

impl Default for CustomerTier {
    fn default() -> Self {
        CustomerTier::Regular
    }
}

// =============================================================================
// Part
// =============================================================================

/// An auto part in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Part {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business key, unique across the catalog (e.g. "BOS-001").
    pub part_number: String,

    /// Display name shown in search results and on invoices.
    pub part_name: String,

    /// Manufacturer brand.
    pub brand: String,

    /// Free-text compatibility string (e.g. "Honda Civic 2018-2023").
    pub vehicle_compatibility: String,

    /// Category (Filters, Engine, Brakes, ...).
    pub category: String,

    /// Current on-hand quantity. Never goes negative: sales use a
    /// conditional decrement that fails instead of underflowing.
    pub quantity_in_stock: i64,

    /// Reorder threshold; below this the part counts as low stock.
    pub minimum_stock_level: i64,

    /// Base unit price in cents (before tier discounts).
    pub unit_price_cents: i64,

    /// Supplier name.
    pub supplier: Option<String>,

    /// Physical location in the shop (shelf/rack).
    pub location_in_shop: Option<String>,

    /// Whether the part is active (soft delete).
    pub is_active: bool,

    /// When the part was created.
    pub created_at: DateTime<Utc>,

    /// When the part was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// Returns the base unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Whether on-hand quantity has fallen below the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity_in_stock < self.minimum_stock_level
    }

    /// Whether the requested quantity can be fulfilled from stock.
    #[inline]
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.quantity_in_stock >= quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer account.
///
/// Invoices reference customers by `customer_id` only (weak reference,
/// no foreign key): a customer record can be removed without touching
/// historical invoices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    /// Business key (e.g. "CUST001").
    pub customer_id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Tier classification used for pricing.
    pub tier: CustomerTier,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Invoice Status
// =============================================================================

/// The status of an invoice.
///
/// `Completed` is the only reachable state: the sale coordinator writes the
/// invoice and all its sub-records in one transaction, so there is no
/// intermediate state to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Sale finalized, stock decremented, ledger written.
    Completed,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Completed
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// UPI / mobile wallet transfer.
    Upi,
}

// =============================================================================
// Invoice
// =============================================================================

/// A finalized, priced record of a sale transaction.
///
/// Immutable once created: totals are a financial point-in-time snapshot,
/// never recomputed even if catalog prices later change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: String,
    /// Human-readable display label, `INV-YYYYMMDD-XXXXXXXX`.
    /// Indexed but not unique; the uuid `id` is the storage key.
    pub invoice_number: String,
    /// Weak reference to `Customer.customer_id`, if the sale was attributed.
    pub customer_id: Option<String>,
    pub status: InvoiceStatus,
    pub subtotal_cents: i64,
    /// Tax rate applied at creation, in basis points.
    pub tax_rate_bps: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line item on an invoice.
/// Uses the snapshot pattern to freeze part data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceItem {
    pub id: String,
    pub invoice_id: String,
    /// Weak reference to `Part.id`.
    pub part_id: String,
    /// Part number at time of sale (frozen).
    pub part_number_snapshot: String,
    /// Part name at time of sale (frozen).
    pub part_name_snapshot: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl InvoiceItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Sales Ledger Entry
// =============================================================================

/// One audit row per sold line item per invoice.
///
/// Write-once, append-only: never updated or deleted by normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SalesLedgerEntry {
    pub id: String,
    pub invoice_id: String,
    /// Weak reference to `Part.id`.
    pub part_id: String,
    pub part_number: String,
    pub part_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Expense
// =============================================================================

/// A recorded business expense.
///
/// `amount` is kept as raw text: legacy imports carry occasional
/// non-numeric values, and aggregation skips what it cannot parse
/// instead of failing the whole report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub category: Option<String>,
    /// Decimal amount as entered ("20.00"). See [`Expense::amount`].
    pub amount: String,
    /// The date the expense applies to (dashboard windows filter on this).
    pub incurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Parses the stored amount, returning `None` for malformed values.
    #[inline]
    pub fn parsed_amount(&self) -> Option<Money> {
        Money::parse_decimal(&self.amount)
    }
}

// =============================================================================
// Line Item Request
// =============================================================================

/// One requested line of a sale, constructed by the caller from a cart.
///
/// Ephemeral: never persisted standalone. The unit price is the
/// tier-adjusted price resolved during cart building (see
/// `search_part_for_sale`); the coordinator validates but does not
/// re-derive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// UUID of the part being sold.
    pub part_id: String,
    /// Quantity, must be ≥ 1.
    pub quantity: i64,
    /// Unit price to charge, in cents, must be ≥ 0.
    pub unit_price_cents: i64,
}

impl LineItemRequest {
    /// Line total (quantity × unit price).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Subtotal, tax and total for a cart of line items.
///
/// Invariant: `subtotal = Σ(qty × unit_price)`,
/// `tax = round_half_up(subtotal × rate)`, `total = subtotal + tax`.
/// Computed once at sale creation and snapshotted onto the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
}

impl SaleTotals {
    /// Computes totals for a cart at the given tax rate.
    pub fn compute(items: &[LineItemRequest], rate: TaxRate) -> SaleTotals {
        let subtotal = items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.line_total());
        let tax = subtotal.calculate_tax(rate);
        let total = subtotal + tax;

        SaleTotals {
            subtotal_cents: subtotal.cents(),
            tax_cents: tax.cents(),
            total_cents: total.cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_tag() {
        assert_eq!(CustomerTier::parse_tag("wholesale"), Some(CustomerTier::Wholesale));
        assert_eq!(CustomerTier::parse_tag("VIP"), Some(CustomerTier::Vip));
        assert_eq!(CustomerTier::parse_tag(" regular "), Some(CustomerTier::Regular));
        assert_eq!(CustomerTier::parse_tag("gold"), None);
        assert_eq!(CustomerTier::parse_tag(""), None);
    }

    #[test]
    fn test_part_low_stock() {
        let part = sample_part(5, 10);
        assert!(part.is_low_stock());

        let part = sample_part(10, 10);
        assert!(!part.is_low_stock());
    }

    #[test]
    fn test_part_can_fulfill() {
        let part = sample_part(5, 10);
        assert!(part.can_fulfill(5));
        assert!(!part.can_fulfill(6));
    }

    #[test]
    fn test_sale_totals_invariant() {
        let items = vec![
            LineItemRequest {
                part_id: "a".to_string(),
                quantity: 2,
                unit_price_cents: 1250,
            },
            LineItemRequest {
                part_id: "b".to_string(),
                quantity: 4,
                unit_price_cents: 875,
            },
        ];

        let totals = SaleTotals::compute(&items, TaxRate::from_bps(800));
        // subtotal = 2*1250 + 4*875 = 6000
        assert_eq!(totals.subtotal_cents, 6000);
        // tax = 8% of 6000 = 480
        assert_eq!(totals.tax_cents, 480);
        assert_eq!(totals.total_cents, 6480);
    }

    #[test]
    fn test_sale_totals_empty_cart_is_zero() {
        let totals = SaleTotals::compute(&[], TaxRate::from_bps(800));
        assert_eq!(totals.subtotal_cents, 0);
        assert_eq!(totals.tax_cents, 0);
        assert_eq!(totals.total_cents, 0);
    }

    fn sample_part(stock: i64, min: i64) -> Part {
        let now = Utc::now();
        Part {
            id: "part-1".to_string(),
            part_number: "BOS-001".to_string(),
            part_name: "Oil Filter".to_string(),
            brand: "Bosch".to_string(),
            vehicle_compatibility: "Honda Civic 2018-2023".to_string(),
            category: "Filters".to_string(),
            quantity_in_stock: stock,
            minimum_stock_level: min,
            unit_price_cents: 1250,
            supplier: Some("AutoZone".to_string()),
            location_in_shop: Some("Shelf A1".to_string()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
