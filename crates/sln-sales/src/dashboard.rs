//! # Dashboard Aggregator
//!
//! Sales, expense, and profit figures over calendar windows, plus an
//! inventory overview.
//!
//! ## Windows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Calendar Windows (UTC, half-open)                 │
//! │                                                                     │
//! │  today   [midnight, midnight + 1 day)                               │
//! │  week    [Monday 00:00, next Monday 00:00)                          │
//! │  month   [1st 00:00, 1st of next month 00:00)                       │
//! │                                                                     │
//! │  Every window includes its start instant and excludes its end,      │
//! │  so a sale at exactly Monday midnight counts toward the new week    │
//! │  and never toward two windows at once.                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales totals come from a SUM over invoices in SQL. Expense totals
//! are aggregated in Rust because amounts are stored as entered text;
//! rows that do not parse as decimal amounts are skipped with a warning
//! rather than failing the dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sln_core::{Expense, Money};
use sln_db::Database;

use crate::error::SalesResult;

// =============================================================================
// Time Windows
// =============================================================================

/// A half-open UTC time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// True when the instant falls inside the window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at < self.end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// The calendar day containing `now`.
pub fn today_window(now: DateTime<Utc>) -> TimeWindow {
    let start = midnight(now.date_naive());
    TimeWindow {
        start,
        end: start + Duration::days(1),
    }
}

/// The Monday-to-Monday week containing `now`.
pub fn week_window(now: DateTime<Utc>) -> TimeWindow {
    let monday = now.date_naive().week(Weekday::Mon).first_day();
    let start = midnight(monday);
    TimeWindow {
        start,
        end: start + Duration::days(7),
    }
}

/// The calendar month containing `now`.
pub fn month_window(now: DateTime<Utc>) -> TimeWindow {
    let date = now.date_naive();
    let start = midnight(date.with_day(1).unwrap_or(date));

    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or(date);

    TimeWindow {
        start,
        end: midnight(next_first),
    }
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// The headline figures shown on the shop dashboard, all in cents.
///
/// Invariant: each profit figure equals sales minus expenses for the
/// same window. Profit can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub today_sales_cents: i64,
    pub today_expenses_cents: i64,
    pub today_profit_cents: i64,
    pub week_sales_cents: i64,
    pub week_expenses_cents: i64,
    pub week_profit_cents: i64,
    pub month_sales_cents: i64,
    pub month_expenses_cents: i64,
    pub month_profit_cents: i64,
}

/// Stock-level summary for the inventory panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOverview {
    /// Active parts in the catalog.
    pub total_parts: i64,
    /// Active parts below their minimum stock level.
    pub low_stock_count: i64,
    /// Σ(quantity × unit price) across active parts, in cents.
    pub total_value_cents: i64,
    /// Active part counts per category, largest category first.
    pub category_counts: Vec<CategoryCount>,
}

/// One bar of the category distribution on the inventory panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Sums parsed expense amounts, skipping rows that do not parse.
fn sum_expenses(expenses: &[Expense]) -> Money {
    let mut total = Money::zero();
    for expense in expenses {
        match expense.parsed_amount() {
            Some(amount) => total += amount,
            None => {
                warn!(
                    id = %expense.id,
                    amount = %expense.amount,
                    "Skipping expense with unparseable amount"
                );
            }
        }
    }
    total
}

async fn window_figures(db: &Database, window: TimeWindow) -> SalesResult<(i64, i64)> {
    let sales = db
        .invoices()
        .sales_total_cents_between(window.start, window.end)
        .await?;

    let expenses = db.expenses().list_between(window.start, window.end).await?;
    let expense_total = sum_expenses(&expenses).cents();

    Ok((sales, expense_total))
}

/// Computes the dashboard figures for the day, week, and month
/// containing `now`.
pub async fn dashboard_stats(db: &Database, now: DateTime<Utc>) -> SalesResult<DashboardStats> {
    let today = today_window(now);
    let week = week_window(now);
    let month = month_window(now);

    let (today_sales, today_expenses) = window_figures(db, today).await?;
    let (week_sales, week_expenses) = window_figures(db, week).await?;
    let (month_sales, month_expenses) = window_figures(db, month).await?;

    debug!(
        today_sales,
        week_sales, month_sales, "Computed dashboard sales figures"
    );

    Ok(DashboardStats {
        today_sales_cents: today_sales,
        today_expenses_cents: today_expenses,
        today_profit_cents: today_sales - today_expenses,
        week_sales_cents: week_sales,
        week_expenses_cents: week_expenses,
        week_profit_cents: week_sales - week_expenses,
        month_sales_cents: month_sales,
        month_expenses_cents: month_expenses,
        month_profit_cents: month_sales - month_expenses,
    })
}

/// Computes the inventory panel figures over active parts.
pub async fn inventory_overview(db: &Database) -> SalesResult<InventoryOverview> {
    let total_parts = db.parts().count().await?;
    let low_stock_count = db.parts().low_stock().await?.len() as i64;
    let total_value_cents = db.parts().total_value_cents().await?;

    let category_counts = db
        .parts()
        .counts_by_category()
        .await?
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    Ok(InventoryOverview {
        total_parts,
        low_stock_count,
        total_value_cents,
        category_counts,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    #[test]
    fn test_today_window_bounds() {
        let now = utc(2024, 3, 15, 14, 30);
        let window = today_window(now);

        assert_eq!(window.start, utc(2024, 3, 15, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 16, 0, 0));
        assert!(window.contains(now));
        assert!(window.contains(window.start));
        assert!(!window.contains(window.end));
    }

    #[test]
    fn test_week_window_starts_monday() {
        // 2024-03-15 is a Friday; the week began Monday 2024-03-11.
        let now = utc(2024, 3, 15, 14, 30);
        let window = week_window(now);

        assert_eq!(window.start, utc(2024, 3, 11, 0, 0));
        assert_eq!(window.end, utc(2024, 3, 18, 0, 0));
    }

    #[test]
    fn test_week_window_on_monday_midnight() {
        // Exactly Monday midnight belongs to the new week.
        let monday = utc(2024, 3, 11, 0, 0);
        let window = week_window(monday);

        assert_eq!(window.start, monday);
        assert!(window.contains(monday));
    }

    #[test]
    fn test_month_window_bounds() {
        let now = utc(2024, 3, 15, 14, 30);
        let window = month_window(now);

        assert_eq!(window.start, utc(2024, 3, 1, 0, 0));
        assert_eq!(window.end, utc(2024, 4, 1, 0, 0));
    }

    #[test]
    fn test_month_window_december_rolls_to_january() {
        let now = utc(2024, 12, 20, 9, 0);
        let window = month_window(now);

        assert_eq!(window.start, utc(2024, 12, 1, 0, 0));
        assert_eq!(window.end, utc(2025, 1, 1, 0, 0));
    }

    #[test]
    fn test_week_spanning_month_boundary() {
        // 2024-04-01 is a Monday; 2024-03-30 (Saturday) is still in the
        // week that began Monday 2024-03-25.
        let now = utc(2024, 3, 30, 12, 0);
        let window = week_window(now);

        assert_eq!(window.start, utc(2024, 3, 25, 0, 0));
        assert_eq!(window.end, utc(2024, 4, 1, 0, 0));
    }

    #[test]
    fn test_sum_expenses_skips_malformed() {
        let now = Utc::now();
        let make = |amount: &str| Expense {
            id: "e".to_string(),
            category: Some("Misc".to_string()),
            description: "d".to_string(),
            amount: amount.to_string(),
            incurred_at: now,
            created_at: now,
        };

        let expenses = vec![make("20.00"), make("approx 30"), make("5.50")];
        assert_eq!(sum_expenses(&expenses), Money::from_cents(2550));
    }

    // =========================================================================
    // Database-backed aggregation tests
    // =========================================================================

    use sln_core::numbering::generate_invoice_number;
    use sln_core::{Invoice, InvoiceStatus, Part, PaymentMethod};
    use sln_db::repository::expense::generate_expense_id;
    use sln_db::repository::invoice::generate_invoice_id;
    use sln_db::repository::part::generate_part_id;
    use sln_db::{Database, DbConfig};

    async fn seed_invoice(db: &Database, total_cents: i64, created_at: DateTime<Utc>) {
        // Tax split does not matter for window sums; keep it plausible.
        let subtotal = total_cents * 100 / 108;
        let invoice = Invoice {
            id: generate_invoice_id(),
            invoice_number: generate_invoice_number(created_at.date_naive()),
            customer_id: None,
            status: InvoiceStatus::Completed,
            subtotal_cents: subtotal,
            tax_rate_bps: 800,
            tax_cents: total_cents - subtotal,
            total_cents,
            payment_method: PaymentMethod::Cash,
            notes: None,
            created_at,
        };

        let mut tx = db.begin().await.expect("begin");
        db.invoices().insert(&mut tx, &invoice).await.expect("insert invoice");
        tx.commit().await.expect("commit");
    }

    async fn seed_expense(db: &Database, amount: &str, incurred_at: DateTime<Utc>) {
        let expense = Expense {
            id: generate_expense_id(),
            category: Some("Misc".to_string()),
            description: "test expense".to_string(),
            amount: amount.to_string(),
            incurred_at,
            created_at: incurred_at,
        };
        db.expenses().insert(&expense).await.expect("insert expense");
    }

    #[tokio::test]
    async fn test_dashboard_stats_windows() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");

        // Friday 2024-03-15. Week runs Mon 03-11 .. Mon 03-18.
        let now = utc(2024, 3, 15, 12, 0);

        // Sales: 100.00 today, 150.00 Tuesday this week, 650.00 on the
        // 5th (this month, previous week), 999.00 in February (ignored).
        seed_invoice(&db, 10_000, utc(2024, 3, 15, 9, 30)).await;
        seed_invoice(&db, 15_000, utc(2024, 3, 12, 16, 0)).await;
        seed_invoice(&db, 65_000, utc(2024, 3, 5, 11, 0)).await;
        seed_invoice(&db, 99_900, utc(2024, 2, 20, 10, 0)).await;

        // Expenses: 20.00 today, 40.00 Tuesday, 240.00 on the 5th, plus
        // one legacy row today that does not parse and is skipped.
        seed_expense(&db, "20.00", utc(2024, 3, 15, 8, 0)).await;
        seed_expense(&db, "40.00", utc(2024, 3, 12, 8, 0)).await;
        seed_expense(&db, "240.00", utc(2024, 3, 5, 8, 0)).await;
        seed_expense(&db, "approx 30", utc(2024, 3, 15, 8, 5)).await;

        let stats = dashboard_stats(&db, now).await.expect("stats");

        assert_eq!(stats.today_sales_cents, 10_000);
        assert_eq!(stats.today_expenses_cents, 2_000);
        assert_eq!(stats.today_profit_cents, 8_000);

        assert_eq!(stats.week_sales_cents, 25_000);
        assert_eq!(stats.week_expenses_cents, 6_000);
        assert_eq!(stats.week_profit_cents, 19_000);

        assert_eq!(stats.month_sales_cents, 90_000);
        assert_eq!(stats.month_expenses_cents, 30_000);
        assert_eq!(stats.month_profit_cents, 60_000);
    }

    #[tokio::test]
    async fn test_dashboard_profit_can_be_negative() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");
        let now = utc(2024, 3, 15, 12, 0);

        seed_invoice(&db, 5_000, utc(2024, 3, 15, 9, 0)).await;
        seed_expense(&db, "80.00", utc(2024, 3, 15, 9, 0)).await;

        let stats = dashboard_stats(&db, now).await.expect("stats");
        assert_eq!(stats.today_profit_cents, -3_000);
    }

    #[tokio::test]
    async fn test_inventory_overview() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");
        let created = Utc::now();

        let make_part = |number: &str, category: &str, stock: i64, min: i64, price: i64| Part {
            id: generate_part_id(),
            part_number: number.to_string(),
            part_name: "Part".to_string(),
            brand: "Bosch".to_string(),
            vehicle_compatibility: "Universal".to_string(),
            category: category.to_string(),
            quantity_in_stock: stock,
            minimum_stock_level: min,
            unit_price_cents: price,
            supplier: None,
            location_in_shop: None,
            is_active: true,
            created_at: created,
            updated_at: created,
        };

        // Two filters (one below its minimum of 10) and one ignition part.
        db.parts()
            .insert(&make_part("BOS-001", "Filters", 25, 10, 1250))
            .await
            .unwrap();
        db.parts()
            .insert(&make_part("NGK-002", "Ignition", 4, 10, 875))
            .await
            .unwrap();
        db.parts()
            .insert(&make_part("BOS-003", "Filters", 12, 5, 2200))
            .await
            .unwrap();

        let overview = inventory_overview(&db).await.expect("overview");
        assert_eq!(overview.total_parts, 3);
        assert_eq!(overview.low_stock_count, 1);
        assert_eq!(
            overview.total_value_cents,
            25 * 1250 + 4 * 875 + 12 * 2200
        );
        assert_eq!(
            overview.category_counts,
            vec![
                CategoryCount {
                    category: "Filters".to_string(),
                    count: 2,
                },
                CategoryCount {
                    category: "Ignition".to_string(),
                    count: 1,
                },
            ]
        );
    }
}
