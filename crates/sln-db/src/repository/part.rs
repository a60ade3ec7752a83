//! # Part Repository
//!
//! Database operations for the parts catalog and the inventory ledger.
//!
//! ## Stock Decrement Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Stock Decrement Strategy                         │
//! │                                                                     │
//! │  ❌ WRONG: blind relative adjustment (stock can go negative)        │
//! │     UPDATE parts SET quantity_in_stock = quantity_in_stock - 3      │
//! │                                                                     │
//! │  ✅ CORRECT: conditional decrement (floor at zero)                  │
//! │     UPDATE parts SET quantity_in_stock = quantity_in_stock - 3      │
//! │     WHERE id = ? AND quantity_in_stock >= 3                         │
//! │                                                                     │
//! │  Zero rows affected means insufficient stock: the caller rolls      │
//! │  the whole sale transaction back. Two concurrent sales against      │
//! │  the same part serialize on the row write, so the check and the     │
//! │  decrement are one atomic step - no read-modify-write race.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use sln_core::Part;

/// Repository for part catalog and inventory operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = PartRepository::new(pool);
///
/// let part = repo.get_by_part_number("BOS-001").await?;
/// let low = repo.low_stock().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PartRepository {
    pool: SqlitePool,
}

impl PartRepository {
    /// Creates a new PartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PartRepository { pool }
    }

    /// Gets a part by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Part))` - Part found
    /// * `Ok(None)` - Part not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Part>> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            SELECT
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            FROM parts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(part)
    }

    /// Gets a part by its business key (part number).
    ///
    /// This is the catalog-lookup entry point for price/stock resolution.
    pub async fn get_by_part_number(&self, part_number: &str) -> DbResult<Option<Part>> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            SELECT
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            FROM parts
            WHERE part_number = ?1 AND is_active = 1
            "#,
        )
        .bind(part_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(part)
    }

    /// Searches parts by substring across the searchable columns.
    ///
    /// ## How It Works
    /// Case-insensitive LIKE across part_number, part_name, brand and
    /// vehicle_compatibility. Fine at shop-scale catalog sizes; an indexed
    /// full-text table would be the next step if the catalog grows.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Part>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching parts");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{}%", query);

        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            FROM parts
            WHERE is_active = 1
              AND (part_number LIKE ?1
                   OR part_name LIKE ?1
                   OR brand LIKE ?1
                   OR vehicle_compatibility LIKE ?1)
            ORDER BY part_name
            LIMIT ?2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = parts.len(), "Search returned parts");
        Ok(parts)
    }

    /// Lists active parts (no search filter), sorted by name.
    async fn list_active(&self, limit: u32) -> DbResult<Vec<Part>> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            FROM parts
            WHERE is_active = 1
            ORDER BY part_name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    /// Inserts a new part.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - part_number already exists
    pub async fn insert(&self, part: &Part) -> DbResult<()> {
        debug!(part_number = %part.part_number, "Inserting part");

        sqlx::query(
            r#"
            INSERT INTO parts (
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11, ?12,
                ?13, ?14
            )
            "#,
        )
        .bind(&part.id)
        .bind(&part.part_number)
        .bind(&part.part_name)
        .bind(&part.brand)
        .bind(&part.vehicle_compatibility)
        .bind(&part.category)
        .bind(part.quantity_in_stock)
        .bind(part.minimum_stock_level)
        .bind(part.unit_price_cents)
        .bind(&part.supplier)
        .bind(&part.location_in_shop)
        .bind(part.is_active)
        .bind(part.created_at)
        .bind(part.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing part's catalog fields.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Part doesn't exist
    pub async fn update(&self, part: &Part) -> DbResult<()> {
        debug!(id = %part.id, "Updating part");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE parts SET
                part_number = ?2,
                part_name = ?3,
                brand = ?4,
                vehicle_compatibility = ?5,
                category = ?6,
                quantity_in_stock = ?7,
                minimum_stock_level = ?8,
                unit_price_cents = ?9,
                supplier = ?10,
                location_in_shop = ?11,
                is_active = ?12,
                updated_at = ?13
            WHERE id = ?1
            "#,
        )
        .bind(&part.id)
        .bind(&part.part_number)
        .bind(&part.part_name)
        .bind(&part.brand)
        .bind(&part.vehicle_compatibility)
        .bind(&part.category)
        .bind(part.quantity_in_stock)
        .bind(part.minimum_stock_level)
        .bind(part.unit_price_cents)
        .bind(&part.supplier)
        .bind(&part.location_in_shop)
        .bind(part.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Part", &part.id));
        }

        Ok(())
    }

    /// Conditionally decrements stock inside a sale transaction.
    ///
    /// ## Contract
    /// Applies `quantity_in_stock -= quantity` only when the resulting
    /// stock stays ≥ 0. Returns `false` (and writes nothing) otherwise;
    /// the caller turns that into an insufficient-stock error and rolls
    /// the surrounding transaction back.
    pub async fn decrement_stock(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
        quantity: i64,
    ) -> DbResult<bool> {
        debug!(id = %id, quantity = %quantity, "Decrementing stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE parts
            SET
                quantity_in_stock = quantity_in_stock - ?2,
                updated_at = ?3
            WHERE id = ?1 AND quantity_in_stock >= ?2
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Reads current stock for a part inside a transaction.
    ///
    /// Used to report `available` in insufficient-stock errors under the
    /// same snapshot the failed decrement saw.
    pub async fn stock_on_hand(
        &self,
        conn: &mut SqliteConnection,
        id: &str,
    ) -> DbResult<Option<i64>> {
        let stock: Option<i64> =
            sqlx::query_scalar("SELECT quantity_in_stock FROM parts WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(stock)
    }

    /// Applies a relative stock adjustment (restocking, stocktake corrections).
    ///
    /// Unlike [`decrement_stock`](Self::decrement_stock) this has no floor:
    /// a stocktake may legitimately correct downwards past a sale that
    /// slipped through physically.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE parts
            SET
                quantity_in_stock = quantity_in_stock + ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Part", id));
        }

        Ok(())
    }

    /// Returns all active parts below their reorder threshold.
    pub async fn low_stock(&self) -> DbResult<Vec<Part>> {
        let parts = sqlx::query_as::<_, Part>(
            r#"
            SELECT
                id, part_number, part_name, brand, vehicle_compatibility,
                category, quantity_in_stock, minimum_stock_level,
                unit_price_cents, supplier, location_in_shop, is_active,
                created_at, updated_at
            FROM parts
            WHERE is_active = 1 AND quantity_in_stock < minimum_stock_level
            ORDER BY quantity_in_stock ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(parts)
    }

    /// Total inventory valuation: Σ(quantity_in_stock × unit_price_cents).
    pub async fn total_value_cents(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(quantity_in_stock * unit_price_cents), 0)
            FROM parts
            WHERE is_active = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Soft-deletes a part by setting is_active = false.
    ///
    /// ## Why Soft Delete?
    /// Historical invoices and ledger rows still reference this part.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting part");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE parts
            SET is_active = 0, updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Part", id));
        }

        Ok(())
    }

    /// Counts active parts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parts WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Active part counts per category, largest category first.
    pub async fn counts_by_category(&self) -> DbResult<Vec<(String, i64)>> {
        let counts = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT category, COUNT(*)
            FROM parts
            WHERE is_active = 1
            GROUP BY category
            ORDER BY COUNT(*) DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}

/// Helper to generate a new part ID.
pub fn generate_part_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn insert_part(db: &Database, part_number: &str, category: &str, stock: i64) -> String {
        let now = Utc::now();
        let part = Part {
            id: generate_part_id(),
            part_number: part_number.to_string(),
            part_name: format!("{} test part", part_number),
            brand: "Bosch".to_string(),
            vehicle_compatibility: "Universal".to_string(),
            category: category.to_string(),
            quantity_in_stock: stock,
            minimum_stock_level: 5,
            unit_price_cents: 1000,
            supplier: None,
            location_in_shop: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        db.parts().insert(&part).await.expect("insert part");
        part.id
    }

    #[tokio::test]
    async fn test_adjust_stock_restock_and_correction() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");
        let id = insert_part(&db, "BOS-001", "Filters", 10).await;

        // Restock.
        db.parts().adjust_stock(&id, 15).await.expect("restock");
        let part = db.parts().get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(part.quantity_in_stock, 25);

        // Stocktake corrections have no floor, unlike a sale decrement.
        db.parts().adjust_stock(&id, -30).await.expect("correction");
        let part = db.parts().get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(part.quantity_in_stock, -5);
    }

    #[tokio::test]
    async fn test_adjust_stock_unknown_part() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");

        let err = db.parts().adjust_stock("no-such-part", 5).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_counts_by_category() {
        let db = Database::new(DbConfig::in_memory()).await.expect("db");
        insert_part(&db, "BOS-001", "Filters", 25).await;
        insert_part(&db, "BOS-003", "Filters", 12).await;
        insert_part(&db, "NGK-002", "Ignition", 50).await;
        let retired = insert_part(&db, "OLD-009", "Ignition", 0).await;
        db.parts().soft_delete(&retired).await.expect("soft delete");

        let counts = db.parts().counts_by_category().await.expect("counts");
        assert_eq!(
            counts,
            vec![("Filters".to_string(), 2), ("Ignition".to_string(), 1)]
        );
    }
}
