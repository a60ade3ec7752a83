//! # Expense Repository
//!
//! Database operations for business expenses.
//!
//! Expense amounts are stored as TEXT exactly as entered. Rows imported
//! from the previous bookkeeping system are not guaranteed to parse as
//! decimal amounts; interpretation is deferred to the aggregation layer,
//! which skips malformed rows rather than failing the whole query.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use sln_core::Expense;

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Inserts an expense.
    pub async fn insert(&self, expense: &Expense) -> DbResult<()> {
        debug!(id = %expense.id, description = %expense.description, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, description, category, amount, incurred_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.description)
        .bind(&expense.category)
        .bind(&expense.amount)
        .bind(expense.incurred_at)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an expense by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Expense>> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category, amount, incurred_at, created_at
            FROM expenses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Lists expenses incurred in the half-open window [start, end).
    ///
    /// Rows are returned raw; callers parse amounts and decide what to
    /// do with ones that do not parse.
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category, amount, incurred_at, created_at
            FROM expenses
            WHERE incurred_at >= ?1 AND incurred_at < ?2
            ORDER BY incurred_at
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Counts all expenses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new expense ID.
pub fn generate_expense_id() -> String {
    Uuid::new_v4().to_string()
}
