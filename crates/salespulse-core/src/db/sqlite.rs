//! SQLite connection and aggregate queries

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{DailyMetrics, ProductRevenue, Transaction};

/// SQLite connection pool
#[derive(Clone)]
pub struct SqlitePool {
    pool: Pool<Sqlite>,
}

impl SqlitePool {
    /// Create a new SQLite connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    /// Run migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

/// Read-only aggregate queries over the `sales` table
#[derive(Clone)]
pub struct MetricsStore {
    pool: Pool<Sqlite>,
}

impl MetricsStore {
    /// Create a new metrics store over an existing pool
    pub fn new(pool: &SqlitePool) -> Self {
        Self {
            pool: pool.pool.clone(),
        }
    }

    /// Aggregate metrics per calendar date over the lookback window,
    /// ordered by date descending
    ///
    /// An empty table yields an empty vec, not an error; callers decide
    /// whether that is enough data to work with.
    pub async fn daily_metrics(&self, window_days: u32) -> Result<Vec<DailyMetrics>> {
        let modifier = format!("-{window_days} days");

        let rows = sqlx::query_as::<_, DailyMetrics>(
            r#"
            SELECT
                DATE(transaction_date) AS date,
                COUNT(*) AS transaction_count,
                SUM(quantity * price) AS total_revenue,
                COUNT(DISTINCT customer_id) AS unique_customers,
                AVG(quantity * price) AS avg_transaction_value
            FROM sales
            WHERE transaction_date >= DATE('now', ?1)
            GROUP BY DATE(transaction_date)
            ORDER BY date DESC
            "#,
        )
        .bind(&modifier)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Revenue per product over the lookback window, highest first
    pub async fn top_products(&self, window_days: u32, limit: u32) -> Result<Vec<ProductRevenue>> {
        let modifier = format!("-{window_days} days");

        let rows = sqlx::query_as::<_, ProductRevenue>(
            r#"
            SELECT
                product_id AS name,
                SUM(quantity * price) AS revenue
            FROM sales
            WHERE transaction_date >= DATE('now', ?1)
            GROUP BY product_id
            ORDER BY revenue DESC
            LIMIT ?2
            "#,
        )
        .bind(&modifier)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert one transaction; only used by the development seeding path
    pub async fn insert_transaction(&self, tx: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sales (customer_id, product_id, quantity, price, transaction_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&tx.customer_id)
        .bind(&tx.product_id)
        .bind(tx.quantity)
        .bind(tx.price)
        .bind(tx.transaction_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
