//! Transaction data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single sales transaction, as stored in the `sales` table
///
/// Transactions are owned by the external store; the pipeline only reads
/// them in aggregate. Writes exist solely for development seeding.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Transaction {
    /// Row identifier
    pub id: i64,

    /// Customer who made the purchase
    pub customer_id: String,

    /// Product that was purchased
    pub product_id: String,

    /// Number of units purchased
    pub quantity: i64,

    /// Unit price at time of sale
    pub price: f64,

    /// When the transaction occurred
    pub transaction_date: DateTime<Utc>,
}

impl Transaction {
    /// Total value of this transaction
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}
