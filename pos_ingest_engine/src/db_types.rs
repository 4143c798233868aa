//! Data types shared between the database layer and its callers.
use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

//--------------------------------------      OrderRef       ---------------------------------------------------------

/// The natural key of a stored order, returned by a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub rest_id: String,
    pub order_id: i64,
}

impl Display for OrderRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order #{} at outlet {}", self.order_id, self.rest_id)
    }
}

//--------------------------------------    FailedPayload    ---------------------------------------------------------

/// A row in the failure-capture table. Append-only; rows are never updated
/// or deleted by the ingestion pipeline.
#[derive(Debug, Clone, FromRow)]
pub struct FailedPayload {
    pub id: i64,
    /// The original raw payload, verbatim.
    pub payload: String,
    pub error: String,
    pub created_at: DateTime<Utc>,
}
