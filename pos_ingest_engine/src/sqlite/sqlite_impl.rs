//! `SqliteDatabase` is the concrete storage backend for the ingestion
//! engine.
//!
//! It wraps a connection pool and exposes exactly two operations the worker
//! needs: the transactional order write and the best-effort failure capture.
use std::fmt::Debug;

use log::*;
use serde_json::Value;
use sqlx::{SqliteConnection, SqlitePool};

use super::{
    db::{self, adjustments, customers, failed_payloads, line_items, orders, restaurants},
    errors::WriteError,
};
use crate::{
    db_types::OrderRef,
    webhook_types::{Properties, WebhookPayload},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = db::new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for the worker's in-flight connection to be released before
    /// closing, so call this only after the worker has stopped.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Maps one validated payload onto the normalized schema in a single
    /// atomic transaction.
    ///
    /// Every step is idempotent under re-delivery: restaurant, order,
    /// adjustment, item, addon and part-payment rows conflict-skip on their
    /// natural keys, while the customer row refreshes name and address. Any
    /// unexpected failure rolls the whole graph back; no partial order is
    /// ever committed.
    pub async fn insert_order(&self, payload: &WebhookPayload) -> Result<OrderRef, WriteError> {
        let props = payload.properties.as_ref().ok_or(WriteError::MissingSection("properties"))?;
        let restaurant = props.restaurant.as_ref().ok_or(WriteError::MissingSection("Restaurant"))?;
        let order = props.order.as_ref().ok_or(WriteError::MissingSection("Order"))?;
        props.customer.as_ref().ok_or(WriteError::MissingSection("Customer"))?;

        // Fail fast on the keys everything else hangs off, before a
        // connection is even acquired.
        let rest_id = restaurant
            .rest_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(WriteError::InvalidKey("restID"))?;
        let order_id = order.order_id.as_i64().ok_or(WriteError::InvalidKey("orderID"))?;

        let mut tx = self.pool.begin().await?;
        match write_order_graph(order_id, rest_id, props, &mut tx).await {
            Ok(()) => {
                tx.commit().await?;
                debug!("🗃️ Insert complete | outlet={rest_id} | order={order_id}");
                Ok(OrderRef { rest_id: rest_id.to_string(), order_id })
            },
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("🗃️ Rollback failed after write error: {rollback_err}");
                }
                Err(e)
            },
        }
    }

    /// Best-effort capture of a payload that could not be validated or
    /// inserted, on its own pooled connection.
    ///
    /// This is the last line of defence against silent data loss, so it
    /// never propagates an error; if the capture itself fails, the loss is
    /// logged and accepted.
    pub async fn capture_failed_payload(&self, raw: &Value, reason: &str) {
        let result = async {
            let mut conn = self.pool.acquire().await?;
            failed_payloads::insert_failed_payload(raw, reason, &mut conn).await
        }
        .await;
        match result {
            Ok(()) => warn!("🗃️ Saved failed payload for later inspection"),
            Err(e) => error!("🗃️ Could not save failed payload: {e}"),
        }
    }
}

/// The fixed upsert sequence. Parents go first so that every child row's
/// foreign key references a row inserted earlier in the same transaction.
async fn write_order_graph(
    order_id: i64,
    rest_id: &str,
    props: &Properties,
    conn: &mut SqliteConnection,
) -> Result<(), WriteError> {
    let restaurant = props.restaurant.as_ref().ok_or(WriteError::MissingSection("Restaurant"))?;
    let customer = props.customer.as_ref().ok_or(WriteError::MissingSection("Customer"))?;
    let order = props.order.as_ref().ok_or(WriteError::MissingSection("Order"))?;

    restaurants::upsert_restaurant(rest_id, restaurant, &mut *conn).await?;

    let customer_id = customers::upsert_customer(customer, &mut *conn).await?;
    trace!("🗃️ Customer resolved to id {customer_id}");

    orders::insert_order(order_id, rest_id, customer_id, order, &mut *conn).await?;

    for tax in props.taxes.as_deref().unwrap_or_default() {
        adjustments::insert_tax(order_id, rest_id, tax, &mut *conn).await?;
    }
    for discount in props.discounts.as_deref().unwrap_or_default() {
        adjustments::insert_discount(order_id, rest_id, discount, &mut *conn).await?;
    }

    for item in props.order_items.as_deref().unwrap_or_default() {
        let item_id = item.itemid.as_i64();
        line_items::insert_order_item(item_id, order_id, rest_id, item, &mut *conn).await?;
        for addon in &item.addons {
            line_items::insert_addon(addon, item_id, order_id, rest_id, &mut *conn).await?;
        }
    }

    for payment in &order.part_payments {
        orders::insert_part_payment(order_id, rest_id, payment, &mut *conn).await?;
    }
    Ok(())
}
