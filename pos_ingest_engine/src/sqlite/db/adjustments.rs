//! Order-level adjustments: taxes and discounts, both keyed
//! `(order_id, rest_id, title)` with one row per distinct title per order.
use sqlx::SqliteConnection;

use crate::webhook_types::{Discount, Tax};

pub async fn insert_tax(
    order_id: i64,
    rest_id: &str,
    tax: &Tax,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO taxes (order_id, rest_id, title, rate, amount)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (order_id, rest_id, title) DO NOTHING
        "#,
    )
    .bind(order_id)
    .bind(rest_id)
    .bind(tax.title.as_deref())
    .bind(tax.rate.as_f64())
    .bind(tax.amount.as_f64())
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn insert_discount(
    order_id: i64,
    rest_id: &str,
    discount: &Discount,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO discounts (order_id, rest_id, title, type, rate, amount)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (order_id, rest_id, title) DO NOTHING
        "#,
    )
    .bind(order_id)
    .bind(rest_id)
    .bind(discount.title.as_deref())
    .bind(discount.kind.as_deref())
    .bind(discount.rate.as_f64())
    .bind(discount.amount.as_f64())
    .execute(conn)
    .await?;
    Ok(())
}
