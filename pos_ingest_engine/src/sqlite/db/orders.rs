use sqlx::SqliteConnection;

use crate::webhook_types::{Order, PartPayment};

/// Insert-or-skip on the `(order_id, rest_id)` natural key. Re-delivered
/// orders are never updated; the first stored version is authoritative.
///
/// Monetary and count fields are coerced individually; a field the partner
/// mangled becomes NULL rather than failing the record. `table_no`,
/// `round_off`, `created_on` and `order_from_id` are text passthrough since
/// the partner's formats for them are unreliable.
pub async fn insert_order(
    order_id: i64,
    rest_id: &str,
    customer_id: i64,
    order: &Order,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO orders (
            order_id, rest_id, customer_id, customer_invoice_id, delivery_charges,
            order_type, payment_type, table_no, no_of_persons, discount_total,
            tax_total, round_off, core_total, total, created_on, order_from,
            order_from_id, sub_order_type, packaging_charge, status, comment,
            biller, assignee
        ) VALUES (
            $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
            $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
        )
        ON CONFLICT (order_id, rest_id) DO NOTHING
        "#,
    )
    .bind(order_id)
    .bind(rest_id)
    .bind(customer_id)
    .bind(order.customer_invoice_id.as_deref())
    .bind(order.delivery_charges.as_f64())
    .bind(order.order_type.as_deref())
    .bind(order.payment_type.as_deref())
    .bind(order.table_no.as_text())
    .bind(order.no_of_persons.as_i64())
    .bind(order.discount_total.as_f64())
    .bind(order.tax_total.as_f64())
    .bind(order.round_off.as_text())
    .bind(order.core_total.as_f64())
    .bind(order.total.as_f64())
    .bind(order.created_on.as_text())
    .bind(order.order_from.as_deref())
    .bind(order.order_from_id.as_text())
    .bind(order.sub_order_type.as_deref())
    .bind(order.packaging_charge.as_f64())
    .bind(order.status.as_deref())
    .bind(order.comment.as_deref())
    .bind(order.biller.as_deref())
    .bind(order.assignee.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}

/// Insert-or-skip on `(order_id, rest_id, payment_type, amount)`: duplicate
/// payments of identical type and amount collapse to one row.
pub async fn insert_part_payment(
    order_id: i64,
    rest_id: &str,
    payment: &PartPayment,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO part_payments (order_id, rest_id, payment_type, amount, custome_payment_type)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (order_id, rest_id, payment_type, amount) DO NOTHING
        "#,
    )
    .bind(order_id)
    .bind(rest_id)
    .bind(payment.payment_type.as_deref())
    .bind(payment.amount.as_f64())
    .bind(payment.custome_payment_type.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}
