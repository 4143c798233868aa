use sqlx::SqliteConnection;

use crate::{sqlite::errors::WriteError, webhook_types::Customer};

/// Upsert deduplicated by the `(phone, gstin)` compound key. On conflict the
/// name and address are refreshed to the latest delivered values. Returns the
/// surrogate `customer_id`.
///
/// The statement always returns exactly one row; a missing id indicates a
/// broken invariant and fails the enclosing transaction.
pub async fn upsert_customer(customer: &Customer, conn: &mut SqliteConnection) -> Result<i64, WriteError> {
    let id: Option<i64> = sqlx::query_scalar(
        r#"
        INSERT INTO customers (name, address, phone, gstin)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (phone, gstin) DO UPDATE SET
            name = excluded.name,
            address = excluded.address
        RETURNING customer_id
        "#,
    )
    .bind(customer.name.as_deref())
    .bind(customer.address.as_deref())
    .bind(customer.phone.as_deref())
    .bind(customer.gstin.as_deref())
    .fetch_optional(conn)
    .await?;
    id.ok_or(WriteError::CustomerIdMissing)
}
