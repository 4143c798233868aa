use sqlx::SqliteConnection;

use crate::webhook_types::Restaurant;

/// Insert-or-skip on the `rest_id` natural key. Restaurant attributes are
/// never refreshed; the first delivery wins.
pub async fn upsert_restaurant(
    rest_id: &str,
    restaurant: &Restaurant,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO restaurants (rest_id, res_name, address, contact_information)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (rest_id) DO NOTHING
        "#,
    )
    .bind(rest_id)
    .bind(restaurant.res_name.as_deref())
    .bind(restaurant.address.as_deref())
    .bind(restaurant.contact_information.as_deref())
    .execute(conn)
    .await?;
    Ok(())
}
