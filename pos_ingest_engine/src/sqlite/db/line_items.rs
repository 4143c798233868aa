//! Order line items and their addons.
use sqlx::SqliteConnection;

use crate::webhook_types::{Addon, OrderItem};

/// Insert-or-skip on `(itemid, order_id, rest_id)`.
///
/// `item_id` is coerced by the caller because the addons below need the same
/// value. An uncoercible itemid binds as NULL and trips the schema's NOT NULL
/// constraint, failing the transaction; an item without a usable key cannot
/// be stored meaningfully.
pub async fn insert_order_item(
    item_id: Option<i64>,
    order_id: i64,
    rest_id: &str,
    item: &OrderItem,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO order_items (
            itemid, order_id, rest_id, name, itemcode, vendoritemcode,
            specialnotes, price, quantity, total, category_name,
            sap_code, discount, tax
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (itemid, order_id, rest_id) DO NOTHING
        "#,
    )
    .bind(item_id)
    .bind(order_id)
    .bind(rest_id)
    .bind(item.name.as_deref())
    .bind(item.itemcode.as_deref())
    .bind(item.vendoritemcode.as_deref())
    .bind(item.specialnotes.as_deref())
    .bind(item.price.as_f64())
    .bind(item.quantity.as_i64())
    .bind(item.total.as_f64())
    .bind(item.category_name.as_deref())
    .bind(item.sap_code.as_deref())
    .bind(item.discount.as_f64())
    .bind(item.tax.as_f64())
    .execute(conn)
    .await?;
    Ok(())
}

/// Insert-or-skip on `(addon_id, itemid, order_id, rest_id)`.
pub async fn insert_addon(
    addon: &Addon,
    item_id: Option<i64>,
    order_id: i64,
    rest_id: &str,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO addons (
            addon_id, itemid, order_id, rest_id, group_name, name,
            price, quantity, sap_code, addon_group_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (addon_id, itemid, order_id, rest_id) DO NOTHING
        "#,
    )
    .bind(addon.addon_id.as_text())
    .bind(item_id)
    .bind(order_id)
    .bind(rest_id)
    .bind(addon.group_name.as_deref())
    .bind(addon.name.as_deref())
    .bind(addon.price.as_f64())
    .bind(addon.quantity.as_i64())
    .bind(addon.sap_code.as_deref())
    .bind(addon.addon_group_id.as_text())
    .execute(conn)
    .await?;
    Ok(())
}
