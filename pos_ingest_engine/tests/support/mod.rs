#![allow(dead_code)]
//! Shared fixtures for the integration suite.
use std::time::Duration;

use pos_ingest_engine::{
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};
use serde_json::{json, Value};

/// A fresh, migrated, file-backed database unique to this test.
pub async fn new_test_db() -> SqliteDatabase {
    let _ = env_logger::try_init();
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database connection")
}

/// A well-formed payload covering the whole entity graph: one restaurant,
/// one customer, one order with two part payments, a tax, a discount and two
/// items (the first with an addon).
pub fn sample_payload(rest_id: &str, order_id: i64) -> Value {
    json!({
        "token": "tok-1",
        "event": "order_placed",
        "properties": {
            "Restaurant": {
                "restID": rest_id,
                "res_name": "Spice Route",
                "address": "12 Fort Rd",
                "contact_information": "+91 98000 00000"
            },
            "Customer": {
                "name": "Asha",
                "address": "4 Hill View",
                "phone": "9900000000",
                "gstin": "29ABCDE1234F1Z5"
            },
            "Order": {
                "orderID": order_id,
                "order_type": "dine_in",
                "payment_type": "card",
                "table_no": 7,
                "no_of_persons": "4",
                "tax_total": "20.50",
                "discount_total": 15,
                "total": "410.50",
                "core_total": 405.75,
                "round_off": "0.25",
                "status": "success",
                "part_payments": [
                    {"payment_type": "card", "amount": 200},
                    {"payment_type": "cash", "amount": "210.50"}
                ]
            },
            "Tax": [
                {"title": "CGST", "rate": "2.5", "amount": 10.25}
            ],
            "Discount": [
                {"title": "LOYALTY", "type": "fixed", "rate": null, "amount": 15}
            ],
            "OrderItem": [
                {
                    "itemid": 9001,
                    "name": "Paneer Tikka",
                    "price": "180",
                    "quantity": 2,
                    "total": 360,
                    "addon": [
                        {"addon_id": "77", "name": "Extra Chutney", "price": "15", "quantity": 1}
                    ]
                },
                {
                    "itemid": "9002",
                    "name": "Masala Chai",
                    "price": 25,
                    "quantity": "2",
                    "total": "50"
                }
            ]
        }
    })
}

pub async fn count_rows(db: &SqliteDatabase, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql).fetch_one(db.pool()).await.expect("count query failed")
}

/// Polls until `table` holds `expected` rows, panicking after five seconds.
pub async fn wait_for_count(db: &SqliteDatabase, table: &str, expected: i64) {
    for _ in 0..100 {
        if count_rows(db, table).await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("table {table} never reached {expected} rows");
}

pub const BUSINESS_TABLES: [&str; 8] =
    ["restaurants", "customers", "orders", "taxes", "discounts", "order_items", "addons", "part_payments"];
