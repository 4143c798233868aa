//! # Low-level SQLite database methods
//!
//! All these interactions are maintained by simple functions (rather than
//! stateful structs) that accept a `&mut SqliteConnection` argument. Callers
//! can obtain a connection from a pool, or create an atomic transaction as
//! the need arises and call through to the functions without any other
//! changes.
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod adjustments;
pub mod customers;
pub mod failed_payloads;
pub mod line_items;
pub mod orders;
pub mod restaurants;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
