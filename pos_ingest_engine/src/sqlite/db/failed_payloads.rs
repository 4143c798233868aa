use serde_json::Value;
use sqlx::SqliteConnection;

/// Error descriptions are truncated so a pathological upstream message can't
/// bloat the capture table.
const MAX_ERROR_LEN: usize = 5000;

/// Append the raw payload and a human-readable reason to the capture table.
/// No dedup and no natural key; every capture is a new row.
pub async fn insert_failed_payload(
    raw: &Value,
    error: &str,
    conn: &mut SqliteConnection,
) -> Result<(), sqlx::Error> {
    let error = if error.chars().count() > MAX_ERROR_LEN {
        error.chars().take(MAX_ERROR_LEN).collect()
    } else {
        error.to_string()
    };
    sqlx::query("INSERT INTO failed_payloads (payload, error) VALUES ($1, $2)")
        .bind(raw.to_string())
        .bind(error)
        .execute(conn)
        .await?;
    Ok(())
}
