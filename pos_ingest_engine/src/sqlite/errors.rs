use thiserror::Error;

/// Errors raised while mapping a payload onto the normalized schema.
///
/// Any of these fails the whole transaction; benign natural-key conflicts
/// are handled inside the SQL (`ON CONFLICT`) and never surface here.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("payload is missing its {0} section")]
    MissingSection(&'static str),
    #[error("invalid or missing {0}")]
    InvalidKey(&'static str),
    #[error("customer upsert did not return a customer_id")]
    CustomerIdMissing,
    #[error("database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
