use std::time::Duration;

use log::*;
use serde_json::Value;
use tokio::{task::JoinHandle, time::timeout};

use super::queue::IngestReceiver;
use crate::{webhook_types::WebhookPayload, SqliteDatabase};

/// Starts the ingestion worker. Do not await the returned JoinHandle until
/// shutdown has been signalled, as the worker runs indefinitely.
///
/// The worker is the queue's single consumer: one payload, and therefore at
/// most one write transaction, is in flight at a time. A payload that fails
/// validation or insertion is captured to the failure sink and the loop
/// moves on; nothing a payload contains can stop the worker.
/// `processing_timeout` bounds each payload's validate-and-write step so a
/// slow database cannot stall the queue indefinitely.
pub fn start_ingest_worker(
    db: SqliteDatabase,
    receiver: IngestReceiver,
    processing_timeout: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let IngestReceiver { receiver: mut rx, shutdown: mut shutdown_rx } = receiver;
        info!("📥 Ingestion worker started");
        loop {
            let raw = tokio::select! {
                _ = shutdown_rx.changed() => break,
                next = rx.recv() => match next {
                    Some(raw) => raw,
                    None => break,
                },
            };
            process_payload(&db, raw, processing_timeout).await;
        }
        info!("📥 Ingestion worker stopped");
    })
}

async fn process_payload(db: &SqliteDatabase, raw: Value, processing_timeout: Duration) {
    if timeout(processing_timeout, handle_payload(db, &raw)).await.is_err() {
        warn!("📥 Payload processing timed out after {}s", processing_timeout.as_secs());
        let reason = format!("write error: processing timed out after {}s", processing_timeout.as_secs());
        db.capture_failed_payload(&raw, &reason).await;
    }
}

async fn handle_payload(db: &SqliteDatabase, raw: &Value) {
    let payload = match WebhookPayload::from_value(raw) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("📥 Payload failed validation. {e}");
            db.capture_failed_payload(raw, &format!("validation error: {e}")).await;
            return;
        },
    };
    match db.insert_order(&payload).await {
        Ok(order_ref) => info!("📥 Stored {order_ref}"),
        Err(e) => {
            warn!("📥 Could not store order. {e}");
            db.capture_failed_payload(raw, &format!("write error: {e}")).await;
        },
    }
}
