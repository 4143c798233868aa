use log::*;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// The queue cannot accept another payload right now. Retryable: the caller
/// should ask the upstream partner to re-deliver later.
#[derive(Debug, Clone, Error)]
#[error("The ingestion queue is at capacity ({capacity} payloads)")]
pub struct QueueFullError {
    pub capacity: usize,
}

/// Creates the bounded queue linking the HTTP boundary to the worker.
/// Payloads travel raw; validation happens on the consumer side.
pub fn ingest_channel(capacity: usize) -> (IngestQueue, IngestReceiver) {
    let (sender, receiver) = mpsc::channel(capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    (
        IngestQueue { sender, shutdown: shutdown_tx, capacity },
        IngestReceiver { receiver, shutdown: shutdown_rx },
    )
}

/// Producer half. Shared by all request handlers; enqueueing never blocks
/// and never suspends.
pub struct IngestQueue {
    sender: mpsc::Sender<Value>,
    shutdown: watch::Sender<bool>,
    capacity: usize,
}

impl IngestQueue {
    /// Non-blocking enqueue. A full queue rejects immediately so the request
    /// path can answer with a retryable error instead of stalling.
    pub fn try_enqueue(&self, payload: Value) -> Result<(), QueueFullError> {
        self.sender.try_send(payload).map_err(|e| {
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    warn!("📥 Ingestion queue is full ({} payloads). Rejecting delivery.", self.capacity)
                },
                mpsc::error::TrySendError::Closed(_) => {
                    warn!("📥 Payload arrived after the ingestion queue shut down. Rejecting delivery.")
                },
            }
            QueueFullError { capacity: self.capacity }
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Signals the worker to stop. The signal is observed at the worker's
    /// next dequeue suspension point, so an in-flight write finishes rather
    /// than being aborted mid-transaction.
    pub fn shutdown(&self) {
        if self.shutdown.send(true).is_err() {
            debug!("📥 Ingestion worker has already stopped");
        }
    }
}

/// Consumer half, owned by the single worker task.
pub struct IngestReceiver {
    pub(crate) receiver: mpsc::Receiver<Value>,
    pub(crate) shutdown: watch::Receiver<bool>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn backpressure_rejects_third_payload() {
        let (queue, _receiver) = ingest_channel(2);
        assert!(queue.try_enqueue(json!({"n": 1})).is_ok());
        assert!(queue.try_enqueue(json!({"n": 2})).is_ok());
        let err = queue.try_enqueue(json!({"n": 3})).unwrap_err();
        assert_eq!(err.capacity, 2);
    }

    #[tokio::test]
    async fn payloads_dequeue_in_fifo_order() {
        let (queue, mut receiver) = ingest_channel(4);
        queue.try_enqueue(json!({"n": 1})).unwrap();
        queue.try_enqueue(json!({"n": 2})).unwrap();
        assert_eq!(receiver.receiver.recv().await.unwrap()["n"], 1);
        assert_eq!(receiver.receiver.recv().await.unwrap()["n"], 2);
    }

    #[tokio::test]
    async fn draining_frees_capacity() {
        let (queue, mut receiver) = ingest_channel(1);
        queue.try_enqueue(json!({"n": 1})).unwrap();
        assert!(queue.try_enqueue(json!({"n": 2})).is_err());
        receiver.receiver.recv().await.unwrap();
        assert!(queue.try_enqueue(json!({"n": 2})).is_ok());
    }

    #[tokio::test]
    async fn shutdown_signal_reaches_receiver() {
        let (queue, mut receiver) = ingest_channel(1);
        assert!(!*receiver.shutdown.borrow());
        queue.shutdown();
        receiver.shutdown.changed().await.unwrap();
        assert!(*receiver.shutdown.borrow());
    }
}
