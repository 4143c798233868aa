//! The ingestion pipeline: a bounded queue between the HTTP boundary and a
//! single background worker.
//!
//! Producers (request handlers) enqueue raw, unvalidated payloads without
//! ever blocking; the worker drains the queue sequentially, validates each
//! payload, writes it, and routes anything that fails to the failure sink.
//! The queue is the sole synchronization point between the two sides.
mod queue;
#[cfg(feature = "sqlite")]
mod worker;

pub use queue::{ingest_channel, IngestQueue, IngestReceiver, QueueFullError};
#[cfg(feature = "sqlite")]
pub use worker::start_ingest_worker;
