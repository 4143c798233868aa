//! POS Order Ingestion Engine
//!
//! Core library for the POS order webhook gateway. It accepts the raw JSON
//! payloads the HTTP boundary enqueues, validates and normalizes them, and
//! persists them into a normalized relational schema with idempotent
//! upserts.
//!
//! The library is divided into three main sections:
//! 1. Payload schema types ([`mod@webhook_types`]). A typed representation of
//!    the partner's webhook payload, tolerant of the partner's loose field
//!    formats. Coercion of type-flexible scalars happens here.
//! 2. Database management ([`SqliteDatabase`]). Maps a validated payload onto
//!    a sequence of idempotent upserts inside one transaction, and provides
//!    the best-effort failure sink for payloads that could not be processed.
//! 3. The ingestion pipeline ([`mod@ingest`]). A bounded queue decouples the
//!    fast-accept HTTP endpoint from a single background worker that drains
//!    it, validates each payload and writes it, routing every failure to the
//!    failure sink so no order notification is ever silently lost.
#[cfg(feature = "sqlite")]
mod sqlite;

pub mod db_types;
pub mod ingest;
#[cfg(feature = "sqlite")]
pub mod test_utils;
pub mod webhook_types;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabase, WriteError};
