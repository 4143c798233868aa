//! # POS order webhook gateway server
//! This crate hosts the HTTP boundary for the order ingestion pipeline. It is
//! responsible for:
//! * Listening for incoming order webhook notifications from the POS partner.
//! * Parsing each request body as JSON (nothing more) and enqueueing it.
//! * Answering immediately, so the partner's delivery loop never waits on the
//!   database.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/`: A liveness route that returns a 200 OK response.
//! * `/webhook`: The webhook route for receiving order notifications.
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
