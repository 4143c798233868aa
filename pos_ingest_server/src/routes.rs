//! Request handler definitions
//!
//! The webhook handler deliberately does as little as possible: parse the
//! body as JSON, hand it to the queue, answer. Schema validation and every
//! database interaction happen on the worker side of the queue, so a slow
//! write never holds a partner delivery open.
use actix_web::{get, post, web, HttpResponse, Responder};
use log::*;
use pos_ingest_engine::ingest::IngestQueue;
use serde_json::Value;

use crate::{
    data_objects::{AcceptedResponse, InfoResponse},
    errors::ServerError,
};

// ----------------------------------------------   Liveness  ----------------------------------------------------
#[get("/")]
pub async fn index() -> impl Responder {
    trace!("💻️ Received liveness request");
    HttpResponse::Ok().json(InfoResponse::live())
}

//----------------------------------------------   Webhook  ----------------------------------------------------
/// Fast-accept endpoint for partner order notifications.
///
/// Accepts any JSON object and answers `202 Accepted` once the payload is
/// queued. A full queue is surfaced as `503` so the partner retries later;
/// anything that parses as JSON but is not an object is a `400`.
#[post("/webhook")]
pub async fn webhook(body: web::Bytes, queue: web::Data<IngestQueue>) -> Result<HttpResponse, ServerError> {
    trace!("🧾 Received webhook notification ({} bytes)", body.len());
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!("🧾 Rejecting unparseable webhook body. {e}");
        ServerError::InvalidRequestBody(e.to_string())
    })?;
    if !payload.is_object() {
        debug!("🧾 Rejecting webhook body that is not a JSON object");
        return Err(ServerError::PayloadNotAnObject);
    }
    queue.try_enqueue(payload)?;
    Ok(HttpResponse::Accepted().json(AcceptedResponse::accepted()))
}
