use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use pos_ingest_engine::{
    ingest::{ingest_channel, start_ingest_worker, IngestQueue},
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{index, webhook},
};

/// Builds the full pipeline (pool, queue, worker, HTTP server), runs it to
/// completion, and tears it down in the only safe order: the HTTP server
/// stops accepting first, then the worker is signalled and awaited, and the
/// pool closes last so an in-flight transaction never sees a closed pool.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.pool_max)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let (queue, receiver) = ingest_channel(config.max_queue);
    let worker = start_ingest_worker(db.clone(), receiver, config.processing_timeout);
    let queue = web::Data::new(queue);

    let srv = create_server_instance(&config, queue.clone())?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));

    info!("💻️ Server stopped. Shutting down the ingestion worker");
    queue.shutdown();
    if let Err(e) = worker.await {
        warn!("📥 Ingestion worker did not stop cleanly. {e}");
    }
    db.close().await;
    info!("🗃️ Connection pool closed");
    result
}

pub fn create_server_instance(config: &ServerConfig, queue: web::Data<IngestQueue>) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("poi::access_log"))
            .app_data(queue.clone())
            .service(index)
            .service(webhook)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
