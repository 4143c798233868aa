use std::{env, time::Duration};

use log::*;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_MAX_QUEUE: usize = 10_000;
const DEFAULT_PROCESSING_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Maximum number of pooled database connections.
    pub pool_max: u32,
    /// Capacity of the ingestion queue. Deliveries beyond this are rejected
    /// with a retryable error until the worker catches up.
    pub max_queue: usize,
    /// Upper bound on a single payload's validate-and-write step. On expiry
    /// the payload is routed to the failure sink, so a slow database bounds
    /// queue drain time instead of stalling it.
    pub processing_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: String::default(),
            pool_max: DEFAULT_POOL_MAX,
            max_queue: DEFAULT_MAX_QUEUE,
            processing_timeout: DEFAULT_PROCESSING_TIMEOUT,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("HOST").ok().unwrap_or_else(|| DEFAULT_HOST.into());
        let port = env::var("PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!("🪛️ {s} is not a valid port for PORT. {e} Using the default, {DEFAULT_PORT}, instead.");
                    DEFAULT_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PORT);
        let database_url = env::var("DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ DATABASE_URL is not set. Please set it to the URL for the order database.");
            String::default()
        });
        let pool_max = env::var("POOL_MAX")
            .ok()
            .and_then(|s| {
                s.parse::<u32>().map_err(|e| warn!("🪛️ Invalid configuration value for POOL_MAX. {e}")).ok()
            })
            .unwrap_or(DEFAULT_POOL_MAX);
        let max_queue = env::var("MAX_QUEUE")
            .ok()
            .and_then(|s| {
                s.parse::<usize>().map_err(|e| warn!("🪛️ Invalid configuration value for MAX_QUEUE. {e}")).ok()
            })
            .filter(|n| {
                let ok = *n > 0;
                if !ok {
                    warn!("🪛️ MAX_QUEUE must be at least 1. Using the default, {DEFAULT_MAX_QUEUE}, instead.");
                }
                ok
            })
            .unwrap_or(DEFAULT_MAX_QUEUE);
        let processing_timeout = env::var("PROCESSING_TIMEOUT")
            .ok()
            .and_then(|s| {
                s.parse::<u64>().map_err(|e| warn!("🪛️ Invalid configuration value for PROCESSING_TIMEOUT. {e}")).ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PROCESSING_TIMEOUT);
        Self { host, port, database_url, pool_max, max_queue, processing_timeout }
    }
}
