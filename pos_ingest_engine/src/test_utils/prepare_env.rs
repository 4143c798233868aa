use std::{env, path::Path};

use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Drops, recreates and migrates the database at `url`.
pub async fn prepare_test_env(url: &str) {
    create_database(url).await;
    run_migrations(url).await;
}

/// A unique database path under the system temp directory, so concurrent
/// test binaries never share state.
pub fn random_db_path() -> String {
    format!("sqlite://{}/pos_ingest_test_{}.db", env::temp_dir().display(), rand::random::<u64>())
}

pub async fn run_migrations(url: &str) {
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    migrate!("./migrations").run(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Migrations complete");
    db.close().await;
}

pub async fn create_database<P: AsRef<Path>>(path: P) {
    let p = path.as_ref().as_os_str().to_str().unwrap();
    if let Err(e) = Sqlite::drop_database(p).await {
        warn!("Error dropping database {p}: {e:?}");
    }
    Sqlite::create_database(p).await.expect("Error creating database");
    info!("Created Sqlite database {p}");
}
