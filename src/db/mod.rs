pub mod history;
pub mod kv;
pub mod models;

pub use history::HistoryStore;
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use models::GameHistoryEntry;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::StoreError;

/// Default database location in the platform data directory.
pub fn default_db_path() -> Result<PathBuf, StoreError> {
    let mut path = dirs::data_dir().ok_or_else(|| {
        StoreError::Unavailable("unable to determine data directory for your platform".into())
    })?;

    path.push("zetamac-tracker");
    path.push("history.db");
    Ok(path)
}

/// Open (creating if needed) the history database and run migrations.
pub async fn create_pool(db_path: &Path) -> Result<SqlitePool, StoreError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Migrated in-memory database. A single connection keeps the data alive.
pub async fn connect_in_memory() -> Result<SqlitePool, StoreError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
