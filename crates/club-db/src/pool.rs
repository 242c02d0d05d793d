use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use club_config::DatabaseConfig;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::DbError;

/// How long a connection waits on SQLite's file lock before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Expands `~` and makes `path` absolute against the working directory.
pub fn resolve_path(path: &str) -> Result<PathBuf, DbError> {
    let expanded: Cow<'_, str> = shellexpand::tilde(path);
    let candidate = Path::new(expanded.as_ref());

    if candidate.is_absolute() {
        return Ok(candidate.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(candidate))
        .map_err(|source| DbError::Path {
            path: path.to_string(),
            source,
        })
}

/// `sqlite://` URL for a database file.
pub fn database_url(path: &str) -> Result<String, DbError> {
    Ok(format!("sqlite://{}", resolve_path(path)?.display()))
}

/// Opens a pool on the SQLite file at `path`, creating the file (and its
/// parent directory) if needed. Foreign keys are enforced on every connection.
pub async fn connect(path: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    let resolved = resolve_path(path)?;

    if let Some(parent) = resolved.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&resolved)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    tracing::debug!(path = %resolved.display(), max_connections, "opened sqlite pool");
    Ok(pool)
}

/// Pool on the shared database (users, categories, settings).
pub async fn init_common_db(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    connect(&config.common_db_path, config.max_connections).await
}

/// Pool on the current app's own database. Fails if `APP_DB_PATH` was never
/// configured.
pub async fn init_app_db(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    connect(config.app_db_path()?, config.max_connections).await
}
