//! # Club DB
//!
//! SQLite pools and scoped sessions for the club apps.
//!
//! Every app talks to two databases: the shared one (users, categories,
//! settings) and its own. [`Databases`] holds both pools and hands out
//! [`Session`]s, which roll back unless committed.
//!
//! # Example
//!
//! ```ignore
//! use club_config::DatabaseConfig;
//! use club_db::{Databases, run_migrations};
//!
//! let dbs = Databases::connect(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&dbs.common).await?;
//!
//! let mut session = dbs.common_session().await?;
//! // ... queries against &mut *session ...
//! session.commit().await?;
//! ```

pub mod error;
pub mod pool;
pub mod session;

use sqlx::migrate::Migrator;

pub use error::DbError;
pub use pool::{connect, database_url, init_app_db, init_common_db, resolve_path};
pub use session::{Databases, Session};

// Re-export connection types for convenience
pub use sqlx::{SqliteConnection, SqlitePool};

/// Shared database schema, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Creates any missing tables and indexes. Safe to run on every start.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("shared database schema is up to date");
    Ok(())
}
