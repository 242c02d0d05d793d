use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbError;
use crate::pool::{init_app_db, init_common_db};
use club_config::DatabaseConfig;

/// A scoped unit of work on one database.
///
/// Changes become visible only after [`Transaction::commit`]. Dropping the
/// session on any other path rolls back and returns the connection to the pool.
pub type Session = Transaction<'static, Sqlite>;

/// The two pools a club app works with.
#[derive(Clone, Debug)]
pub struct Databases {
    pub common: SqlitePool,
    pub app: Option<SqlitePool>,
}

impl Databases {
    pub fn new(common: SqlitePool, app: Option<SqlitePool>) -> Self {
        Self { common, app }
    }

    /// Opens the shared pool and, when configured, the app pool.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let common = init_common_db(config).await?;
        let app = match config.app_db_path {
            Some(_) => Some(init_app_db(config).await?),
            None => None,
        };
        Ok(Self { common, app })
    }

    pub async fn common_session(&self) -> Result<Session, DbError> {
        Ok(self.common.begin().await?)
    }

    pub async fn app_session(&self) -> Result<Session, DbError> {
        let pool = self
            .app
            .as_ref()
            .ok_or(club_config::ConfigError::Missing("APP_DB_PATH"))?;
        Ok(pool.begin().await?)
    }

    pub async fn close(&self) {
        self.common.close().await;
        if let Some(app) = &self.app {
            app.close().await;
        }
    }
}
