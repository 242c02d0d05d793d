use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

use club_core::AppError;
use club_models::{AppScope, AppSettings, SettingUpsert};

use crate::validator::validate_dto;

const SETTING_COLUMNS: &str = "id, user_id, app_name, key, value, updated_at";

fn require_single_app(app: AppScope) -> Result<(), AppError> {
    if app.is_single_app() {
        Ok(())
    } else {
        Err(AppError::validation("app_name", "must name a single app"))
    }
}

/// Key/value settings owned by one user inside one app.
pub struct SettingsService;

impl SettingsService {
    #[instrument(skip(conn))]
    pub async fn get(
        conn: &mut SqliteConnection,
        user_id: i64,
        app: AppScope,
        key: &str,
    ) -> Result<AppSettings, AppError> {
        require_single_app(app)?;

        sqlx::query_as::<_, AppSettings>(&format!(
            "SELECT {SETTING_COLUMNS} FROM app_settings \
             WHERE user_id = ? AND app_name = ? AND key = ?"
        ))
        .bind(user_id)
        .bind(app)
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Setting '{}' not found", key)))
    }

    #[instrument(skip(conn))]
    pub async fn list_for_app(
        conn: &mut SqliteConnection,
        user_id: i64,
        app: AppScope,
    ) -> Result<Vec<AppSettings>, AppError> {
        require_single_app(app)?;

        let settings = sqlx::query_as::<_, AppSettings>(&format!(
            "SELECT {SETTING_COLUMNS} FROM app_settings \
             WHERE user_id = ? AND app_name = ? ORDER BY key"
        ))
        .bind(user_id)
        .bind(app)
        .fetch_all(&mut *conn)
        .await?;

        Ok(settings)
    }

    /// Inserts the setting or replaces the value of an existing key.
    #[instrument(skip(conn, dto), fields(key = %dto.key))]
    pub async fn upsert(
        conn: &mut SqliteConnection,
        user_id: i64,
        app: AppScope,
        dto: SettingUpsert,
    ) -> Result<AppSettings, AppError> {
        require_single_app(app)?;
        validate_dto(&dto)?;

        let setting = sqlx::query_as::<_, AppSettings>(&format!(
            "INSERT INTO app_settings (user_id, app_name, key, value, updated_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (user_id, app_name, key) \
             DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at \
             RETURNING {SETTING_COLUMNS}"
        ))
        .bind(user_id)
        .bind(app)
        .bind(&dto.key)
        .bind(&dto.value)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(setting)
    }

    #[instrument(skip(conn))]
    pub async fn delete(
        conn: &mut SqliteConnection,
        user_id: i64,
        app: AppScope,
        key: &str,
    ) -> Result<(), AppError> {
        require_single_app(app)?;

        let result =
            sqlx::query("DELETE FROM app_settings WHERE user_id = ? AND app_name = ? AND key = ?")
                .bind(user_id)
                .bind(app)
                .bind(key)
                .execute(&mut *conn)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Setting '{}' not found", key)));
        }

        Ok(())
    }
}
