use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

use club_auth::create_access_token;
use club_config::JwtConfig;
use club_core::{AppError, hash_password, verify_password, verify_password_unknown_account};
use club_models::{ChangePasswordRequest, Email, TokenResponse, User, UserCreate, UserLogin, UserUpdate};

use crate::validator::validate_dto;

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn parse_email(raw: &str) -> Result<Email, AppError> {
    Email::new(raw).map_err(|e| AppError::validation("email", e.to_string()))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(conn, dto), fields(email = %dto.email))]
    pub async fn register(conn: &mut SqliteConnection, dto: UserCreate) -> Result<User, AppError> {
        validate_dto(&dto)?;
        let email = parse_email(&dto.email)?;

        if Self::find_by_email(conn, email.as_str()).await?.is_some() {
            return Err(AppError::conflict(anyhow!("Email already registered")));
        }

        let password_hash = hash_password(&dto.password)?;
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, name, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(&password_hash)
        .bind(&dto.name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Checks credentials and issues an access token. Unknown emails and wrong
    /// passwords fail the same way.
    #[instrument(skip(conn, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        conn: &mut SqliteConnection,
        dto: UserLogin,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let verified = match Self::find_by_email(conn, dto.email.trim()).await? {
            Some(user) => verify_password(&dto.password, &user.password_hash).then_some(user),
            None => {
                verify_password_unknown_account(&dto.password);
                None
            }
        };
        let user =
            verified.ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let access_token = create_access_token(user.id, user.email.as_str(), jwt_config)?;

        tracing::info!(user_id = user.id, "user logged in");
        Ok(TokenResponse::bearer(access_token, user.into()))
    }

    #[instrument(skip(conn))]
    pub async fn find_by_id(conn: &mut SqliteConnection, user_id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", user_id)))
    }

    /// Case-insensitive lookup.
    #[instrument(skip(conn))]
    pub async fn find_by_email(
        conn: &mut SqliteConnection,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&mut *conn)
                .await?;

        Ok(user)
    }

    #[instrument(skip(conn))]
    pub async fn update_profile(
        conn: &mut SqliteConnection,
        user_id: i64,
        dto: UserUpdate,
    ) -> Result<User, AppError> {
        validate_dto(&dto)?;
        let email = dto.email.as_deref().map(parse_email).transpose()?;

        if let Some(email) = &email {
            let taken: Option<i64> =
                sqlx::query_scalar("SELECT id FROM users WHERE email = ? AND id != ?")
                    .bind(email.as_str())
                    .bind(user_id)
                    .fetch_optional(&mut *conn)
                    .await?;

            if taken.is_some() {
                return Err(AppError::conflict(anyhow!("Email already registered")));
            }
        }

        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = CASE WHEN ? THEN ? ELSE name END, \
             email = COALESCE(?, email), updated_at = ? \
             WHERE id = ? RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.name.is_some())
        .bind(dto.name.flatten())
        .bind(email.as_ref().map(Email::as_str))
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User with id {} not found", user_id)))
    }

    #[instrument(skip(conn, dto))]
    pub async fn change_password(
        conn: &mut SqliteConnection,
        user_id: i64,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_dto(&dto)?;
        let user = Self::find_by_id(conn, user_id).await?;

        if !verify_password(&dto.current_password, &user.password_hash) {
            return Err(AppError::bad_request(anyhow!("Current password is incorrect")));
        }

        let password_hash = hash_password(&dto.new_password)?;

        sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        tracing::info!(user_id, "password changed");
        Ok(())
    }

    /// Removes the user together with their custom categories and settings.
    #[instrument(skip(conn))]
    pub async fn delete(conn: &mut SqliteConnection, user_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("User with id {} not found", user_id)));
        }

        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
