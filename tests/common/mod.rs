#![allow(dead_code)]

use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use common_club::UserService;
use common_club::config::JwtConfig;
use common_club::db::{connect, run_migrations};
use common_club::models::{User, UserCreate};

pub const TEST_PASSWORD: &str = "testpass123";

/// Fresh, migrated shared database in the system temp directory.
pub async fn setup_test_db() -> SqlitePool {
    let path = std::env::temp_dir().join(format!("common-club-test-{}.db", Uuid::new_v4()));
    let pool = connect(&path.display().to_string(), 5).await.unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new("integration-test-secret-key")
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

pub async fn create_test_user(conn: &mut SqliteConnection, email: &str) -> User {
    UserService::register(
        conn,
        UserCreate {
            email: email.to_string(),
            name: Some("Test User".to_string()),
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn seed_category(conn: &mut SqliteConnection, name: &str, app_scope: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shared_categories (name, type, icon, app_scope, is_predefined) \
         VALUES (?, 'expense', 'mdi-test', ?, 1) RETURNING id",
    )
    .bind(name)
    .bind(app_scope)
    .fetch_one(conn)
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
