mod common;

use std::time::Instant;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, create_test_user, generate_unique_email, setup_test_db, test_jwt_config,
};
use common_club::UserService;
use common_club::auth::verify_token;
use common_club::models::{
    AppScope, CategoryCreate, ChangePasswordRequest, SettingUpsert, UserCreate, UserLogin,
    UserUpdate,
};
use common_club::{CategoryService, SettingsService};

#[tokio::test]
async fn test_register_and_find() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let email = generate_unique_email();
    let user = create_test_user(&mut conn, &email).await;

    assert!(user.id > 0);
    assert_eq!(user.email.as_str(), email);
    assert_ne!(user.password_hash, TEST_PASSWORD);
    assert!(user.password_hash.starts_with("$2"));

    let found = UserService::find_by_id(&mut conn, user.id).await.unwrap();
    assert_eq!(found.id, user.id);

    let by_email = UserService::find_by_email(&mut conn, &email.to_uppercase())
        .await
        .unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let email = generate_unique_email();
    create_test_user(&mut conn, &email).await;

    let err = UserService::register(
        &mut conn,
        UserCreate {
            email: email.to_uppercase(),
            name: None,
            password: "anotherpass".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let err = UserService::register(
        &mut conn,
        UserCreate {
            email: "not-an-email".to_string(),
            name: None,
            password: TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.field.as_deref(), Some("email"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_login_success_issues_verifiable_token() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let jwt_config = test_jwt_config();

    let email = generate_unique_email();
    let user = create_test_user(&mut conn, &email).await;

    let response = UserService::login(
        &mut conn,
        UserLogin {
            email: email.clone(),
            password: TEST_PASSWORD.to_string(),
        },
        &jwt_config,
    )
    .await
    .unwrap();

    assert_eq!(response.token_type, "bearer");
    assert_eq!(response.user.id, user.id);

    let claims = verify_token(&response.access_token, &jwt_config).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.email, email);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let jwt_config = test_jwt_config();

    let email = generate_unique_email();
    create_test_user(&mut conn, &email).await;

    let wrong_password = UserService::login(
        &mut conn,
        UserLogin {
            email,
            password: "wrongpass123".to_string(),
        },
        &jwt_config,
    )
    .await
    .unwrap_err();

    let unknown_email = UserService::login(
        &mut conn,
        UserLogin {
            email: generate_unique_email(),
            password: TEST_PASSWORD.to_string(),
        },
        &jwt_config,
    )
    .await
    .unwrap_err();

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.error.to_string(),
        unknown_email.error.to_string()
    );
}

#[tokio::test]
async fn test_unknown_email_login_still_checks_a_hash() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let jwt_config = test_jwt_config();

    let email = generate_unique_email();
    create_test_user(&mut conn, &email).await;
    club_core::verify_password_unknown_account("warm up");

    let started = Instant::now();
    UserService::login(
        &mut conn,
        UserLogin {
            email,
            password: "wrongpass123".to_string(),
        },
        &jwt_config,
    )
    .await
    .unwrap_err();
    let known_elapsed = started.elapsed();

    let started = Instant::now();
    UserService::login(
        &mut conn,
        UserLogin {
            email: generate_unique_email(),
            password: "wrongpass123".to_string(),
        },
        &jwt_config,
    )
    .await
    .unwrap_err();
    let unknown_elapsed = started.elapsed();

    // Both paths are dominated by one bcrypt verification.
    assert!(
        unknown_elapsed * 4 >= known_elapsed,
        "unknown: {unknown_elapsed:?}, known: {known_elapsed:?}"
    );
}

#[tokio::test]
async fn test_update_profile() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let user = create_test_user(&mut conn, &generate_unique_email()).await;
    let other = create_test_user(&mut conn, &generate_unique_email()).await;

    let updated = UserService::update_profile(
        &mut conn,
        user.id,
        UserUpdate {
            name: Some(Some("Renamed".to_string())),
            email: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Renamed"));
    assert_eq!(updated.email, user.email);

    let untouched = UserService::update_profile(&mut conn, user.id, UserUpdate::default())
        .await
        .unwrap();
    assert_eq!(untouched.name.as_deref(), Some("Renamed"));

    let cleared = UserService::update_profile(
        &mut conn,
        user.id,
        UserUpdate {
            name: Some(None),
            email: None,
        },
    )
    .await
    .unwrap();
    assert!(cleared.name.is_none());

    let err = UserService::update_profile(
        &mut conn,
        user.id,
        UserUpdate {
            name: None,
            email: Some(other.email.as_str().to_string()),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);

    let err = UserService::update_profile(&mut conn, 999_999, UserUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_password() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let jwt_config = test_jwt_config();

    let email = generate_unique_email();
    let user = create_test_user(&mut conn, &email).await;

    let err = UserService::change_password(
        &mut conn,
        user.id,
        ChangePasswordRequest {
            current_password: "not-my-password".to_string(),
            new_password: "brandnewpass".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);

    UserService::change_password(
        &mut conn,
        user.id,
        ChangePasswordRequest {
            current_password: TEST_PASSWORD.to_string(),
            new_password: "brandnewpass".to_string(),
        },
    )
    .await
    .unwrap();

    let old = UserService::login(
        &mut conn,
        UserLogin {
            email: email.clone(),
            password: TEST_PASSWORD.to_string(),
        },
        &jwt_config,
    )
    .await;
    assert!(old.is_err());

    let new = UserService::login(
        &mut conn,
        UserLogin {
            email,
            password: "brandnewpass".to_string(),
        },
        &jwt_config,
    )
    .await;
    assert!(new.is_ok());
}

#[tokio::test]
async fn test_delete_cascades_to_owned_rows() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let user = create_test_user(&mut conn, &generate_unique_email()).await;

    CategoryService::create(
        &mut conn,
        user.id,
        CategoryCreate {
            name: "Pet Food".to_string(),
            kind: "expense".to_string(),
            icon: None,
            app_scope: "coin".to_string(),
            parent_id: None,
        },
    )
    .await
    .unwrap();
    SettingsService::upsert(
        &mut conn,
        user.id,
        AppScope::Coin,
        SettingUpsert {
            key: "currency".to_string(),
            value: Some("EUR".to_string()),
        },
    )
    .await
    .unwrap();

    UserService::delete(&mut conn, user.id).await.unwrap();

    let (categories,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM shared_categories WHERE user_id = ?")
            .bind(user.id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    let (settings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_settings WHERE user_id = ?")
        .bind(user.id)
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(categories, 0);
    assert_eq!(settings, 0);

    let err = UserService::find_by_id(&mut conn, user.id).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    let err = UserService::delete(&mut conn, user.id).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}
