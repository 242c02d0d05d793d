mod common;

use axum::http::StatusCode;
use common::{create_test_user, generate_unique_email, seed_category, setup_test_db};
use common_club::CategoryService;
use common_club::models::{AppScope, CategoryCreate, CategoryKind, CategoryUpdate};
use sqlx::SqliteConnection;

fn custom(name: &str, app_scope: &str, parent_id: Option<i64>) -> CategoryCreate {
    CategoryCreate {
        name: name.to_string(),
        kind: "expense".to_string(),
        icon: Some("mdi-star".to_string()),
        app_scope: app_scope.to_string(),
        parent_id,
    }
}

async fn create(conn: &mut SqliteConnection, user_id: i64, dto: CategoryCreate) -> i64 {
    CategoryService::create(conn, user_id, dto).await.unwrap().id
}

#[tokio::test]
async fn test_create_custom_category() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let user = create_test_user(&mut conn, &generate_unique_email()).await;

    let category = CategoryService::create(&mut conn, user.id, custom("Pet Food", "coin", None))
        .await
        .unwrap();

    assert_eq!(category.name, "Pet Food");
    assert_eq!(category.kind, CategoryKind::Expense);
    assert_eq!(category.app_scope, AppScope::Coin);
    assert!(!category.is_predefined);
    assert_eq!(category.user_id, Some(user.id));
    assert!(category.created_at.is_some());
}

#[tokio::test]
async fn test_create_rejects_bad_enums() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let user = create_test_user(&mut conn, &generate_unique_email()).await;

    let mut bad_kind = custom("Transfers", "coin", None);
    bad_kind.kind = "transfer".to_string();
    let err = CategoryService::create(&mut conn, user.id, bad_kind)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

    let err = CategoryService::create(&mut conn, user.id, custom("Bank", "bank", None))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.field.as_deref(), Some("app_scope"));
}

#[tokio::test]
async fn test_list_for_app_merges_predefined_and_own() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let alice = create_test_user(&mut conn, &generate_unique_email()).await;
    let bob = create_test_user(&mut conn, &generate_unique_email()).await;

    seed_category(&mut conn, "Groceries", "coin").await;
    seed_category(&mut conn, "Healthcare", "all").await;
    seed_category(&mut conn, "Childcare", "care").await;

    create(&mut conn, alice.id, custom("Alice Coin", "coin", None)).await;
    create(&mut conn, alice.id, custom("Alice Care", "care", None)).await;
    create(&mut conn, bob.id, custom("Bob Coin", "coin", None)).await;

    let list = CategoryService::list_for_app(&mut conn, Some(alice.id), AppScope::Coin)
        .await
        .unwrap();

    let predefined: Vec<_> = list.predefined.iter().map(|c| c.name.as_str()).collect();
    let own: Vec<_> = list.custom.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(predefined.len(), 2);
    assert!(predefined.contains(&"Groceries"));
    assert!(predefined.contains(&"Healthcare"));
    assert_eq!(own, ["Alice Coin"]);
}

#[tokio::test]
async fn test_get_hides_other_users_categories() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let alice = create_test_user(&mut conn, &generate_unique_email()).await;
    let bob = create_test_user(&mut conn, &generate_unique_email()).await;

    let id = create(&mut conn, alice.id, custom("Private", "coin", None)).await;

    assert!(CategoryService::get(&mut conn, alice.id, id).await.is_ok());
    let err = CategoryService::get(&mut conn, bob.id, id).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_predefined_categories_are_read_only() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let user = create_test_user(&mut conn, &generate_unique_email()).await;
    let groceries = seed_category(&mut conn, "Groceries", "coin").await;

    let err = CategoryService::update(
        &mut conn,
        user.id,
        groceries,
        CategoryUpdate {
            name: Some("My Groceries".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);

    let err = CategoryService::delete(&mut conn, user.id, groceries)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::FORBIDDEN);

    let still_there = CategoryService::get(&mut conn, user.id, groceries).await.unwrap();
    assert_eq!(still_there.name, "Groceries");
}

#[tokio::test]
async fn test_update_custom_category() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let user = create_test_user(&mut conn, &generate_unique_email()).await;
    let groceries = seed_category(&mut conn, "Groceries", "coin").await;

    let id = create(&mut conn, user.id, custom("Snacks", "coin", None)).await;

    let updated = CategoryService::update(
        &mut conn,
        user.id,
        id,
        CategoryUpdate {
            name: Some("Treats".to_string()),
            kind: Some("general".to_string()),
            icon: None,
            parent_id: Some(Some(groceries)),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Treats");
    assert_eq!(updated.kind, CategoryKind::General);
    assert_eq!(updated.icon.as_deref(), Some("mdi-star"));
    assert_eq!(updated.parent_id, Some(groceries));

    let detached = CategoryService::update(
        &mut conn,
        user.id,
        id,
        CategoryUpdate {
            parent_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(detached.parent_id, None);
    assert_eq!(detached.name, "Treats");
    assert_eq!(detached.icon.as_deref(), Some("mdi-star"));

    let no_icon = CategoryService::update(
        &mut conn,
        user.id,
        id,
        CategoryUpdate {
            icon: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(no_icon.icon.is_none());
    assert_eq!(no_icon.name, "Treats");
}

#[tokio::test]
async fn test_parent_must_exist_and_be_visible() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let alice = create_test_user(&mut conn, &generate_unique_email()).await;
    let bob = create_test_user(&mut conn, &generate_unique_email()).await;

    let err = CategoryService::create(&mut conn, alice.id, custom("Orphan", "coin", Some(424_242)))
        .await
        .unwrap_err();
    assert_eq!(err.field.as_deref(), Some("parent_id"));

    let bobs = create(&mut conn, bob.id, custom("Bob's", "coin", None)).await;
    let err = CategoryService::create(&mut conn, alice.id, custom("Child", "coin", Some(bobs)))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_rejects_parent_cycle() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let user = create_test_user(&mut conn, &generate_unique_email()).await;

    let root = create(&mut conn, user.id, custom("Root", "coin", None)).await;
    let child = create(&mut conn, user.id, custom("Child", "coin", Some(root))).await;
    let grandchild = create(&mut conn, user.id, custom("Grandchild", "coin", Some(child))).await;

    // Itself, then its own grandchild.
    for new_parent in [root, grandchild] {
        let err = CategoryService::update(
            &mut conn,
            user.id,
            root,
            CategoryUpdate {
                parent_id: Some(Some(new_parent)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("parent_id"));
    }

    let unchanged = CategoryService::get(&mut conn, user.id, root).await.unwrap();
    assert_eq!(unchanged.parent_id, None);
}

#[tokio::test]
async fn test_delete_custom_category_detaches_children() {
    let pool = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let alice = create_test_user(&mut conn, &generate_unique_email()).await;
    let bob = create_test_user(&mut conn, &generate_unique_email()).await;

    let parent = create(&mut conn, alice.id, custom("Parent", "coin", None)).await;
    let child = create(&mut conn, alice.id, custom("Child", "coin", Some(parent))).await;

    let err = CategoryService::delete(&mut conn, bob.id, parent)
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);

    CategoryService::delete(&mut conn, alice.id, parent)
        .await
        .unwrap();

    let child = CategoryService::get(&mut conn, alice.id, child).await.unwrap();
    assert_eq!(child.parent_id, None);
}
