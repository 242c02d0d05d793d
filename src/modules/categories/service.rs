use std::collections::HashSet;

use anyhow::anyhow;
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;

use club_core::AppError;
use club_models::{AppScope, CategoryCreate, CategoryListResponse, CategoryUpdate, SharedCategory};

use crate::validator::validate_dto;

const CATEGORY_COLUMNS: &str =
    "id, name, type, icon, app_scope, is_predefined, user_id, parent_id, created_at";

fn read_only() -> AppError {
    AppError::forbidden("Predefined categories cannot be modified".to_string())
}

pub struct CategoryService;

impl CategoryService {
    /// Predefined categories plus the caller's own, limited to rows scoped to
    /// `app` or to every app. Pass `None` to list predefined rows only.
    #[instrument(skip(conn))]
    pub async fn list_for_app(
        conn: &mut SqliteConnection,
        user_id: Option<i64>,
        app: AppScope,
    ) -> Result<CategoryListResponse, AppError> {
        let categories = sqlx::query_as::<_, SharedCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM shared_categories \
             WHERE app_scope IN (?, 'all') AND (is_predefined = 1 OR user_id = ?) \
             ORDER BY is_predefined DESC, type, name"
        ))
        .bind(app)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(categories.into_iter().collect())
    }

    /// A category the caller can see. Other users' rows are reported as missing.
    #[instrument(skip(conn))]
    pub async fn get(
        conn: &mut SqliteConnection,
        user_id: i64,
        category_id: i64,
    ) -> Result<SharedCategory, AppError> {
        sqlx::query_as::<_, SharedCategory>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM shared_categories WHERE id = ?"
        ))
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?
        .filter(|category| category.is_visible_to(Some(user_id)))
        .ok_or_else(|| AppError::not_found(anyhow!("Category with id {} not found", category_id)))
    }

    #[instrument(skip(conn))]
    pub async fn create(
        conn: &mut SqliteConnection,
        user_id: i64,
        dto: CategoryCreate,
    ) -> Result<SharedCategory, AppError> {
        validate_dto(&dto)?;
        let kind = dto.kind()?;
        let app_scope = dto.app_scope()?;

        if let Some(parent_id) = dto.parent_id {
            Self::require_parent(conn, user_id, parent_id).await?;
        }

        let category = sqlx::query_as::<_, SharedCategory>(&format!(
            "INSERT INTO shared_categories \
             (name, type, icon, app_scope, is_predefined, user_id, parent_id, created_at) \
             VALUES (?, ?, ?, ?, 0, ?, ?, ?) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(kind)
        .bind(&dto.icon)
        .bind(app_scope)
        .bind(user_id)
        .bind(dto.parent_id)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        tracing::info!(category_id = category.id, user_id, "custom category created");
        Ok(category)
    }

    #[instrument(skip(conn))]
    pub async fn update(
        conn: &mut SqliteConnection,
        user_id: i64,
        category_id: i64,
        dto: CategoryUpdate,
    ) -> Result<SharedCategory, AppError> {
        validate_dto(&dto)?;
        let existing = Self::owned(conn, user_id, category_id).await?;

        let parent_id = match dto.parent_id {
            None => existing.parent_id,
            Some(None) => None,
            Some(Some(parent_id)) => {
                Self::require_parent(conn, user_id, parent_id).await?;
                Self::reject_cycle(conn, category_id, parent_id).await?;
                Some(parent_id)
            }
        };

        let kind = dto.kind()?.unwrap_or(existing.kind);
        let name = dto.name.unwrap_or(existing.name);
        let icon = dto.icon.unwrap_or(existing.icon);

        let category = sqlx::query_as::<_, SharedCategory>(&format!(
            "UPDATE shared_categories SET name = ?, type = ?, icon = ?, parent_id = ? \
             WHERE id = ? RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&name)
        .bind(kind)
        .bind(&icon)
        .bind(parent_id)
        .bind(category_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(category)
    }

    /// Deletes a custom category. Children keep existing with no parent.
    #[instrument(skip(conn))]
    pub async fn delete(
        conn: &mut SqliteConnection,
        user_id: i64,
        category_id: i64,
    ) -> Result<(), AppError> {
        Self::owned(conn, user_id, category_id).await?;

        sqlx::query("DELETE FROM shared_categories WHERE id = ?")
            .bind(category_id)
            .execute(&mut *conn)
            .await?;

        tracing::info!(category_id, user_id, "custom category deleted");
        Ok(())
    }

    async fn owned(
        conn: &mut SqliteConnection,
        user_id: i64,
        category_id: i64,
    ) -> Result<SharedCategory, AppError> {
        let category = Self::get(conn, user_id, category_id).await?;

        if category.is_predefined {
            return Err(read_only());
        }
        if !category.is_owned_by(user_id) {
            return Err(AppError::forbidden("You do not own this category".to_string()));
        }

        Ok(category)
    }

    async fn require_parent(
        conn: &mut SqliteConnection,
        user_id: i64,
        parent_id: i64,
    ) -> Result<(), AppError> {
        match Self::get(conn, user_id, parent_id).await {
            Ok(_) => Ok(()),
            Err(err) if err.status == axum::http::StatusCode::NOT_FOUND => Err(
                AppError::validation("parent_id", "must reference an existing category"),
            ),
            Err(err) => Err(err),
        }
    }

    /// Walks up from `parent_id`; reaching `category_id` means the new parent
    /// is one of the category's own descendants.
    async fn reject_cycle(
        conn: &mut SqliteConnection,
        category_id: i64,
        parent_id: i64,
    ) -> Result<(), AppError> {
        let mut seen = HashSet::new();
        let mut current = Some(parent_id);

        while let Some(id) = current {
            if id == category_id || !seen.insert(id) {
                return Err(AppError::validation(
                    "parent_id",
                    "would create a cycle in the category tree",
                ));
            }

            current = sqlx::query_scalar::<_, Option<i64>>(
                "SELECT parent_id FROM shared_categories WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .flatten();
        }

        Ok(())
    }
}
