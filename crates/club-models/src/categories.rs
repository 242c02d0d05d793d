//! Shared category models and DTOs.
//!
//! Categories come in two flavours:
//!
//! 1. Predefined (`is_predefined = true`, no owner), seeded once and visible
//!    to every user.
//! 2. Custom (`is_predefined = false`, owned by `user_id`), visible only to
//!    their owner.
//!
//! Each category is scoped to one club app or to all of them through
//! [`AppScope`]. The database column holding [`CategoryKind`] is named
//! `type`, and so is the JSON field.

use chrono::{DateTime, Utc};
use club_core::AppError;
use club_core::serde::{deserialize_clearable_string, deserialize_optional_string, deserialize_some};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Whether a category tracks money in, money out, or neither.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    General,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 3] = [Self::Income, Self::Expense, Self::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::General => "general",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("must be one of: income, expense, general (got '{}')", s))
    }
}

/// The club app a row belongs to, or `All` for rows shared by every app.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AppScope {
    Coin,
    Care,
    Career,
    Campfire,
    All,
}

impl AppScope {
    pub const ALL: [AppScope; 5] = [
        Self::Coin,
        Self::Care,
        Self::Career,
        Self::Campfire,
        Self::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coin => "coin",
            Self::Care => "care",
            Self::Career => "career",
            Self::Campfire => "campfire",
            Self::All => "all",
        }
    }

    /// True for a concrete app, false for [`AppScope::All`].
    pub fn is_single_app(&self) -> bool {
        !matches!(self, Self::All)
    }
}

impl fmt::Display for AppScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "must be one of: coin, care, career, campfire, all (got '{}')",
                    s
                )
            })
    }
}

/// A category row from `shared_categories`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SharedCategory {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub kind: CategoryKind,
    pub icon: Option<String>,
    pub app_scope: AppScope,
    pub is_predefined: bool,
    pub user_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl SharedCategory {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        !self.is_predefined && self.user_id == Some(user_id)
    }

    /// Predefined rows are visible to everyone, custom rows to their owner.
    pub fn is_visible_to(&self, user_id: Option<i64>) -> bool {
        self.is_predefined || (user_id.is_some() && self.user_id == user_id)
    }
}

fn enum_error<E: fmt::Display>(code: &'static str, err: E) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(err.to_string().into());
    error
}

pub fn validate_category_kind(value: &str) -> Result<(), ValidationError> {
    CategoryKind::from_str(value)
        .map(|_| ())
        .map_err(|e| enum_error("category_kind", e))
}

pub fn validate_app_scope(value: &str) -> Result<(), ValidationError> {
    AppScope::from_str(value)
        .map(|_| ())
        .map_err(|e| enum_error("app_scope", e))
}

fn parse_field<T>(field: &'static str, value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|reason| AppError::validation(field, reason))
}

/// Payload for creating a custom category.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[serde(rename = "type", alias = "kind")]
    #[validate(custom(function = "validate_category_kind"))]
    #[schema(example = "expense")]
    pub kind: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub icon: Option<String>,
    #[validate(custom(function = "validate_app_scope"))]
    #[schema(example = "coin")]
    pub app_scope: String,
    pub parent_id: Option<i64>,
}

impl CategoryCreate {
    pub fn kind(&self) -> Result<CategoryKind, AppError> {
        parse_field("type", &self.kind)
    }

    pub fn app_scope(&self) -> Result<AppScope, AppError> {
        parse_field("app_scope", &self.app_scope)
    }
}

/// Partial update for a custom category. Absent fields are left unchanged;
/// `"icon": null` (or blank) removes the icon and `"parent_id": null`
/// detaches the category from its parent. The name can be changed but not
/// cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[serde(default, rename = "type", alias = "kind")]
    #[validate(custom(function = "validate_category_kind"))]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_clearable_string")]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    #[schema(value_type = Option<String>)]
    pub icon: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i64>)]
    pub parent_id: Option<Option<i64>>,
}

impl CategoryUpdate {
    pub fn kind(&self) -> Result<Option<CategoryKind>, AppError> {
        self.kind
            .as_deref()
            .map(|k| parse_field("type", k))
            .transpose()
    }
}

/// Category as exposed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub icon: Option<String>,
    pub app_scope: AppScope,
    pub parent_id: Option<i64>,
    pub is_predefined: bool,
    pub user_id: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&SharedCategory> for CategoryResponse {
    fn from(category: &SharedCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            kind: category.kind,
            icon: category.icon.clone(),
            app_scope: category.app_scope,
            parent_id: category.parent_id,
            is_predefined: category.is_predefined,
            user_id: category.user_id,
            created_at: category.created_at,
        }
    }
}

impl From<SharedCategory> for CategoryResponse {
    fn from(category: SharedCategory) -> Self {
        Self::from(&category)
    }
}

/// Categories available to a user in one app, split by origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub predefined: Vec<CategoryResponse>,
    pub custom: Vec<CategoryResponse>,
}

impl CategoryListResponse {
    pub fn len(&self) -> usize {
        self.predefined.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<SharedCategory> for CategoryListResponse {
    fn from_iter<I: IntoIterator<Item = SharedCategory>>(iter: I) -> Self {
        let mut list = Self::default();
        for category in iter {
            if category.is_predefined {
                list.predefined.push(category.into());
            } else {
                list.custom.push(category.into());
            }
        }
        list
    }
}
