//! # Common Club
//!
//! Shared building blocks for the club apps (coin, care, career, campfire):
//! one user account, one category catalog and one settings store, used by
//! every app, next to each app's own database.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── club-core/          # AppError, password hashing, serde helpers
//! ├── club-config/        # JwtConfig, DatabaseConfig, LogConfig
//! ├── club-auth/          # Access token issuance and verification
//! ├── club-models/        # Entity rows and request/response DTOs
//! ├── club-db/            # SQLite pools, sessions, embedded migrations
//! ├── club-observability/ # tracing-subscriber setup
//! └── club-cli/           # Database bootstrap and admin commands
//! src/
//! ├── middleware/         # Bearer token extractors
//! ├── modules/            # User, category and settings services
//! ├── state.rs            # ClubState for downstream routers
//! └── validator.rs        # validate_dto and ValidatedJson
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use axum::{Json, Router, extract::State, routing::get};
//! use common_club::{
//!     CategoryService, ClubState, CurrentUserId, init_club_state,
//!     models::{AppScope, CategoryListResponse},
//!     AppError,
//! };
//!
//! async fn categories(
//!     State(state): State<ClubState>,
//!     CurrentUserId(user_id): CurrentUserId,
//! ) -> Result<Json<CategoryListResponse>, AppError> {
//!     let mut session = state.databases.common.acquire().await?;
//!     let list = CategoryService::list_for_app(&mut session, Some(user_id), AppScope::Coin).await?;
//!     Ok(Json(list))
//! }
//!
//! let app = Router::new()
//!     .route("/categories", get(categories))
//!     .with_state(init_club_state().await?);
//! ```

pub mod middleware;
pub mod modules;
pub mod state;
pub mod validator;

pub use club_auth as auth;
pub use club_config as config;
pub use club_db as db;
pub use club_models as models;

pub use club_core::AppError;
pub use middleware::{AuthUser, CurrentUserEmail, CurrentUserId, authenticate};
pub use modules::categories::CategoryService;
pub use modules::settings::SettingsService;
pub use modules::users::UserService;
pub use state::{ClubState, init_club_state};
pub use validator::{ValidatedJson, validate_dto};
