//! # Club Models
//!
//! Entity rows and request/response DTOs shared by the club apps.
//!
//! # Modules
//!
//! - [`users`]: User accounts, registration and login payloads
//! - [`categories`]: Predefined and custom spending categories
//! - [`settings`]: Per-app user settings
//! - [`value_types`]: Validated newtypes such as [`Email`]
//!
//! # Example
//!
//! ```ignore
//! use club_models::{AppScope, CategoryCreate, UserCreate};
//! use validator::Validate;
//!
//! let dto: UserCreate = serde_json::from_str(body)?;
//! dto.validate()?;
//! ```

pub mod categories;
pub mod settings;
pub mod users;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use categories::{
    AppScope, CategoryCreate, CategoryKind, CategoryListResponse, CategoryResponse,
    CategoryUpdate, SharedCategory,
};
pub use settings::{AppSettings, SettingResponse, SettingUpsert};
pub use users::{
    ChangePasswordRequest, TokenResponse, User, UserCreate, UserLogin, UserResponse, UserUpdate,
};
pub use value_types::{Email, ValueTypeError};
