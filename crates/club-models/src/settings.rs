//! Per-user, per-app key/value settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::categories::AppScope;

pub const MAX_SETTING_KEY_LEN: u64 = 100;
pub const MAX_SETTING_VALUE_LEN: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AppSettings {
    pub id: i64,
    pub user_id: i64,
    pub app_name: AppScope,
    pub key: String,
    pub value: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Write one setting. A `null` value is stored as SQL `NULL`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SettingUpsert {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    #[schema(example = "currency")]
    pub key: String,
    #[validate(length(max = 10000, message = "must be at most 10000 characters"))]
    #[schema(example = "EUR")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SettingResponse {
    pub app_name: AppScope,
    pub key: String,
    pub value: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AppSettings> for SettingResponse {
    fn from(setting: AppSettings) -> Self {
        Self {
            app_name: setting.app_name,
            key: setting.key,
            value: setting.value,
            updated_at: setting.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_key_bounds() {
        let ok = SettingUpsert {
            key: "theme".to_string(),
            value: Some("dark".to_string()),
        };
        assert!(ok.validate().is_ok());

        let empty = SettingUpsert {
            key: String::new(),
            value: None,
        };
        assert!(empty.validate().is_err());

        let long = SettingUpsert {
            key: "k".repeat(MAX_SETTING_KEY_LEN as usize + 1),
            value: None,
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_setting_value_bound() {
        let at_limit = SettingUpsert {
            key: "notes".to_string(),
            value: Some("v".repeat(MAX_SETTING_VALUE_LEN as usize)),
        };
        assert!(at_limit.validate().is_ok());

        let over = SettingUpsert {
            value: Some("v".repeat(MAX_SETTING_VALUE_LEN as usize + 1)),
            ..at_limit
        };
        let errors = over.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("value"));
    }

    #[test]
    fn test_response_drops_row_identity() {
        let row = AppSettings {
            id: 9,
            user_id: 3,
            app_name: AppScope::Coin,
            key: "currency".to_string(),
            value: Some("EUR".to_string()),
            updated_at: None,
        };
        let json = serde_json::to_value(SettingResponse::from(row)).unwrap();
        assert_eq!(json["app_name"], "coin");
        assert!(json.get("user_id").is_none());
        assert!(json.get("id").is_none());
    }
}
