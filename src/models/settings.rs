use crate::consts;
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[display("light")]
    Light,
    #[display("dark")]
    Dark,
    #[default]
    #[display("system")]
    System,
}

/// Application settings singleton. Exactly one row exists, keyed by
/// [consts::SETTINGS_ROW_ID]; it is created at startup and never deleted.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub id: String,
    pub theme: Theme,
    pub notifications: bool,
    pub reminder_days_before: i64,
    pub currency: String,
    pub language: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            id: consts::SETTINGS_ROW_ID.to_string(),
            theme: Theme::System,
            notifications: true,
            reminder_days_before: consts::DEFAULT_REMINDER_DAYS_BEFORE,
            currency: consts::DEFAULT_CURRENCY.to_string(),
            language: consts::DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Partial update for [AppSettings].
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub reminder_days_before: Option<i64>,
    pub currency: Option<String>,
    pub language: Option<String>,
}
