use crate::error::ConfigError;
use analytics::{SortKey, SortOrder};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub views: ViewSettings,
}

/// Contains parameters for the CSV download.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// strftime pattern for the date column. The default matches the dashboard's
    /// en-US display format, e.g. `Jan 5, 2024, 03:45 PM`.
    pub date_format: String,
    /// Download name for a single user's history.
    pub history_filename: String,
    /// Download name for the administrative view of all predictions.
    pub admin_filename: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y, %I:%M %p".to_string(),
            history_filename: "prediction_history.csv".to_string(),
            admin_filename: "all_predictions.csv".to_string(),
        }
    }
}

/// Defaults shared by the dashboard tables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub default_sort_key: SortKey,
    pub default_sort_order: SortOrder,
    /// Rows in the admin dashboard's recent-predictions table.
    pub recent_predictions: usize,
    /// Rows in the admin dashboard's recent-users list.
    pub recent_users: usize,
    /// Rows in a user's own dashboard overview.
    pub user_recent_predictions: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_sort_key: SortKey::Date,
            default_sort_order: SortOrder::Desc,
            recent_predictions: 10,
            recent_users: 5,
            user_recent_predictions: 5,
        }
    }
}

impl Settings {
    /// Rejects settings that would produce broken downloads or empty tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.export.validate()?;
        self.views.validate()
    }
}

impl ExportSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "export.date_format",
                reason: "must not be empty".to_string(),
            });
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid {
                field: "export.date_format",
                reason: format!("'{}' is not a valid strftime pattern", self.date_format),
            });
        }
        for (field, name) in [
            ("export.history_filename", &self.history_filename),
            ("export.admin_filename", &self.admin_filename),
        ] {
            if !name.ends_with(".csv") || name.len() <= ".csv".len() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a .csv file name, got '{name}'"),
                });
            }
        }
        Ok(())
    }
}

impl ViewSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        for (field, rows) in [
            ("views.recent_predictions", self.recent_predictions),
            ("views.recent_users", self.recent_users),
            ("views.user_recent_predictions", self.user_recent_predictions),
        ] {
            if rows == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}
