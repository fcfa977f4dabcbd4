//! User settings for pocket-ledger
//!
//! Display preferences and the knobs of the derived views (how many recent
//! expenses, how many months of history, which color assignment).

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::{DEFAULT_EXPENSE_NAME, DISPLAY_DATE_FORMAT};
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format shown to the user (strftime format); storage always
    /// uses `YYYY-MM-DD`
    #[serde(default = "default_date_format")]
    pub display_date_format: String,

    /// Name given to expenses entered without one
    #[serde(default = "default_expense_name")]
    pub default_expense_name: String,

    /// Number of expenses in the "recent" list
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Months of history before the reference month in the monthly series
    #[serde(default = "default_months_back")]
    pub months_back: u32,

    /// Color categories from a fixed table instead of by position
    #[serde(default)]
    pub stable_category_colors: bool,

    /// Append every mutation to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    DISPLAY_DATE_FORMAT.to_string()
}

fn default_expense_name() -> String {
    DEFAULT_EXPENSE_NAME.to_string()
}

fn default_recent_limit() -> usize {
    3
}

fn default_months_back() -> u32 {
    crate::reports::series::DEFAULT_MONTHS_BACK
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            display_date_format: default_date_format(),
            default_expense_name: default_expense_name(),
            recent_limit: default_recent_limit(),
            months_back: default_months_back(),
            stable_category_colors: false,
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk atomically
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
