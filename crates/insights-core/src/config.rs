//! Application settings
//!
//! Read from `settings.json` in the app config directory. Every field has a
//! default, so a partial or missing file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";
/// Replaces the configured database path when set
pub const DB_PATH_ENV: &str = "INVENTORY_INSIGHTS_DB";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Relative to the app data directory unless absolute
    pub database_file: String,
    /// Base of product edit links
    pub admin_url: String,
    pub export_prefix: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_file: "inventory_insights.db".to_string(),
            admin_url: "/wp-admin".to_string(),
            export_prefix: "inventory-insights".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `<config_dir>/settings.json`, falling back to defaults
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join(SETTINGS_FILE);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => {
                log::info!("no settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        if let Ok(from_env) = std::env::var(DB_PATH_ENV) {
            if !from_env.trim().is_empty() {
                return PathBuf::from(from_env);
            }
        }
        let file = Path::new(&self.database_file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            data_dir.join(file)
        }
    }
}
