use super::error::{StoreError, StoreResult};
use super::files::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file name inside the data root
pub const SETTINGS_FILE: &str = "settings.json";

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder (under the data root) holding LogYYYYMMDD.csv files
    pub logs_folder: String,
    /// Folder (under the data root) holding generated summaries
    pub summaries_folder: String,
    /// Quote fields containing commas or quotes when writing logs.
    /// Off reproduces the old unquoted writer exactly.
    pub quote_on_write: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logs_folder: "Logs".to_string(),
            summaries_folder: "Summaries".to_string(),
            quote_on_write: true,
        }
    }
}

/// Load settings from a settings.json file, defaults if it doesn't exist
pub fn load_settings<P: AsRef<Path>>(path: P) -> StoreResult<Settings> {
    let path = path.as_ref();

    let content = match super::files::read_file(path) {
        Ok(Some(content)) => content,
        Ok(None) => return Ok(Settings::default()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| StoreError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

/// Save settings to a settings.json file
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> StoreResult<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(settings).map_err(|source| StoreError::Settings {
        path: path.to_path_buf(),
        source,
    })?;

    atomic_write(path, &json).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
