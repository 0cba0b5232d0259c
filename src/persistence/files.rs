use super::error::{StoreError, StoreResult};
use crate::domain::DailyLog;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the application folder under the desktop (or home) directory
pub const APP_FOLDER: &str = "Captains_Log";

/// Environment variable overriding the data root
pub const ROOT_ENV_VAR: &str = "CAPTAINS_LOG_DIR";

/// Platform-native line terminator used in every file we write
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Resolve the data root: explicit override, then $CAPTAINS_LOG_DIR, then ~/Desktop/Captains_Log,
/// then ~/Captains_Log
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Some(dir) = env::var_os(ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    if let Some(desktop) = dirs::desktop_dir() {
        return Ok(desktop.join(APP_FOLDER));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(APP_FOLDER))
}

/// Create a directory (and parents) if missing. Returns true if it had to be created.
pub fn ensure_dir<P: AsRef<Path>>(dir: P) -> StoreResult<bool> {
    let dir = dir.as_ref();
    if dir.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Create temp file in the same directory so the rename stays on one filesystem
    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path)?;

    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Write content to a file that must not exist yet
pub fn write_new_file<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

/// First unused path derived from `base`: the base itself, then "name (1).ext", "name (2).ext", ...
pub fn unique_path<P: AsRef<Path>>(base: P) -> PathBuf {
    let base = base.as_ref();
    if !base.exists() {
        return base.to_path_buf();
    }

    let dir = base.parent().unwrap_or_else(|| Path::new(""));
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = base
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{} ({}){}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Dates that have a daily log file in `logs_dir`, sorted ascending
pub fn list_log_dates<P: AsRef<Path>>(logs_dir: P) -> StoreResult<BTreeSet<NaiveDate>> {
    let logs_dir = logs_dir.as_ref();
    let list_err = |source| StoreError::ListDir {
        path: logs_dir.to_path_buf(),
        source,
    };

    let mut dates = BTreeSet::new();
    for entry in fs::read_dir(logs_dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        if !entry.path().is_file() {
            continue;
        }

        if let Some(date) = entry
            .file_name()
            .to_str()
            .and_then(DailyLog::parse_file_name)
        {
            dates.insert(date);
        }
    }

    Ok(dates)
}
