use super::error::{StoreError, StoreResult};
use super::files::{atomic_write, read_file};
use super::parser::parse_log_file;
use super::serializer::serialize_log_file;
use crate::domain::TaskEntry;
use std::path::Path;

/// Read a daily log file. A missing file is an empty log, not an error.
pub fn read_log_file<P: AsRef<Path>>(path: P) -> StoreResult<Vec<TaskEntry>> {
    let path = path.as_ref();
    let content = read_file(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.map(|c| parse_log_file(&c)).unwrap_or_default())
}

/// Overwrite a daily log file with `tasks`, creating its folder if needed
pub fn write_log_file<P: AsRef<Path>>(path: P, tasks: &[TaskEntry], quote: bool) -> StoreResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            super::files::ensure_dir(parent)?;
        }
    }

    serialize_log_file(tasks, quote)
        .and_then(|content| atomic_write(path, &content))
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}
