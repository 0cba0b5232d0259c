use crate::domain::{file_name_for, MonthChoice, TaskEntry};
use crate::input::parse_quick_entry;
use crate::persistence::{
    ensure_dir, list_log_dates, load_settings, read_log_file, save_settings, write_log_file,
    Settings, StoreResult, SETTINGS_FILE,
};
use crate::report::{generate_account_summary, generate_weekly_summary};
use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Entry point for the shell: one data root holding a logs folder, a summaries folder
/// and settings.json. Holds no task state of its own.
#[derive(Debug, Clone)]
pub struct Logbook {
    root: PathBuf,
    settings: Settings,
}

impl Logbook {
    /// Open a logbook rooted at `root`, reading settings.json when present.
    /// Nothing is created on disk until `ensure_folders`.
    pub fn open<P: Into<PathBuf>>(root: P) -> StoreResult<Self> {
        let root = root.into();
        let settings = load_settings(root.join(SETTINGS_FILE))?;
        Ok(Self { root, settings })
    }

    /// Open with explicit settings, ignoring any settings.json
    pub fn with_settings<P: Into<PathBuf>>(root: P, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(&self.settings.logs_folder)
    }

    pub fn summaries_dir(&self) -> PathBuf {
        self.root.join(&self.settings.summaries_folder)
    }

    /// Create the root, logs and summaries folders if missing.
    /// Returns true on first run (the root itself did not exist); the default settings
    /// file is written then.
    pub fn ensure_folders(&self) -> StoreResult<bool> {
        let first_run = ensure_dir(&self.root)?;
        ensure_dir(self.logs_dir())?;
        ensure_dir(self.summaries_dir())?;

        if first_run {
            save_settings(self.root.join(SETTINGS_FILE), &self.settings)?;
            info!("Created logbook at {}", self.root.display());
        }

        Ok(first_run)
    }

    /// Path of the daily log file for `date`
    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.logs_dir().join(file_name_for(date))
    }

    pub fn log_exists(&self, date: NaiveDate) -> bool {
        self.log_path(date).is_file()
    }

    /// Tasks logged for `date`; empty if there is no file for that day
    pub fn load_log(&self, date: NaiveDate) -> StoreResult<Vec<TaskEntry>> {
        read_log_file(self.log_path(date))
    }

    /// Overwrite the log for `date` with `tasks`
    pub fn save_log(&self, date: NaiveDate, tasks: &[TaskEntry]) -> StoreResult<()> {
        write_log_file(self.log_path(date), tasks, self.settings.quote_on_write)
    }

    /// Dates that have a log file, ascending
    pub fn log_dates(&self) -> StoreResult<BTreeSet<NaiveDate>> {
        let logs_dir = self.logs_dir();
        if !logs_dir.is_dir() {
            return Ok(BTreeSet::new());
        }
        list_log_dates(logs_dir)
    }

    pub fn parse_quick_entry(&self, text: &str) -> Vec<TaskEntry> {
        parse_quick_entry(text)
    }

    /// Write the weekly summary for the seven days ending `today`
    pub fn build_weekly_summary(&self, today: NaiveDate) -> Result<PathBuf> {
        self.ensure_folders()?;
        generate_weekly_summary(&self.logs_dir(), &self.summaries_dir(), today)
    }

    /// Write the account summary for the chosen month; `None` when cancelled
    pub fn build_account_summary(&self, choice: MonthChoice, today: NaiveDate) -> Result<Option<PathBuf>> {
        if choice == MonthChoice::Cancel {
            return Ok(None);
        }
        self.ensure_folders()?;
        generate_account_summary(&self.logs_dir(), &self.summaries_dir(), choice, today)
    }
}
