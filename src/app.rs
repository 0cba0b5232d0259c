use crate::domain::TaskEntry;
use crate::input::{is_valid_time_input, parse_quick_entry};
use crate::logbook::Logbook;
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;

/// Result of adding quick-entry tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: usize,
    /// No log file existed for the date before this write
    pub created_file: bool,
}

/// The task list for the date currently on screen.
///
/// Tasks are addressed by position. Every change is written to disk straight away and only
/// kept in memory once the write succeeded. Switching dates means opening a new session.
#[derive(Debug, Clone)]
pub struct LogSession {
    logbook: Logbook,
    date: NaiveDate,
    tasks: Vec<TaskEntry>,
}

impl LogSession {
    /// Load the log for `date`
    pub fn open(logbook: Logbook, date: NaiveDate) -> Result<Self> {
        let tasks = logbook
            .load_log(date)
            .with_context(|| format!("Could not load tasks for {}", date))?;
        Ok(Self {
            logbook,
            date,
            tasks,
        })
    }

    /// Start from an empty list, used when reading the day's file failed
    pub fn empty(logbook: Logbook, date: NaiveDate) -> Self {
        Self {
            logbook,
            date,
            tasks: Vec::new(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn tasks(&self) -> &[TaskEntry] {
        &self.tasks
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// Parse quick-entry text, append the tasks and save
    pub fn add_quick_entries(&mut self, text: &str) -> Result<AddOutcome> {
        let new_tasks = parse_quick_entry(text);
        if new_tasks.is_empty() {
            return Ok(AddOutcome {
                added: 0,
                created_file: false,
            });
        }

        let created_file = !self.logbook.log_exists(self.date);
        let added = new_tasks.len();

        let mut updated = self.tasks.clone();
        updated.extend(new_tasks);
        self.commit(updated)?;

        if created_file {
            info!("Created log file for {}", self.date);
        }
        Ok(AddOutcome {
            added,
            created_file,
        })
    }

    /// Mark the selected tasks complete or incomplete
    pub fn set_complete(&mut self, indices: &[usize], complete: bool) -> Result<()> {
        let selected = self.selection(indices)?;
        let mut updated = self.tasks.clone();
        for index in selected {
            updated[index].is_complete = complete;
        }
        self.commit(updated)
    }

    /// Flip the status of each selected task. Returns how many were flipped.
    pub fn toggle_status(&mut self, indices: &[usize]) -> Result<usize> {
        let selected = self.selection(indices)?;
        let mut updated = self.tasks.clone();
        for &index in &selected {
            updated[index].is_complete = !updated[index].is_complete;
        }
        self.commit(updated)?;
        Ok(selected.len())
    }

    /// Remove the selected tasks. Returns how many were removed.
    pub fn delete(&mut self, indices: &[usize]) -> Result<usize> {
        let selected = self.selection(indices)?;
        let updated: Vec<TaskEntry> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(index, _)| !selected.contains(index))
            .map(|(_, task)| task.clone())
            .collect();
        self.commit(updated)?;
        Ok(selected.len())
    }

    /// Replace the hours text of one task. Only digits with at most one '.' are accepted.
    pub fn set_time(&mut self, index: usize, time: &str) -> Result<()> {
        let time = time.trim();
        if !is_valid_time_input(time) {
            bail!("Hours must be a number like 1.5: {:?}", time);
        }

        self.selection(&[index])?;
        let mut updated = self.tasks.clone();
        updated[index].time = time.to_string();
        self.commit(updated)
    }

    /// Write the current list as-is
    pub fn save(&self) -> Result<()> {
        self.logbook
            .save_log(self.date, &self.tasks)
            .with_context(|| format!("Could not save tasks for {}", self.date))
    }

    /// Validate and de-duplicate a selection
    fn selection(&self, indices: &[usize]) -> Result<BTreeSet<usize>> {
        if indices.is_empty() {
            bail!("No tasks selected");
        }

        let mut selected = BTreeSet::new();
        for &index in indices {
            if index >= self.tasks.len() {
                bail!(
                    "No task number {} (the list has {} tasks)",
                    index + 1,
                    self.tasks.len()
                );
            }
            selected.insert(index);
        }
        Ok(selected)
    }

    /// Persist `updated` and adopt it; on failure the session keeps its previous list
    fn commit(&mut self, updated: Vec<TaskEntry>) -> Result<()> {
        self.logbook
            .save_log(self.date, &updated)
            .with_context(|| format!("Could not save tasks for {}", self.date))?;
        self.tasks = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn session_in(root: &std::path::Path) -> LogSession {
        let logbook = Logbook::open(root).unwrap();
        logbook.ensure_folders().unwrap();
        LogSession::open(logbook, day()).unwrap()
    }

    fn titles(session: &LogSession) -> Vec<String> {
        session.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_open_missing_day_is_empty() {
        let temp_dir = tempdir().unwrap();
        let session = session_in(temp_dir.path());
        assert!(session.tasks().is_empty());
        assert_eq!(session.date(), day());
    }

    #[test]
    fn test_add_reports_new_file() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());

        let first = session.add_quick_entries("Fix bug #infra @2.5").unwrap();
        assert_eq!(first, AddOutcome { added: 1, created_file: true });

        let second = session.add_quick_entries("Generic task\n@3 #ops Review PR").unwrap();
        assert_eq!(second, AddOutcome { added: 2, created_file: false });

        assert_eq!(titles(&session), vec!["Fix bug", "Generic task", "Review PR"]);

        // What's on disk matches the session
        let reloaded = LogSession::open(session.logbook().clone(), day()).unwrap();
        assert_eq!(reloaded.tasks(), session.tasks());
    }

    #[test]
    fn test_add_blank_text_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());

        let outcome = session.add_quick_entries("\n\r\n").unwrap();
        assert_eq!(outcome, AddOutcome { added: 0, created_file: false });
        assert!(!session.logbook().log_exists(day()));
    }

    #[test]
    fn test_set_complete_and_toggle() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a\nb\nc").unwrap();

        session.set_complete(&[0, 2], true).unwrap();
        let flags: Vec<bool> = session.tasks().iter().map(|t| t.is_complete).collect();
        assert_eq!(flags, vec![true, false, true]);

        let flipped = session.toggle_status(&[0, 1, 1]).unwrap();
        assert_eq!(flipped, 2);
        let flags: Vec<bool> = session.tasks().iter().map(|t| t.is_complete).collect();
        assert_eq!(flags, vec![false, true, true]);

        session.set_complete(&[2], false).unwrap();
        let reloaded = session.logbook().load_log(day()).unwrap();
        let flags: Vec<bool> = reloaded.iter().map(|t| t.is_complete).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_delete_keeps_order_of_the_rest() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a\nb\nc\nd").unwrap();

        let removed = session.delete(&[3, 1]).unwrap();
        assert_eq!(removed, 2);
        assert_eq!(titles(&session), vec!["a", "c"]);

        let reloaded = session.logbook().load_log(day()).unwrap();
        assert_eq!(reloaded, session.tasks());
    }

    #[test]
    fn test_delete_duplicate_titles_by_position() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("same\nsame\nsame").unwrap();

        session.delete(&[1]).unwrap();
        assert_eq!(session.tasks().len(), 2);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a").unwrap();

        let err = session.toggle_status(&[]).unwrap_err();
        assert_eq!(err.to_string(), "No tasks selected");
    }

    #[test]
    fn test_out_of_range_selection_changes_nothing() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a\nb").unwrap();

        assert!(session.delete(&[0, 5]).is_err());
        assert_eq!(titles(&session), vec!["a", "b"]);
    }

    #[test]
    fn test_set_time() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a @1").unwrap();

        session.set_time(0, " 2.75 ").unwrap();
        assert_eq!(session.tasks()[0].time, "2.75");

        assert!(session.set_time(0, "3h").is_err());
        assert!(session.set_time(0, "").is_err());
        assert!(session.set_time(0, "  ").is_err());
        assert!(session.set_time(0, "1.2.3").is_err());
        assert!(session.set_time(4, "1").is_err());
        assert_eq!(session.tasks()[0].time, "2.75");
    }

    #[test]
    fn test_failed_write_keeps_previous_list() {
        let temp_dir = tempdir().unwrap();
        let mut session = session_in(temp_dir.path());
        session.add_quick_entries("a\nb").unwrap();

        // Replace the log file with a directory so the next write fails
        let path = session.logbook().log_path(day());
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(session.delete(&[0]).is_err());
        assert!(session.add_quick_entries("c").is_err());
        assert_eq!(titles(&session), vec!["a", "b"]);
    }

    #[test]
    fn test_save_writes_current_list() {
        let temp_dir = tempdir().unwrap();
        let logbook = Logbook::open(temp_dir.path()).unwrap();
        let session = LogSession::empty(logbook, day());

        session.save().unwrap();
        assert!(session.logbook().log_exists(day()));
        assert!(session.logbook().load_log(day()).unwrap().is_empty());
    }
}
