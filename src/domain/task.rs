use super::hours::parse_hours;
use std::fmt;

/// Account used when a quick-entry line carries no `#TAG`
pub const DEFAULT_ACCOUNT: &str = "MISC";

/// One row of a daily log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub is_complete: bool,
    pub title: String,
    /// Hours spent, kept as text so "1.5" round-trips exactly
    pub time: String,
    /// Account tag, conventionally an upper-case short code
    pub account: String,
}

impl Default for TaskEntry {
    fn default() -> Self {
        Self {
            is_complete: false,
            title: String::new(),
            time: "0".to_string(),
            account: String::new(),
        }
    }
}

impl TaskEntry {
    pub fn new(title: impl Into<String>, time: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            is_complete: false,
            title: title.into(),
            time: time.into(),
            account: account.into(),
        }
    }

    /// Numeric hours, or 0 when the stored text is not a number
    pub fn hours(&self) -> f64 {
        parse_hours(&self.time).unwrap_or(0.0)
    }

    /// Icon shown in task lists
    pub fn status_icon(&self) -> &'static str {
        if self.is_complete {
            "✅"
        } else {
            "❌"
        }
    }

    /// Check mark used in summary reports
    pub fn check_mark(&self) -> &'static str {
        if self.is_complete {
            "✔"
        } else {
            " "
        }
    }

    /// Account key used for grouping (case-insensitive)
    pub fn account_key(&self) -> String {
        self.account.to_uppercase()
    }
}

impl fmt::Display for TaskEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.account, self.title)
    }
}
