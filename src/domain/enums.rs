use chrono::{Datelike, Duration, NaiveDate};

/// Which month an account summary covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthChoice {
    ThisMonth,
    LastMonth,
    /// Do not build a summary
    Cancel,
}

impl MonthChoice {
    /// Parse from a user-facing word like "this" or "last"
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "this" | "current" => Some(Self::ThisMonth),
            "last" | "previous" => Some(Self::LastMonth),
            "cancel" | "none" => Some(Self::Cancel),
            _ => None,
        }
    }

    /// Inclusive date range covered by this choice, relative to `today`.
    /// `Cancel` has no range.
    pub fn date_range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::ThisMonth => Some((first_of_month(today), today)),
            Self::LastMonth => {
                let last_month_end = first_of_month(today) - Duration::days(1);
                Some((first_of_month(last_month_end), last_month_end))
            }
            Self::Cancel => None,
        }
    }
}

/// Kind of generated report file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Weekly,
    Account,
}

impl SummaryKind {
    /// File name prefix, followed by `_YYYYMMDD.txt`
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Weekly => "WeeklySummary",
            Self::Account => "AccountSummary",
        }
    }

    /// Base file name for a report generated on `today`
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("{}_{}.txt", self.file_prefix(), today.format("%Y%m%d"))
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
