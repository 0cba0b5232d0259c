use super::task::TaskEntry;
use chrono::NaiveDate;

/// Tasks recorded for a single calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLog {
    pub date: NaiveDate,
    pub tasks: Vec<TaskEntry>,
}

impl DailyLog {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
        }
    }

    /// File name for this day's log (LogYYYYMMDD.csv)
    pub fn file_name(&self) -> String {
        file_name_for(self.date)
    }

    /// Recover the date from a daily log file name.
    /// Only `Log` + 8 digits + `.csv` naming a real calendar date is accepted.
    pub fn parse_file_name(name: &str) -> Option<NaiveDate> {
        let digits = name.strip_prefix("Log")?.strip_suffix(".csv")?;
        if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let year = digits[0..4].parse().ok()?;
        let month = digits[4..6].parse().ok()?;
        let day = digits[6..8].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// File name for a date's log without building a `DailyLog`
pub fn file_name_for(date: NaiveDate) -> String {
    format!("Log{}.csv", date.format("%Y%m%d"))
}
