use crate::domain::TaskEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Tasks logged on one day
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub tasks: Vec<TaskEntry>,
}

/// Tasks sharing an account, with their summed hours
#[derive(Debug, Clone, PartialEq)]
pub struct AccountGroup {
    /// Upper-cased account code
    pub account: String,
    pub tasks: Vec<TaskEntry>,
    pub hours: f64,
}

/// Sum of numeric task times; non-numeric times count as zero
pub fn total_hours<'a, I>(tasks: I) -> f64
where
    I: IntoIterator<Item = &'a TaskEntry>,
{
    tasks.into_iter().map(TaskEntry::hours).sum()
}

/// Group (date, task) pairs by date, ascending. File order is kept within a day.
pub fn group_by_day(entries: Vec<(NaiveDate, TaskEntry)>) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<TaskEntry>> = BTreeMap::new();
    for (date, task) in entries {
        by_date.entry(date).or_default().push(task);
    }

    by_date
        .into_iter()
        .map(|(date, tasks)| DayGroup { date, tasks })
        .collect()
}

/// Group tasks by upper-cased account, sorted alphabetically. Input order is kept within
/// an account.
pub fn group_by_account(tasks: Vec<TaskEntry>) -> Vec<AccountGroup> {
    let mut by_account: BTreeMap<String, Vec<TaskEntry>> = BTreeMap::new();
    for task in tasks {
        by_account.entry(task.account_key()).or_default().push(task);
    }

    by_account
        .into_iter()
        .map(|(account, tasks)| AccountGroup {
            hours: total_hours(&tasks),
            account,
            tasks,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn task(title: &str, time: &str, account: &str) -> TaskEntry {
        TaskEntry::new(title, time, account)
    }

    #[test]
    fn test_total_hours_ignores_non_numeric() {
        let tasks = vec![task("a", "1.5", "X"), task("b", "later", "X"), task("c", "2", "X")];
        assert_eq!(total_hours(&tasks), 3.5);
    }

    #[test]
    fn test_total_hours_empty() {
        assert_eq!(total_hours(&Vec::<TaskEntry>::new()), 0.0);
    }

    #[test]
    fn test_group_by_day_sorts_dates_and_keeps_order() {
        let entries = vec![
            (date(5), task("late-1", "1", "X")),
            (date(3), task("early-1", "1", "X")),
            (date(5), task("late-2", "1", "X")),
        ];

        let groups = group_by_day(entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date(3));
        assert_eq!(groups[1].date, date(5));
        let titles: Vec<&str> = groups[1].tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["late-1", "late-2"]);
    }

    #[test]
    fn test_group_by_account_merges_case() {
        let tasks = vec![
            task("deploy", "1", "ops"),
            task("misc", "0.5", "MISC"),
            task("rollback", "2", "OPS"),
        ];

        let groups = group_by_account(tasks);
        let accounts: Vec<&str> = groups.iter().map(|g| g.account.as_str()).collect();
        assert_eq!(accounts, vec!["MISC", "OPS"]);

        let ops = &groups[1];
        assert_eq!(ops.hours, 3.0);
        let titles: Vec<&str> = ops.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["deploy", "rollback"]);
    }

    #[test]
    fn test_group_by_account_sorts_ordinally() {
        let tasks = vec![task("a", "1", "b"), task("b", "1", "A_1"), task("c", "1", "A")];
        let accounts: Vec<String> = group_by_account(tasks).into_iter().map(|g| g.account).collect();
        assert_eq!(accounts, vec!["A", "A_1", "B"]);
    }
}
