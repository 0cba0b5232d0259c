use crate::domain::{format_hours, TaskEntry, DEFAULT_ACCOUNT};
use regex::Regex;
use std::sync::LazyLock;

static ACCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").unwrap());

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\d+(?:\.\d{1,2})?)").unwrap());

/// Parse quick-entry text, one task per non-empty line.
///
/// Lines may carry `#ACCOUNT` and `@HOURS` anywhere, e.g. `Fix bug #infra @2.5`.
pub fn parse_quick_entry(text: &str) -> Vec<TaskEntry> {
    text.split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .map(parse_line)
        .collect()
}

/// Parse a single quick-entry line. Only the first `#tag` and the first `@time` are taken;
/// later ones stay in the title.
pub fn parse_line(raw: &str) -> TaskEntry {
    let mut line = raw.trim().to_string();
    let mut account = DEFAULT_ACCOUNT.to_string();
    let mut hours = 0.0;

    if let Some((tag, rest)) = take_first(&ACCOUNT_RE, &line) {
        account = tag.to_uppercase();
        line = rest;
    }

    if let Some((value, rest)) = take_first(&TIME_RE, &line) {
        hours = value.parse::<f64>().unwrap_or(0.0);
        line = rest;
    }

    TaskEntry {
        is_complete: false,
        title: line,
        time: format_hours(hours),
        account,
    }
}

/// Find the first match of `re`, returning its first group and the trimmed line with the
/// whole match cut out
fn take_first(re: &Regex, line: &str) -> Option<(String, String)> {
    let caps = re.captures(line)?;
    let whole = caps.get(0)?;
    let group = caps.get(1)?.as_str().to_string();

    let mut rest = String::with_capacity(line.len());
    rest.push_str(&line[..whole.start()]);
    rest.push_str(&line[whole.end()..]);
    Some((group, rest.trim().to_string()))
}

/// Whether `text` is acceptable as an edited hours value: digits with at most one `.`
pub fn is_valid_time_input(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.matches('.').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tags_after_title() {
        let task = parse_line("Fix bug #infra @2.5");
        assert_eq!(task.title, "Fix bug");
        assert_eq!(task.account, "INFRA");
        assert_eq!(task.time, "2.5");
        assert!(!task.is_complete);
    }

    #[test]
    fn test_parse_without_tags() {
        let task = parse_line("Generic task");
        assert_eq!(task.title, "Generic task");
        assert_eq!(task.account, "MISC");
        assert_eq!(task.time, "0");
    }

    #[test]
    fn test_parse_tags_before_title() {
        let task = parse_line("@3 #ops Review PR");
        assert_eq!(task.title, "Review PR");
        assert_eq!(task.account, "OPS");
        assert_eq!(task.time, "3");
    }

    #[test]
    fn test_tags_in_the_middle_leave_spacing() {
        let task = parse_line("Fix #infra the bug");
        assert_eq!(task.title, "Fix  the bug");
        assert_eq!(task.account, "INFRA");
    }

    #[test]
    fn test_only_first_tags_are_taken() {
        let task = parse_line("Sync #ops with #dev @1 then @2");
        assert_eq!(task.account, "OPS");
        assert_eq!(task.time, "1");
        assert_eq!(task.title, "Sync  with #dev  then @2");
    }

    #[test]
    fn test_repeated_identical_tag_stays_in_title() {
        let task = parse_line("#ops deploy #ops");
        assert_eq!(task.account, "OPS");
        assert_eq!(task.title, "deploy #ops");
    }

    #[test]
    fn test_time_is_normalised() {
        assert_eq!(parse_line("a @1.50").time, "1.5");
        assert_eq!(parse_line("a @2.00").time, "2");
        assert_eq!(parse_line("a @0.25").time, "0.25");
        assert_eq!(parse_line("a @007").time, "7");
    }

    #[test]
    fn test_time_takes_at_most_two_decimals() {
        let task = parse_line("a @1.255");
        assert_eq!(task.time, "1.25");
        assert_eq!(task.title, "a 5");
    }

    #[test]
    fn test_at_without_digits_is_not_time() {
        let task = parse_line("email @bob");
        assert_eq!(task.time, "0");
        assert_eq!(task.title, "email @bob");
    }

    #[test]
    fn test_account_allows_digits_and_underscore() {
        assert_eq!(parse_line("x #client_42").account, "CLIENT_42");
    }

    #[test]
    fn test_parse_multiple_lines() {
        let tasks = parse_quick_entry("Fix bug #infra @2.5\r\n\r\nGeneric task\n\n@3 #ops Review PR\n");
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Fix bug", "Generic task", "Review PR"]);
    }

    #[test]
    fn test_parse_empty_text() {
        assert!(parse_quick_entry("").is_empty());
        assert!(parse_quick_entry("\r\n\n").is_empty());
    }

    #[test]
    fn test_valid_time_input() {
        assert!(is_valid_time_input("1.5"));
        assert!(is_valid_time_input("3"));
        assert!(is_valid_time_input(".5"));
        assert!(!is_valid_time_input(""));
        assert!(!is_valid_time_input("."));
        assert!(!is_valid_time_input("1.2.3"));
        assert!(!is_valid_time_input("1,5"));
        assert!(!is_valid_time_input("-1"));
        assert!(!is_valid_time_input("2h"));
    }
}
