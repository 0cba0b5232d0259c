/// Parse a stored hours value. Non-numeric or non-finite text yields `None`.
pub fn parse_hours(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Format hours with at most two decimals, dropping trailing zeros ("1.50" -> "1.5", "2.00" -> "2")
pub fn format_hours(hours: f64) -> String {
    let fixed = format!("{:.2}", hours);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
