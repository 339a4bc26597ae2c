/// Utilities for the date filter inputs
///
/// `<input type="date">` yields `YYYY-MM-DD`; anything else is treated as "no date".
use chrono::NaiveDate;

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Returns the trimmed value when it is a valid `YYYY-MM-DD` date, otherwise an empty string
pub fn normalize_date_input(raw: &str) -> String {
    let trimmed = raw.trim();
    match NaiveDate::parse_from_str(trimmed, INPUT_FORMAT) {
        Ok(date) => date.format(INPUT_FORMAT).to_string(),
        Err(_) => String::new(),
    }
}

/// Format ISO date string to a short label for filter chips
/// Example: "2024-03-15" -> "Mar 15, 2024"
pub fn format_date(date_str: &str) -> String {
    match NaiveDate::parse_from_str(date_str.trim(), INPUT_FORMAT) {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_input() {
        assert_eq!(normalize_date_input("2024-03-15"), "2024-03-15");
        assert_eq!(normalize_date_input(" 2024-12-31 "), "2024-12-31");
        assert_eq!(normalize_date_input("2024-02-30"), "");
        assert_eq!(normalize_date_input("15.03.2024"), "");
        assert_eq!(normalize_date_input(""), "");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "Mar 15, 2024");
        assert_eq!(format_date("invalid"), "invalid");
    }
}
