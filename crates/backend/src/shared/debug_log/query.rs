use chrono::{NaiveDate, NaiveDateTime};
use contracts::shared::debug_log::{LogLevel, LogsQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};

/// Storage format of `created_at`
pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DAY_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATETIME: &str = "%B %-d, %Y %-I:%M %P";
const DISPLAY_TIME: &str = "%-I:%M %p";

/// Validated form of the `GET /api/logs` parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    pub page: u32,
    pub per_page: u32,
    pub level: Option<LogLevel>,
    pub search: Option<String>,
    /// Exact day, only honored when neither bound is set
    pub date: Option<NaiveDate>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DAY_FORMAT).ok()
}

impl LogFilter {
    pub fn from_query(query: &LogsQuery) -> Self {
        let per_page = query
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        let page = query.page.unwrap_or(1).max(1);
        let search = query.search.trim();

        let date_from = parse_day(&query.date_from);
        let date_to = parse_day(&query.date_to);
        let date = if date_from.is_none() && date_to.is_none() {
            parse_day(&query.date)
        } else {
            None
        };

        Self {
            page,
            per_page,
            level: query.level.parse().ok(),
            search: (!search.is_empty()).then(|| search.to_string()),
            date,
            date_from,
            date_to,
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Inclusive lower bound on `created_at`
    pub fn created_from(&self) -> Option<String> {
        self.date
            .or(self.date_from)
            .map(|day| format!("{} 00:00:00", day.format(DAY_FORMAT)))
    }

    /// Inclusive upper bound on `created_at`
    pub fn created_to(&self) -> Option<String> {
        self.date
            .or(self.date_to)
            .map(|day| format!("{} 23:59:59", day.format(DAY_FORMAT)))
    }
}

/// "October 19, 2026 3:04 pm"; unparseable input is returned unchanged
pub fn display_datetime(stored: &str) -> String {
    NaiveDateTime::parse_from_str(stored, STORED_FORMAT)
        .map(|dt| dt.format(DISPLAY_DATETIME).to_string())
        .unwrap_or_else(|_| stored.to_string())
}

/// "3:04 PM"; unparseable input is returned unchanged
pub fn display_time(stored: &str) -> String {
    NaiveDateTime::parse_from_str(stored, STORED_FORMAT)
        .map(|dt| dt.format(DISPLAY_TIME).to_string())
        .unwrap_or_else(|_| stored.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> LogsQuery {
        LogsQuery::default()
    }

    #[test]
    fn test_defaults() {
        let filter = LogFilter::from_query(&query());
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, DEFAULT_PER_PAGE);
        assert_eq!(filter.level, None);
        assert_eq!(filter.search, None);
        assert_eq!(filter.offset(), 0);
        assert_eq!(filter.created_from(), None);
        assert_eq!(filter.created_to(), None);
    }

    #[test]
    fn test_per_page_and_page_are_clamped() {
        let filter = LogFilter::from_query(&LogsQuery {
            page: Some(0),
            per_page: Some(500),
            ..query()
        });
        assert_eq!(filter.page, 1);
        assert_eq!(filter.per_page, MAX_PER_PAGE);

        let filter = LogFilter::from_query(&LogsQuery {
            page: Some(3),
            per_page: Some(0),
            ..query()
        });
        assert_eq!(filter.per_page, 1);
        assert_eq!(filter.offset(), 2);
    }

    #[test]
    fn test_only_known_levels_filter() {
        let level = |raw: &str| {
            LogFilter::from_query(&LogsQuery {
                level: raw.to_string(),
                ..query()
            })
            .level
        };
        assert_eq!(level("warning"), Some(LogLevel::Warning));
        assert_eq!(level("ERROR"), Some(LogLevel::Error));
        assert_eq!(level("critical"), None);
        assert_eq!(level(""), None);
    }

    #[test]
    fn test_range_takes_precedence_over_exact_date() {
        let filter = LogFilter::from_query(&LogsQuery {
            date: "2024-05-01".to_string(),
            date_from: "2024-05-03".to_string(),
            ..query()
        });
        assert_eq!(filter.date, None);
        assert_eq!(filter.created_from().as_deref(), Some("2024-05-03 00:00:00"));
        assert_eq!(filter.created_to(), None);
    }

    #[test]
    fn test_exact_date_covers_whole_day() {
        let filter = LogFilter::from_query(&LogsQuery {
            date: "2024-05-01".to_string(),
            ..query()
        });
        assert_eq!(filter.created_from().as_deref(), Some("2024-05-01 00:00:00"));
        assert_eq!(filter.created_to().as_deref(), Some("2024-05-01 23:59:59"));
    }

    #[test]
    fn test_invalid_dates_are_ignored() {
        let filter = LogFilter::from_query(&LogsQuery {
            date_from: "yesterday".to_string(),
            date_to: "2024-13-40".to_string(),
            search: "   ".to_string(),
            ..query()
        });
        assert_eq!(filter.created_from(), None);
        assert_eq!(filter.created_to(), None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(display_datetime("2024-03-05 14:07:09"), "March 5, 2024 2:07 pm");
        assert_eq!(display_time("2024-03-05 09:30:00"), "9:30 AM");
        assert_eq!(display_datetime("garbage"), "garbage");
    }
}
