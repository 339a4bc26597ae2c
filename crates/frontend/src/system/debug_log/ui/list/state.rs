use crate::shared::date_utils::normalize_date_input;
use contracts::shared::debug_log::{LogLevel, LogsQuery, Pagination, DEFAULT_PER_PAGE};

/// Raw values of the filter form controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterControls {
    pub level: String,
    pub date_from: String,
    pub date_to: String,
    pub search: String,
}

/// Current query parameters of the viewer.
///
/// Any change of a non-page field resets `page` to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub page: u32,
    pub per_page: u32,
    pub level: Option<LogLevel>,
    pub date_from: String,
    pub date_to: String,
    pub search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            level: None,
            date_from: String::new(),
            date_to: String::new(),
            search: String::new(),
        }
    }
}

impl FilterState {
    /// Seed page/per_page from the server snapshot rendered into the host page
    pub fn from_snapshot(pagination: Option<&Pagination>) -> Self {
        let mut st = Self::default();
        if let Some(p) = pagination {
            st.page = p.page.max(1);
            st.per_page = p.per_page.max(1);
        }
        st
    }

    /// Copy the form values into state. Returns `true` when a filter changed.
    pub fn sync_from_controls(&mut self, controls: &FilterControls) -> bool {
        let level = parse_level_filter(&controls.level);
        let date_from = normalize_date_input(&controls.date_from);
        let date_to = normalize_date_input(&controls.date_to);
        let search = controls.search.trim().to_string();

        let changed = level != self.level
            || date_from != self.date_from
            || date_to != self.date_to
            || search != self.search;

        self.level = level;
        self.date_from = date_from;
        self.date_to = date_to;
        self.search = search;
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn set_level(&mut self, level: Option<LogLevel>) {
        if self.level != level {
            self.level = level;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: &str) {
        let search = search.trim();
        if self.search != search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    pub fn set_per_page(&mut self, per_page: u32) {
        let per_page = per_page.max(1);
        if self.per_page != per_page {
            self.per_page = per_page;
            self.page = 1;
        }
    }

    /// Clear every filter, keep the page size
    pub fn reset(&mut self) {
        *self = Self {
            per_page: self.per_page,
            ..Self::default()
        };
    }

    pub fn active_filters_count(&self) -> usize {
        [
            self.level.is_some(),
            !self.date_from.is_empty(),
            !self.date_to.is_empty(),
            !self.search.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn to_query(&self) -> LogsQuery {
        LogsQuery {
            page: Some(self.page.max(1)),
            per_page: Some(self.per_page.max(1)),
            level: self.level.map(|l| l.as_str().to_string()).unwrap_or_default(),
            date: String::new(),
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
            search: self.search.clone(),
        }
    }
}

/// `""` (or anything unknown) means all levels
pub fn parse_level_filter(raw: &str) -> Option<LogLevel> {
    raw.parse().ok()
}
