//! View model of the debug-log viewer.
//!
//! Holds everything the panel renders plus the request bookkeeping. All user
//! input goes through [`LogViewModel::dispatch`], which mutates state and
//! returns the side effects the component has to run (fetch, timers, confirm
//! dialog, toast). Network results come back through
//! [`LogViewModel::complete_fetch`] and `ViewerAction::ClearFinished`.

use super::api::ApiError;
use super::ui::list::state::{FilterControls, FilterState};
use super::ui::toast::ToastKind;
use contracts::shared::debug_log::{LogEntry, LogStats, LogsQuery, LogsResponse, Pagination};

pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    Loading,
    Rendered,
    ErrorShown,
}

/// Monotonic request stamp; only the latest issued request may render
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSequence {
    issued: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    pub fn latest(&self) -> u64 {
        self.issued
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// Debounce bookkeeping: every keystroke schedules a new ticket, only the
/// newest ticket may fire and it fires at most once.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceGate {
    generation: u64,
    armed: bool,
}

impl DebounceGate {
    pub fn schedule(&mut self) -> u64 {
        self.generation += 1;
        self.armed = true;
        self.generation
    }

    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn fire(&mut self, ticket: u64) -> bool {
        if self.armed && ticket == self.generation {
            self.armed = false;
            true
        } else {
            false
        }
    }
}

/// Which localized string a toast shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastMessage {
    Cleared,
    ErrorGeneric,
}

#[derive(Debug, Clone)]
pub enum ViewerAction {
    /// Filter form submitted or a non-search control changed
    ApplyFilters(FilterControls),
    SearchInput(String),
    /// Debounce timer for the given ticket elapsed
    SearchSettled(u64),
    Reset,
    PrevPage,
    NextPage,
    SetPerPage(u32),
    Refresh,
    RequestClear,
    ClearConfirmed(bool),
    ClearFinished(Result<(), ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch,
    ScheduleSearch(u64),
    ResetControls,
    ConfirmClear,
    SendClear,
    Toast(ToastKind, ToastMessage),
}

/// A request that has been stamped and is ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: LogsQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Rendered,
    Failed,
    /// A newer request was issued after this one; the response was dropped
    Stale,
}

impl FetchOutcome {
    pub fn toast(&self) -> Option<(ToastKind, ToastMessage)> {
        match self {
            FetchOutcome::Failed => Some((ToastKind::Error, ToastMessage::ErrorGeneric)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogViewModel {
    pub filter: FilterState,
    pub logs: Vec<LogEntry>,
    pub stats: LogStats,
    pub pagination: Pagination,
    pub phase: ViewPhase,
    /// Bumped on every render; rows keyed by it drop their expansion state
    pub render_epoch: u64,
    sequence: RequestSequence,
    search_gate: DebounceGate,
    clear_in_flight: bool,
}

impl LogViewModel {
    pub fn new(initial: Option<LogsResponse>) -> Self {
        let filter = FilterState::from_snapshot(initial.as_ref().map(|r| &r.pagination));
        let mut model = Self {
            pagination: Pagination {
                page: filter.page,
                per_page: filter.per_page,
                ..Pagination::default()
            },
            filter,
            logs: Vec::new(),
            stats: LogStats::default(),
            phase: ViewPhase::Idle,
            render_epoch: 0,
            sequence: RequestSequence::default(),
            search_gate: DebounceGate::default(),
            clear_in_flight: false,
        };
        if let Some(snapshot) = initial {
            model.render(snapshot);
            model.phase = ViewPhase::Rendered;
        }
        model
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading || self.clear_in_flight
    }

    pub fn can_go_prev(&self) -> bool {
        self.pagination.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.pagination.page < self.pagination.total_pages.max(1)
    }

    /// Stamp a new request and enter the loading state
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.phase = ViewPhase::Loading;
        FetchTicket {
            seq: self.sequence.issue(),
            query: self.filter.to_query(),
        }
    }

    /// Apply a response. Responses of superseded requests are ignored; the
    /// latest request always leaves the loading state, success or not.
    pub fn complete_fetch(
        &mut self,
        seq: u64,
        result: Result<LogsResponse, ApiError>,
    ) -> FetchOutcome {
        if !self.sequence.is_latest(seq) {
            log::debug!(
                "dropping stale debug log response #{} (latest #{})",
                seq,
                self.sequence.latest()
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(response) => {
                self.render(response);
                self.phase = ViewPhase::Rendered;
                FetchOutcome::Rendered
            }
            Err(e) => {
                log::warn!("debug log fetch #{} failed: {}", seq, e);
                self.phase = ViewPhase::ErrorShown;
                FetchOutcome::Failed
            }
        }
    }

    /// The server echo is authoritative for page/per_page
    fn render(&mut self, response: LogsResponse) {
        let echo = response.pagination;
        let total_pages = echo.total_pages.max(1);
        self.filter.page = echo.page.clamp(1, total_pages);
        self.filter.per_page = echo.per_page.max(1);

        self.stats = response.stats;
        self.logs = response.logs;
        self.pagination = Pagination {
            page: self.filter.page,
            per_page: self.filter.per_page,
            total_pages,
            total_items: echo.total_items,
        };
        self.render_epoch += 1;
    }

    pub fn dispatch(&mut self, action: ViewerAction) -> Vec<Effect> {
        match action {
            ViewerAction::ApplyFilters(controls) => {
                self.search_gate.cancel();
                self.filter.sync_from_controls(&controls);
                self.filter.page = 1;
                vec![Effect::Fetch]
            }
            ViewerAction::SearchInput(text) => {
                self.filter.set_search(&text);
                vec![Effect::ScheduleSearch(self.search_gate.schedule())]
            }
            ViewerAction::SearchSettled(ticket) => {
                if self.search_gate.fire(ticket) {
                    self.filter.page = 1;
                    vec![Effect::Fetch]
                } else {
                    Vec::new()
                }
            }
            ViewerAction::Reset => {
                self.search_gate.cancel();
                self.filter.reset();
                vec![Effect::ResetControls, Effect::Fetch]
            }
            ViewerAction::PrevPage => {
                if self.can_go_prev() && self.filter.page > 1 {
                    self.filter.page -= 1;
                    vec![Effect::Fetch]
                } else {
                    Vec::new()
                }
            }
            ViewerAction::NextPage => {
                if self.can_go_next() && self.filter.page < self.pagination.total_pages {
                    self.filter.page += 1;
                    vec![Effect::Fetch]
                } else {
                    Vec::new()
                }
            }
            ViewerAction::SetPerPage(per_page) => {
                self.filter.set_per_page(per_page);
                vec![Effect::Fetch]
            }
            ViewerAction::Refresh => vec![Effect::Fetch],
            ViewerAction::RequestClear => vec![Effect::ConfirmClear],
            ViewerAction::ClearConfirmed(false) => Vec::new(),
            ViewerAction::ClearConfirmed(true) => {
                self.clear_in_flight = true;
                vec![Effect::SendClear]
            }
            ViewerAction::ClearFinished(Ok(())) => {
                self.clear_in_flight = false;
                self.filter.page = 1;
                vec![
                    Effect::Fetch,
                    Effect::Toast(ToastKind::Success, ToastMessage::Cleared),
                ]
            }
            ViewerAction::ClearFinished(Err(e)) => {
                log::warn!("clearing debug logs failed: {}", e);
                self.clear_in_flight = false;
                vec![Effect::Toast(ToastKind::Error, ToastMessage::ErrorGeneric)]
            }
        }
    }
}
