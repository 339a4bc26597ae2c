pub mod filters;
pub mod row;
pub mod state;

use self::filters::{ControlSignals, DebugLogFilters};
use self::row::LogRow;
use super::toast::{show_toast, StatusToast, ToastState};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{StatCard, StatTone};
use crate::shared::number_format::format_count;
use crate::system::debug_log::api;
use contracts::shared::debug_log::{DebugStrings, LogEntry};
use crate::system::debug_log::config::ViewerConfig;
use crate::system::debug_log::model::{
    Effect as ViewerEffect, LogViewModel, ToastMessage, ViewPhase, ViewerAction,
    SEARCH_DEBOUNCE_MS,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const EMPTY_STAT: &str = "—";

/// Everything an action or effect may touch. All fields are arena handles,
/// so the bundle is `Copy` and can move into timers and request futures.
#[derive(Clone, Copy)]
struct ViewerHandles {
    model: RwSignal<LogViewModel>,
    toast: RwSignal<ToastState>,
    config: StoredValue<ViewerConfig>,
    controls: ControlSignals,
}

fn dispatch(h: ViewerHandles, action: ViewerAction) {
    let Some(effects) = h.model.try_update(|m| m.dispatch(action)) else {
        return;
    };
    for effect in effects {
        run_effect(h, effect);
    }
}

fn run_effect(h: ViewerHandles, effect: ViewerEffect) {
    match effect {
        ViewerEffect::Fetch => start_fetch(h),
        ViewerEffect::ScheduleSearch(ticket) => spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            dispatch(h, ViewerAction::SearchSettled(ticket));
        }),
        ViewerEffect::ResetControls => h.controls.clear(),
        ViewerEffect::ConfirmClear => {
            let prompt = h.config.with_value(|c| c.strings.clear_confirm.clone());
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message(&prompt).ok())
                .unwrap_or(false);
            dispatch(h, ViewerAction::ClearConfirmed(confirmed));
        }
        ViewerEffect::SendClear => {
            let config = h.config.get_value();
            spawn_local(async move {
                let result = api::clear_logs(&config).await;
                dispatch(h, ViewerAction::ClearFinished(result));
            });
        }
        ViewerEffect::Toast(kind, message) => {
            let text = h.config.with_value(|c| match message {
                ToastMessage::Cleared => c.strings.cleared.clone(),
                ToastMessage::ErrorGeneric => c.strings.error_generic.clone(),
            });
            show_toast(h.toast, text, kind);
        }
    }
}

fn start_fetch(h: ViewerHandles) {
    let Some(ticket) = h.model.try_update(|m| m.begin_fetch()) else {
        return;
    };
    let config = h.config.get_value();
    spawn_local(async move {
        let result = api::fetch_logs(&config, &ticket.query).await;
        let toast = h
            .model
            .try_update(|m| m.complete_fetch(ticket.seq, result))
            .and_then(|outcome| outcome.toast());
        if let Some((kind, message)) = toast {
            run_effect(h, ViewerEffect::Toast(kind, message));
        }
    });
}

/// Placeholder row text, present only when the page has no rows
fn empty_table_text(logs: &[LogEntry], strings: &DebugStrings) -> Option<String> {
    logs.is_empty().then(|| strings.no_logs.clone())
}

/// Debug log panel: stats, filters, table and pagination
#[component]
pub fn DebugLogViewer() -> impl IntoView {
    let config = use_context::<ViewerConfig>().expect("ViewerConfig context not found");
    let strings = StoredValue::new(config.strings.clone());

    let handles = ViewerHandles {
        model: RwSignal::new(LogViewModel::new(config.initial.clone())),
        toast: RwSignal::new(ToastState::default()),
        config: StoredValue::new(config),
        controls: ControlSignals::new(),
    };
    let model = handles.model;
    let on_action = Callback::new(move |action: ViewerAction| dispatch(handles, action));

    // No server snapshot: request the first page once mounted
    Effect::new(move |_| {
        if model.with_untracked(|m| m.phase == ViewPhase::Idle) {
            dispatch(handles, ViewerAction::Refresh);
        }
    });

    let is_loading = Memo::new(move |_| model.with(|m| m.is_loading()));
    let render_epoch = Memo::new(move |_| model.with(|m| m.render_epoch));
    let stats = Memo::new(move |_| model.with(|m| m.stats.clone()));
    let pagination = Memo::new(move |_| model.with(|m| m.pagination));
    let active_count = Memo::new(move |_| model.with(|m| m.filter.active_filters_count()));

    let indicator = Signal::derive(move || {
        let p = pagination.get();
        strings.with_value(|s| s.page_indicator(p.page, p.total_pages))
    });

    // Rows are rebuilt per render only, so a loading phase keeps open details
    let rows = move || {
        render_epoch.track();
        let logs = model.with_untracked(|m| m.logs.clone());
        if let Some(text) = strings.with_value(|s| empty_table_text(&logs, s)) {
            view! {
                <tr class="bbai-debug-table__empty">
                    <td colspan="4">{text}</td>
                </tr>
            }
            .into_any()
        } else {
            logs.into_iter()
                .enumerate()
                .map(|(index, entry)| view! { <LogRow entry=entry index=index /> })
                .collect_view()
                .into_any()
        }
    };

    view! {
        <div
            class=move || {
                if is_loading.get() { "bbai-debug-panel is-loading" } else { "bbai-debug-panel" }
            }
            aria-busy=move || is_loading.get().to_string()
        >
            <div class="bbai-debug-stats">
                <StatCard
                    label="Total logs"
                    icon_name="list"
                    stat_key="total"
                    value=Signal::derive(move || format_count(stats.get().total))
                />
                <StatCard
                    label="Warnings"
                    icon_name="alert-triangle"
                    stat_key="warnings"
                    tone=StatTone::Warning
                    value=Signal::derive(move || format_count(stats.get().warnings))
                />
                <StatCard
                    label="Errors"
                    icon_name="x-circle"
                    stat_key="errors"
                    tone=StatTone::Error
                    value=Signal::derive(move || format_count(stats.get().errors))
                />
                <StatCard
                    label="Last event"
                    icon_name="clock"
                    stat_key="last_event"
                    value=Signal::derive(move || {
                        stats.get().last_event.unwrap_or_else(|| EMPTY_STAT.to_string())
                    })
                />
                <StatCard
                    label="Last API call"
                    icon_name="clock"
                    stat_key="last_api"
                    value=Signal::derive(move || {
                        stats.get().last_api.unwrap_or_else(|| EMPTY_STAT.to_string())
                    })
                />
            </div>

            <DebugLogFilters
                controls=handles.controls
                on_action=on_action
                active_count=active_count
            />

            <StatusToast state=handles.toast />

            <div class="bbai-debug-table-wrapper">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=160.0>"Date"</TableHeaderCell>
                            <TableHeaderCell min_width=90.0>"Level"</TableHeaderCell>
                            <TableHeaderCell min_width=320.0>"Message"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Context"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>{rows}</TableBody>
                </Table>
            </div>

            <PaginationControls
                indicator=indicator
                can_prev=Signal::derive(move || model.with(|m| m.can_go_prev()))
                can_next=Signal::derive(move || model.with(|m| m.can_go_next()))
                page_size=Signal::derive(move || pagination.get().per_page)
                on_prev=Callback::new(move |_| dispatch(handles, ViewerAction::PrevPage))
                on_next=Callback::new(move |_| dispatch(handles, ViewerAction::NextPage))
                on_page_size_change=Callback::new(move |size: u32| {
                    dispatch(handles, ViewerAction::SetPerPage(size))
                })
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::debug_log::LogLevel;

    #[test]
    fn test_empty_page_uses_configured_placeholder() {
        let strings = DebugStrings {
            no_logs: "Nothing logged for this site".to_string(),
            ..DebugStrings::default()
        };
        assert_eq!(
            empty_table_text(&[], &strings).as_deref(),
            Some("Nothing logged for this site")
        );
    }

    #[test]
    fn test_rows_suppress_placeholder() {
        let entry = LogEntry {
            id: 1,
            level: LogLevel::Info,
            message: "Generated alt text".to_string(),
            source: "api".to_string(),
            meta: String::new(),
            user_id: None,
            created_at: "March 5, 2024 2:07 pm".to_string(),
            timestamp: "2024-03-05 14:07:00".to_string(),
            context: serde_json::Value::Null,
        };
        assert_eq!(empty_table_text(&[entry], &DebugStrings::default()), None);
    }
}
