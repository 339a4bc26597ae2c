use super::state::FilterControls;
use crate::shared::icons::icon;
use crate::system::debug_log::model::ViewerAction;
use contracts::shared::debug_log::LogLevel;
use leptos::prelude::*;
use thaw::*;

/// Signals bound to the filter form inputs
#[derive(Clone, Copy)]
pub struct ControlSignals {
    pub level: RwSignal<String>,
    pub date_from: RwSignal<String>,
    pub date_to: RwSignal<String>,
    pub search: RwSignal<String>,
}

impl ControlSignals {
    pub fn new() -> Self {
        Self {
            level: RwSignal::new(String::new()),
            date_from: RwSignal::new(String::new()),
            date_to: RwSignal::new(String::new()),
            search: RwSignal::new(String::new()),
        }
    }

    pub fn snapshot(&self) -> FilterControls {
        FilterControls {
            level: self.level.get_untracked(),
            date_from: self.date_from.get_untracked(),
            date_to: self.date_to.get_untracked(),
            search: self.search.get_untracked(),
        }
    }

    pub fn clear(&self) {
        self.level.set(String::new());
        self.date_from.set(String::new());
        self.date_to.set(String::new());
        self.search.set(String::new());
    }
}

impl Default for ControlSignals {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn DebugLogFilters(
    controls: ControlSignals,
    on_action: Callback<ViewerAction>,
    #[prop(into)] active_count: Signal<usize>,
) -> impl IntoView {
    let apply = move || on_action.run(ViewerAction::ApplyFilters(controls.snapshot()));

    view! {
        <form
            class="bbai-debug-filters"
            data-debug-filter-form=""
            on:submit=move |ev| {
                ev.prevent_default();
                apply();
            }
        >
            <Flex gap=FlexGap::Small align=FlexAlign::End>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Level"</Label>
                    <select
                        class="bbai-debug-filters__level"
                        name="level"
                        prop:value=move || controls.level.get()
                        on:change=move |ev| {
                            controls.level.set(event_target_value(&ev));
                            apply();
                        }
                    >
                        <option value="">"All levels"</option>
                        {LogLevel::ALL
                            .iter()
                            .map(|level| {
                                view! { <option value=level.as_str()>{level.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"From"</Label>
                    <input
                        type="date"
                        name="date_from"
                        prop:value=move || controls.date_from.get()
                        on:change=move |ev| {
                            controls.date_from.set(event_target_value(&ev));
                            apply();
                        }
                    />
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"To"</Label>
                    <input
                        type="date"
                        name="date_to"
                        prop:value=move || controls.date_to.get()
                        on:change=move |ev| {
                            controls.date_to.set(event_target_value(&ev));
                            apply();
                        }
                    />
                </Flex>

                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Search"</Label>
                    <input
                        type="search"
                        name="search"
                        placeholder="Search messages"
                        prop:value=move || controls.search.get()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            controls.search.set(value.clone());
                            on_action.run(ViewerAction::SearchInput(value));
                        }
                    />
                </Flex>

                <button type="submit" class="button button--primary">
                    {icon("filter")}
                    "Filter"
                    {move || {
                        let count = active_count.get();
                        (count > 0).then(|| view! { <span class="filter-badge">{count}</span> })
                    }}
                </button>

                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_action.run(ViewerAction::Reset)
                >
                    "Reset"
                </Button>

                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_action.run(ViewerAction::Refresh)
                >
                    {icon("refresh")}
                    "Refresh"
                </Button>

                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_action.run(ViewerAction::RequestClear)
                >
                    {icon("trash")}
                    "Clear logs"
                </Button>
            </Flex>
        </form>
    }
}
