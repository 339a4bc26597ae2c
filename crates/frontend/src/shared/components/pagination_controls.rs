use crate::shared::icons::icon;
use leptos::prelude::*;

/// PaginationControls component - prev/next buttons, page indicator and page size select
#[component]
pub fn PaginationControls(
    /// Already formatted "Page X of Y" text
    #[prop(into)]
    indicator: Signal<String>,

    /// Whether the previous page exists
    #[prop(into)]
    can_prev: Signal<bool>,

    /// Whether the next page exists
    #[prop(into)]
    can_next: Signal<bool>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<u32>,

    on_prev: Callback<()>,

    on_next: Callback<()>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,

    /// Available page size options (optional, defaults to [10, 25, 50, 100])
    #[prop(optional)]
    page_size_options: Option<Vec<u32>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![10, 25, 50, 100]);

    view! {
        <div class="pagination-controls">
            <button
                type="button"
                class="pagination-btn"
                data-debug-page="prev"
                on:click=move |_| on_prev.run(())
                disabled=move || !can_prev.get()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info" data-debug-page-indicator="">
                {move || indicator.get()}
            </span>
            <button
                type="button"
                class="pagination-btn"
                data-debug-page="next"
                on:click=move |_| on_next.run(())
                disabled=move || !can_next.get()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_opts.iter().map(|&size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
