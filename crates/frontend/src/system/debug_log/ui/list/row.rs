use crate::shared::clipboard::copy_text;
use crate::shared::context_codec;
use crate::system::debug_log::config::ViewerConfig;
use contracts::shared::debug_log::{LogEntry, LogLevel};
use leptos::prelude::*;

const COPIED_LABEL_MS: u32 = 2_000;

/// Expansion state of one detail row.
///
/// Context is decoded on the first expansion only and cached until the
/// table re-renders; collapsing never decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowExpansion {
    expanded: bool,
    decoded: Option<String>,
}

impl RowExpansion {
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip the row; returns the new expanded flag
    pub fn toggle_with(&mut self, decode: impl FnOnce() -> String) -> bool {
        if self.expanded {
            self.expanded = false;
        } else {
            if self.decoded.is_none() {
                self.decoded = Some(decode());
            }
            self.expanded = true;
        }
        self.expanded
    }

    /// Text shown in the detail row; empty while collapsed
    pub fn display_text(&self) -> &str {
        if self.expanded {
            self.decoded.as_deref().unwrap_or_default()
        } else {
            ""
        }
    }
}

fn badge_class(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Debug => "bbai-debug-badge bbai-debug-badge--debug",
        LogLevel::Info => "bbai-debug-badge bbai-debug-badge--info",
        LogLevel::Warning => "bbai-debug-badge bbai-debug-badge--warning",
        LogLevel::Error => "bbai-debug-badge bbai-debug-badge--error",
    }
}

/// One log record: the main row plus, when it has context, a hidden detail row
#[component]
pub fn LogRow(entry: LogEntry, index: usize) -> impl IntoView {
    let config = use_context::<ViewerConfig>().expect("ViewerConfig context not found");
    let strings = StoredValue::new(config.strings);

    let level = entry.level;
    let encoded = entry
        .has_context()
        .then(|| context_codec::encode(&entry.context));

    let Some(encoded) = encoded else {
        return view! {
            <tr class="bbai-debug-table-row">
                <td class="bbai-debug-table__time">{entry.created_at}</td>
                <td><span class=badge_class(level)>{level.label()}</span></td>
                <td class="bbai-debug-table__message">{entry.message}</td>
                <td><span class="bbai-debug-table__no-context">"—"</span></td>
            </tr>
        }
        .into_any();
    };

    let expansion = RwSignal::new(RowExpansion::default());
    let expanded = Memo::new(move |_| expansion.with(|e| e.is_expanded()));
    let (copied, set_copied) = signal(false);
    let encoded_attr = encoded.clone();

    let toggle = move |_| {
        let encoded = encoded.clone();
        expansion.update(|e| {
            e.toggle_with(|| context_codec::decode_for_display(&encoded));
        });
    };

    let handle_copy = move |_| {
        let text = expansion.with_untracked(|e| e.display_text().to_string());
        copy_text(text, move |ok| {
            if !ok {
                return;
            }
            set_copied.set(true);
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(COPIED_LABEL_MS).await;
                set_copied.set(false);
            });
        });
    };

    view! {
        <tr class="bbai-debug-table-row">
            <td class="bbai-debug-table__time">{entry.created_at}</td>
            <td><span class=badge_class(level)>{level.label()}</span></td>
            <td class="bbai-debug-table__message">{entry.message}</td>
            <td>
                <button
                    type="button"
                    class=move || {
                        if expanded.get() {
                            "bbai-debug-context-btn is-expanded"
                        } else {
                            "bbai-debug-context-btn"
                        }
                    }
                    data-context=encoded_attr
                    data-row-index=index.to_string()
                    aria-expanded=move || expanded.get().to_string()
                    on:click=toggle
                >
                    {move || {
                        strings.with_value(|s| {
                            if expanded.get() { s.context_hide.clone() } else { s.context_title.clone() }
                        })
                    }}
                </button>
            </td>
        </tr>
        <tr
            class="bbai-debug-context-row"
            data-row-index=index.to_string()
            style=move || if expanded.get() { "" } else { "display: none;" }
        >
            <td colspan="4" class="bbai-debug-context-cell">
                <div class="bbai-debug-context-content">
                    <button
                        type="button"
                        class="bbai-debug-context-copy"
                        on:click=handle_copy
                    >
                        {move || strings.with_value(|s| {
                            if copied.get() { s.copied.clone() } else { s.copy.clone() }
                        })}
                    </button>
                    <pre class="bbai-debug-context-json">
                        {move || expansion.with(|e| e.display_text().to_string())}
                    </pre>
                </div>
            </td>
        </tr>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_decodes_once_across_toggles() {
        let calls = Cell::new(0);
        let decode = || {
            calls.set(calls.get() + 1);
            "{\n  \"a\": 1\n}".to_string()
        };

        let mut row = RowExpansion::default();
        assert_eq!(row.display_text(), "");

        assert!(row.toggle_with(decode));
        assert_eq!(row.display_text(), "{\n  \"a\": 1\n}");

        assert!(!row.toggle_with(decode));
        assert_eq!(row.display_text(), "");

        assert!(row.toggle_with(decode));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_collapse_does_not_decode() {
        let mut row = RowExpansion::default();
        row.toggle_with(|| "ctx".to_string());
        row.toggle_with(|| panic!("collapsing must not decode"));
        assert!(!row.is_expanded());
    }

    #[test]
    fn test_expanding_real_context() {
        let encoded = context_codec::encode(&serde_json::json!({"attachment_id": 7}));
        let mut row = RowExpansion::default();
        row.toggle_with(|| context_codec::decode_for_display(&encoded));
        assert_eq!(row.display_text(), "{\n  \"attachment_id\": 7\n}");
    }
}
