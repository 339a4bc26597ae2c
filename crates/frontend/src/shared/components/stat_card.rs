use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatTone {
    Neutral,
    Warning,
    Error,
}

fn card_class(tone: StatTone) -> &'static str {
    match tone {
        StatTone::Neutral => "stat-card",
        StatTone::Warning => "stat-card stat-card--warning",
        StatTone::Error => "stat-card stat-card--error",
    }
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    /// Value of the `data-debug-stat` attribute
    stat_key: &'static str,
    #[prop(optional)]
    tone: Option<StatTone>,
) -> impl IntoView {
    let class = card_class(tone.unwrap_or(StatTone::Neutral));

    view! {
        <div class=class>
            <div class="stat-card__icon">
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value" data-debug-stat=stat_key>
                    {move || value.get()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_keep_stat_key() {
        let props = StatCardProps::builder()
            .label("Errors")
            .icon_name("x-circle")
            .value(Signal::stored("3".to_string()))
            .stat_key("errors")
            .tone(StatTone::Error)
            .build();
        assert_eq!(props.stat_key, "errors");
        assert_eq!(props.tone, Some(StatTone::Error));
    }

    #[test]
    fn test_card_is_built_inside_a_view() {
        let owner = Owner::new();
        owner.with(|| {
            let _card = view! {
                <StatCard
                    label="Total logs"
                    icon_name="list"
                    stat_key="total"
                    value=Signal::stored("1,204".to_string())
                />
            };
        });
    }

    #[test]
    fn test_tone_classes() {
        assert_eq!(card_class(StatTone::Neutral), "stat-card");
        assert_eq!(card_class(StatTone::Warning), "stat-card stat-card--warning");
        assert_eq!(card_class(StatTone::Error), "stat-card stat-card--error");
    }
}
