use leptos::prelude::*;

pub const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bbai-debug-toast is-success",
            ToastKind::Error => "bbai-debug-toast is-error",
        }
    }
}

/// Single status line of the panel. The last `show` wins; timers started by
/// earlier calls expire into nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub kind: ToastKind,
    pub visible: bool,
    generation: u64,
}

impl Default for ToastState {
    fn default() -> Self {
        Self {
            message: String::new(),
            kind: ToastKind::Success,
            visible: false,
            generation: 0,
        }
    }
}

impl ToastState {
    /// Returns the generation the auto-hide timer must present to `expire`
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.generation += 1;
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
        self.generation
    }

    pub fn expire(&mut self, generation: u64) -> bool {
        if self.visible && generation == self.generation {
            self.visible = false;
            true
        } else {
            false
        }
    }
}

/// Show a toast and schedule its auto-hide
pub fn show_toast(state: RwSignal<ToastState>, message: String, kind: ToastKind) {
    let Some(generation) = state.try_update(|t| t.show(message, kind)) else {
        return;
    };
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
        state.update(|t| {
            t.expire(generation);
        });
    });
}

#[component]
pub fn StatusToast(state: RwSignal<ToastState>) -> impl IntoView {
    view! {
        <div
            class=move || state.with(|t| t.kind.class())
            role="status"
            aria-live="polite"
            data-debug-toast=""
            hidden=move || !state.with(|t| t.visible)
        >
            {move || state.with(|t| t.message.clone())}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_auto_hides() {
        let mut toast = ToastState::default();
        let generation = toast.show("Logs cleared successfully.", ToastKind::Success);
        assert!(toast.visible);
        assert!(toast.expire(generation));
        assert!(!toast.visible);
    }

    #[test]
    fn test_last_call_wins() {
        let mut toast = ToastState::default();
        let first = toast.show("first", ToastKind::Success);
        let second = toast.show("second", ToastKind::Error);

        // the first timer elapses while the second message is up
        assert!(!toast.expire(first));
        assert!(toast.visible);
        assert_eq!(toast.message, "second");
        assert_eq!(toast.kind, ToastKind::Error);

        assert!(toast.expire(second));
        assert!(!toast.visible);
    }
}
