//! Transient success/error notifications.
//!
//! [`ToastHost`] owns the list, provides a [`Toasts`] handle through context,
//! and runs a once-a-second sweep that retires toasts after a few seconds on
//! screen.

use dioxus::prelude::*;

const TOAST_TICKS: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
    ticks_left: u8,
}

#[derive(Default)]
struct ToastState {
    toasts: Vec<Toast>,
    next_id: u64,
}

/// Handle for pushing notifications, cheap to copy into event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    state: Signal<ToastState>,
}

impl Toasts {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&mut self, kind: ToastKind, message: String) {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;
        state.toasts.push(Toast {
            id,
            kind,
            message,
            ticks_left: TOAST_TICKS,
        });
    }

    fn dismiss(&mut self, id: u64) {
        self.state.write().toasts.retain(|t| t.id != id);
    }

    fn sweep(&mut self) {
        let mut state = self.state.write();
        for toast in &mut state.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        state.toasts.retain(|t| t.ticks_left > 0);
    }
}

/// Get the toast handle. Must be under a [`ToastHost`].
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>()
}

/// Provider that renders the toast overlay above its children.
#[component]
pub fn ToastHost(children: Element) -> Element {
    let state = use_signal(ToastState::default);
    let toasts = use_context_provider(|| Toasts { state });

    use_effect(move || {
        let mut toasts = toasts;
        spawn(async move {
            loop {
                #[cfg(target_arch = "wasm32")]
                gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                #[cfg(not(target_arch = "wasm32"))]
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;

                toasts.sweep();
            }
        });
    });

    rsx! {
        div {
            class: "fixed top-4 right-4 z-50 flex flex-col gap-2 w-80",
            for toast in state.read().toasts.clone() {
                ToastCard { key: "{toast.id}", toast: toast.clone() }
            }
        }
        {children}
    }
}

#[component]
fn ToastCard(toast: Toast) -> Element {
    let mut toasts = use_toasts();
    let accent = match toast.kind {
        ToastKind::Success => "border-emerald-500",
        ToastKind::Error => "border-red-500",
    };
    rsx! {
        div {
            class: "bg-neutral-900 border-l-4 {accent} rounded shadow-lg px-4 py-3 text-sm text-neutral-100 flex justify-between items-start gap-2",
            span { "{toast.message}" }
            button {
                class: "text-neutral-500 hover:text-neutral-200",
                onclick: move |_| toasts.dismiss(toast.id),
                "×"
            }
        }
    }
}
