use crate::state::{ToastContext, ToastState};
use icons::X;
use leptos::prelude::*;

/// Bottom-right stack of transient notifications.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<ToastContext>();

    view! {
        <div class="pointer-events-none fixed bottom-4 right-4 z-[60] flex w-80 flex-col gap-2" aria-live="polite">
            <For
                each=move || toasts.queue.with(|q| q.items().to_vec())
                key=|t| t.id
                let:toast
            >
                {
                    let tone = match toast.state {
                        ToastState::Success => "border-green-600/30 bg-green-50 text-green-900",
                        ToastState::Error => "border-destructive/30 bg-red-50 text-destructive",
                    };
                    let id = toast.id;
                    view! {
                        <div
                            class=format!("pointer-events-auto flex items-start gap-2 rounded-md border px-3 py-2 text-sm shadow-md {tone}")
                            data-state=toast.state.as_ref().to_string()
                            role="status"
                        >
                            <span class="flex-1">{toast.message.clone()}</span>
                            <button
                                type="button"
                                class="opacity-60 hover:opacity-100"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                <X class="size-4" />
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
