use icons::X;
use leptos::prelude::*;

use crate::components::ui::button::{Button, ButtonSize, ButtonVariant};

/// Centered dialog over a dimmed backdrop, shown while `open` is true.
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    let children = StoredValue::new(children);
    let title = StoredValue::new(title);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                on:click=move |_| open.set(false)
            >
                <div
                    class="relative w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg"
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <div class="mb-3 flex items-center justify-between">
                        <div class="text-sm font-medium">{title.get_value()}</div>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="Close"
                            on:click=move |_| open.set(false)
                        >
                            <X />
                        </Button>
                    </div>
                    {move || children.with_value(|c| c())}
                </div>
            </div>
        </Show>
    }
}
