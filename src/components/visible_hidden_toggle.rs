use leptos::prelude::*;

/// Two-segment switch used by admins to publish or hide an item.
#[component]
pub fn VisibleHiddenToggle(
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] on_change: Callback<bool>,
) -> impl IntoView {
    let segment = move |selected: bool| {
        if selected {
            "flex-1 rounded-md bg-primary px-2 py-1 text-center text-xs text-primary-foreground"
        } else {
            "flex-1 rounded-md px-2 py-1 text-center text-xs text-muted-foreground hover:bg-accent"
        }
    };

    view! {
        <div
            class="flex w-full gap-1 rounded-lg border p-1"
            role="group"
            aria-label="Visibility"
            on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
        >
            <button
                type="button"
                class=move || segment(visible.get())
                on:click=move |_| {
                    if !visible.get_untracked() {
                        on_change.run(true);
                    }
                }
            >
                "Visible"
            </button>
            <button
                type="button"
                class=move || segment(!visible.get())
                on:click=move |_| {
                    if visible.get_untracked() {
                        on_change.run(false);
                    }
                }
            >
                "Hidden"
            </button>
        </div>
    }
}
