use leptos::prelude::*;
use tw_merge::tw_merge;

/// Star button; filled when favorited. Clicks never reach the parent card.
#[component]
pub fn FavoriteStar(
    #[prop(into)] favorited: Signal<bool>,
    #[prop(into)] on_toggle: Callback<()>,
    #[prop(into, optional)] disabled: Signal<bool>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let class = StoredValue::new(class);
    let svg_class = move || {
        let tone = if favorited.get() {
            "fill-yellow-400 text-yellow-400"
        } else {
            "fill-none text-muted-foreground"
        };
        tw_merge!("size-5", tone, class.get_value())
    };

    view! {
        <button
            type="button"
            class="cursor-pointer disabled:cursor-wait disabled:opacity-60"
            aria-label=move || if favorited.get() { "Remove from favorites" } else { "Add to favorites" }
            aria-pressed=move || favorited.get().to_string()
            disabled=move || disabled.get()
            on:click=move |ev: web_sys::MouseEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                on_toggle.run(());
            }
        >
            <svg
                xmlns="http://www.w3.org/2000/svg"
                viewBox="0 0 24 24"
                stroke="currentColor"
                stroke-width="1.5"
                stroke-linejoin="round"
                class=svg_class
                aria-hidden="true"
            >
                <path d="M11.48 3.5a.56.56 0 0 1 1.04 0l2.13 5.11a.56.56 0 0 0 .48.35l5.52.44c.5.04.7.66.32.99l-4.2 3.6a.56.56 0 0 0-.19.56l1.29 5.39a.56.56 0 0 1-.84.61l-4.73-2.89a.56.56 0 0 0-.59 0l-4.73 2.89a.56.56 0 0 1-.84-.61l1.29-5.39a.56.56 0 0 0-.19-.56l-4.2-3.6a.56.56 0 0 1 .32-.99l5.52-.44a.56.56 0 0 0 .48-.35z" />
            </svg>
        </button>
    }
}
