use crate::components::ui::Input;
use leptos::prelude::*;

/// Search box. Emits the term on every input change.
#[component]
pub fn SearchBar(
    #[prop(into)] on_search: Callback<String>,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    let term = RwSignal::new(String::new());

    Effect::new(move |prev: Option<String>| {
        let current = term.get();
        if prev.as_ref().is_some_and(|p| *p != current) {
            on_search.run(current.clone());
        }
        current
    });

    view! {
        <div class="relative w-full max-w-xs">
            <svg
                xmlns="http://www.w3.org/2000/svg"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
                class="pointer-events-none absolute left-2.5 top-2.5 size-4 text-muted-foreground"
                aria-hidden="true"
            >
                <circle cx="11" cy="11" r="8" />
                <path d="m21 21-4.3-4.3" />
            </svg>
            <Input
                r#type="search"
                class="pl-8"
                placeholder=placeholder.unwrap_or_else(|| "Search...".to_string())
                bind_value=term
            />
        </div>
    }
}
