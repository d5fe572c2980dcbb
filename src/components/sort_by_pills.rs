use crate::state::{AppContext, SortOrderContext, ToastContext, ToastState};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Helpful-link orderings: pill label and backend `order_by` value.
pub(crate) static SORT_OPTIONS: [(&str, &str); 4] = [
    ("Newest", "created_at DESC"),
    ("Oldest", "created_at ASC"),
    ("Most Popular", "total_clicks DESC"),
    ("Title (A-Z)", "title ASC"),
];

/// Pill row that sets and persists the shared helpful-links sort order.
#[component]
pub fn SortByPills() -> impl IntoView {
    let sort = expect_context::<SortOrderContext>();
    let api = expect_context::<AppContext>().0.api_client;
    let toast = expect_context::<ToastContext>();

    let update_sort = move |value: &'static str| {
        if sort.sort_order.get_untracked() == value {
            return;
        }
        sort.sort_order.set(value.to_string());
        let api_client = api.get_untracked();
        spawn_local(async move {
            if let Err(e) = api_client.set_helpful_links_sort(value).await {
                tracing::warn!(sort_order = value, error = %e, "failed to persist sort order");
                toast.toaster(e.user_message(), ToastState::Error);
            }
        });
    };

    view! {
        <div class="flex flex-wrap gap-2">
            {SORT_OPTIONS
                .iter()
                .map(|&(label, value)| {
                    let selected = move || sort.sort_order.get() == value;
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if selected() {
                                    "rounded-2xl border-2 border-foreground bg-teal-100 px-3 py-1 text-sm shadow-md"
                                } else {
                                    "rounded-2xl border-2 border-transparent bg-muted px-3 py-1 text-sm"
                                }
                            }
                            aria-pressed=move || selected().to_string()
                            on:click=move |_| update_sort(value)
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
