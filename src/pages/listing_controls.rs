use crate::components::search_bar::SearchBar;
use crate::components::ui::{NativeSelect, SelectChoice};
use crate::models::{OpenContentCategory, VisibilityFilter};
use crate::state::listing::ListingQuery;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

/// `"All Libraries"` (id 0) followed by the backend's categories.
pub(crate) fn category_choices(categories: &[OpenContentCategory]) -> Vec<SelectChoice> {
    std::iter::once(SelectChoice::new("All Libraries", "0"))
        .chain(
            categories
                .iter()
                .map(|c| SelectChoice::new(c.name.clone(), c.id.to_string())),
        )
        .collect()
}

fn visibility_choices() -> Vec<SelectChoice> {
    VisibilityFilter::iter()
        .map(|v| SelectChoice::new(v.label(), v.as_ref()))
        .collect()
}

/// Search box plus the category (libraries only) and admin-only visibility
/// dropdowns bound to one [`ListingQuery`].
#[component]
pub fn ListingControls(
    query: RwSignal<ListingQuery>,
    #[prop(into)] show_visibility: Signal<bool>,
    show_categories: bool,
    #[prop(into, optional)] placeholder: Option<String>,
) -> impl IntoView {
    let api = expect_context::<AppContext>().0.api_client;

    let categories: RwSignal<Vec<OpenContentCategory>> = RwSignal::new(vec![]);
    if show_categories {
        let api_client = api.get_untracked();
        spawn_local(async move {
            match api_client.list_categories().await {
                Ok(list) => categories.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load categories"),
            }
        });
    }

    let category_value = Signal::derive(move || {
        query.with(|q| q.categories.first().copied().unwrap_or(0).to_string())
    });
    let visibility_value = Signal::derive(move || query.with(|q| q.visibility.as_ref().to_string()));

    let on_search = move |term: String| query.update(|q| q.set_search(term));
    let on_category = move |value: String| {
        let id = value.parse::<u32>().unwrap_or(0);
        query.update(|q| q.set_categories(vec![id]));
    };
    let on_visibility = move |value: String| match value.parse::<VisibilityFilter>() {
        Ok(v) => query.update(|q| q.set_visibility(v)),
        Err(_) => tracing::debug!(value = %value, "unknown visibility filter"),
    };

    view! {
        <div class="flex flex-row flex-wrap gap-4">
            <SearchBar on_search=on_search placeholder=placeholder.unwrap_or_else(|| "Search...".to_string()) />
            <Show when=move || show_visibility.get() fallback=|| ().into_view()>
                <NativeSelect
                    choices=Signal::derive(visibility_choices)
                    value=visibility_value
                    on_change=on_visibility
                    aria_label="Visibility"
                />
            </Show>
            <Show when=move || show_categories fallback=|| ().into_view()>
                <NativeSelect
                    choices=Signal::derive(move || categories.with(|c| category_choices(c)))
                    value=category_value
                    on_change=on_category
                    aria_label="Category"
                />
            </Show>
        </div>
    }
}
