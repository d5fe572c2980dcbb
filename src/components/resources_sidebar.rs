use crate::api::{helpful_links_key, ServerResponseMany};
use crate::components::helpful_link_card::{open_helpful_link, HelpfulLinkCard};
use crate::components::hooks::use_fetch;
use crate::components::sort_by_pills::SortByPills;
use crate::components::static_content_card::StaticContentCard;
use crate::components::ui::{ErrorAlert, Spinner};
use crate::models::{HelpfulLink, OpenContentProvider};
use crate::state::{AppContext, SortOrderContext, ToastContext};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Right-hand column: enabled providers and the helpful links list.
#[component]
pub fn ResourcesSideBar() -> impl IntoView {
    let api = expect_context::<AppContext>().0.api_client;
    let toast = expect_context::<ToastContext>();
    let sort = expect_context::<SortOrderContext>();

    let providers: RwSignal<Vec<OpenContentProvider>> = RwSignal::new(vec![]);
    let api_client = api.get_untracked();
    spawn_local(async move {
        match api_client.list_providers().await {
            Ok(list) => providers.set(list.into_iter().filter(|p| p.currently_enabled).collect()),
            Err(e) => tracing::warn!(error = %e, "failed to load providers"),
        }
    });

    let links = use_fetch(
        move || Some(helpful_links_key(&sort.sort_order.get())),
        || 0,
        ServerResponseMany::<HelpfulLink>::from_value,
    );

    let on_open = move |id: u32| open_helpful_link(api.get_untracked(), toast, id);

    view! {
        <aside class="flex flex-col gap-6 border-l px-4 py-4 min-[1400px]:min-w-[300px]">
            <section class="space-y-4">
                <h2 class="text-lg font-semibold">"Open Content"</h2>
                <For each=move || providers.get() key=|p| p.id let:provider>
                    <StaticContentCard provider=provider />
                </For>
            </section>

            <section class="space-y-4">
                <h2 class="text-lg font-semibold">"Resources"</h2>
                <SortByPills />
                <Show when=move || links.loading.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
                {move || links.error.get().map(|e| view! { <ErrorAlert message=e.user_message() /> })}
                <div class="flex flex-col gap-4">
                    <For
                        each=move || links.data.get().map(|r| r.data).unwrap_or_default()
                        key=|l| l.id
                        let:link
                    >
                        <HelpfulLinkCard link=link on_open=on_open />
                    </For>
                </div>
            </section>
        </aside>
    }
}
