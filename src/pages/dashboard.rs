use crate::api::ApiResult;
use crate::components::helpful_link_card::{open_helpful_link, HelpfulLinkCard};
use crate::components::open_content_card::OpenContentCard;
use crate::components::ui::{Card, CardContent, CardTitle, Loading};
use crate::models::{CombinedFavorite, HelpfulLink, OpenContentItem};
use crate::state::{AppContext, SortOrderContext, ToastContext};
use crate::util::{dedup_last_wins, open_content_base};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Below this many personal items the dashboard offers a way into the catalog.
const EXPLORE_THRESHOLD: usize = 5;

pub(crate) fn greeting(name_first: Option<&str>) -> String {
    match name_first.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hi, {name}!"),
        None => "Hi, Student!".to_string(),
    }
}

pub(crate) fn should_offer_explore(top_user_content: &[OpenContentItem]) -> bool {
    top_user_content.len() < EXPLORE_THRESHOLD
}

/// A failed section renders empty; the rest of the dashboard still loads.
fn or_empty<T>(section: &str, result: ApiResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(section, error = %e, "dashboard section failed to load");
        vec![]
    })
}

#[derive(Clone, Debug, Default)]
struct DashboardData {
    top_user_content: Vec<OpenContentItem>,
    top_facility_content: Vec<OpenContentItem>,
    favorites: Vec<CombinedFavorite>,
}

impl DashboardData {
    /// Each section keeps one row per `(content_id, type)`, last occurrence wins.
    fn new(
        top_user_content: Vec<OpenContentItem>,
        top_facility_content: Vec<OpenContentItem>,
        favorites: Vec<CombinedFavorite>,
    ) -> Self {
        Self {
            top_user_content: dedup_last_wins(top_user_content, |i| (i.content_id, i.content_type)),
            top_facility_content: dedup_last_wins(top_facility_content, |i| (i.content_id, i.content_type)),
            favorites: dedup_last_wins(favorites, |f| (f.content_id, f.content_type)),
        }
    }
}

/// Landing page: recent and popular content, resources and favorites.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    let current_user = app_state.0.current_user;
    let toast = expect_context::<ToastContext>();
    let sort = expect_context::<SortOrderContext>();
    let navigate = StoredValue::new(use_navigate());

    let data: RwSignal<Option<DashboardData>> = RwSignal::new(None);
    let links: RwSignal<Vec<HelpfulLink>> = RwSignal::new(vec![]);

    if let Some(user_id) = current_user.with_untracked(|u| u.as_ref().map(|u| u.id)) {
        let api_client = api.get_untracked();
        spawn_local(async move {
            let user_content = or_empty("top user content", api_client.top_user_content(user_id).await);
            let facility_content = or_empty("top facility content", api_client.top_facility_content().await);
            let favorites = or_empty("favorites", api_client.list_favorites().await);
            data.set(Some(DashboardData::new(user_content, facility_content, favorites)));
        });
    }

    Effect::new(move |_| {
        let order = sort.sort_order.get();
        let api_client = api.get_untracked();
        spawn_local(async move {
            match api_client.list_helpful_links(&order).await {
                Ok(list) => links.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load helpful links"),
            }
        });
    });

    let explore = move |_: web_sys::MouseEvent| {
        let role = current_user.with_untracked(|u| u.as_ref().map(|u| u.role));
        let path = format!("{}/libraries", open_content_base(role));
        navigate.with_value(|nav| nav(&path, Default::default()));
    };
    let on_open = move |id: u32| open_helpful_link(api.get_untracked(), toast, id);

    let heading = move || greeting(current_user.with(|u| u.as_ref().map(|u| u.name_first.clone())).as_deref());

    view! {
        <div class="flex h-full flex-row">
            <div class="flex w-full flex-col gap-6 px-6 pb-4">
                <h1 class="text-5xl">{heading}</h1>
                <h2 class="text-lg">"Pick Up Where You Left Off"</h2>
                <Show when=move || data.with(|d| d.is_some()) fallback=|| view! { <Loading /> }>
                    <div class="grid grid-cols-2 gap-6">
                        <Card>
                            <CardContent class="flex flex-col gap-3">
                                <CardTitle>"Your Top Open Content"</CardTitle>
                                <For
                                    each=move || data.with(|d| d.as_ref().map(|d| d.top_user_content.clone()).unwrap_or_default())
                                    key=|item| (item.content_id, item.content_type)
                                    let:item
                                >
                                    <OpenContentCard content=item />
                                </For>
                                <Show
                                    when=move || data.with(|d| d.as_ref().is_some_and(|d| should_offer_explore(&d.top_user_content)))
                                    fallback=|| ().into_view()
                                >
                                    <button
                                        type="button"
                                        class="flex flex-row items-center gap-2 rounded-md border px-4 py-2 text-left text-sm hover:bg-accent"
                                        on:click=explore
                                    >
                                        "Explore open content offered"
                                    </button>
                                </Show>
                            </CardContent>
                        </Card>
                        <Card>
                            <CardContent class="flex flex-col gap-3">
                                <CardTitle>"Popular Open Content"</CardTitle>
                                <For
                                    each=move || data.with(|d| d.as_ref().map(|d| d.top_facility_content.clone()).unwrap_or_default())
                                    key=|item| (item.content_id, item.content_type)
                                    let:item
                                >
                                    <OpenContentCard content=item />
                                </For>
                            </CardContent>
                        </Card>
                    </div>
                </Show>
                <h2 class="text-lg">"Resources"</h2>
                <div class="flex flex-row gap-4 overflow-x-auto">
                    <For each=move || links.get() key=|l| l.id let:link>
                        <HelpfulLinkCard link=link on_open=on_open />
                    </For>
                </div>
            </div>
            <aside class="flex min-w-[300px] flex-col gap-6 border-l px-6 py-4">
                <h2 class="text-lg">"Favorites"</h2>
                <div class="w-full space-y-3">
                    {move || {
                        let favorites = data.with(|d| d.as_ref().map(|d| d.favorites.clone()).unwrap_or_default());
                        if favorites.is_empty() {
                            view! { <div class="text-sm text-muted-foreground">"No Favorites"</div> }.into_any()
                        } else {
                            favorites
                                .into_iter()
                                .map(|f| view! { <OpenContentCard content=f.as_content_item() /> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>
            </aside>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentType;

    fn item(id: u32) -> OpenContentItem {
        OpenContentItem {
            content_id: id,
            name: format!("item {id}"),
            thumbnail_url: None,
            content_type: ContentType::Library,
            url: String::new(),
            channel_title: None,
            provider_name: None,
            is_disabled: false,
        }
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(Some("Ada")), "Hi, Ada!");
        assert_eq!(greeting(Some("  ")), "Hi, Student!");
        assert_eq!(greeting(None), "Hi, Student!");
    }

    #[test]
    fn test_explore_offered_below_five_items() {
        let four: Vec<_> = (1..=4).map(item).collect();
        let five: Vec<_> = (1..=5).map(item).collect();
        assert!(should_offer_explore(&four));
        assert!(!should_offer_explore(&five));
        assert!(should_offer_explore(&[]));
    }

    #[test]
    fn test_top_content_sections_dedup_last_wins() {
        let renamed = OpenContentItem {
            name: "item 1 (renamed)".into(),
            ..item(1)
        };
        let video = OpenContentItem {
            content_type: ContentType::Video,
            ..item(1)
        };
        let data = DashboardData::new(
            vec![item(1), item(2), renamed.clone()],
            vec![item(3), video.clone(), item(3)],
            vec![],
        );
        assert_eq!(data.top_user_content, vec![item(2), renamed]);
        assert_eq!(data.top_facility_content, vec![video, item(3)]);
    }
}
