use crate::api::{ApiResult, SaveOpenContent, ServerResponseMany, FAVORITES_KEY, LIBRARIES_KEY, VIDEOS_KEY};
use crate::components::favorite_card::FavoriteCard;
use crate::components::hooks::{favorite_toast_text, use_fetch};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert, Loading};
use crate::models::{CombinedFavorite, ContentType};
use crate::state::{AppContext, ToastContext, ToastState};
use crate::util::dedup_last_wins;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Favorites response with one entry per `(content_id, type)`.
pub(crate) fn decode_favorites(v: serde_json::Value) -> ApiResult<Vec<CombinedFavorite>> {
    let resp = ServerResponseMany::<CombinedFavorite>::from_value(v)?;
    Ok(dedup_last_wins(resp.data, |f| (f.content_id, f.content_type)))
}

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    let cache = app_state.0.cache;
    let toast = expect_context::<ToastContext>();

    let favorites = use_fetch(|| Some(FAVORITES_KEY.to_string()), || 0, decode_favorites);
    let in_flight: RwSignal<Option<(u32, ContentType)>> = RwSignal::new(None);

    let unfavorite = move |content_id: u32, content_type: ContentType| {
        if in_flight.get_untracked().is_some() {
            return;
        }
        in_flight.set(Some((content_id, content_type)));
        let api_client = api.get_untracked();

        spawn_local(async move {
            let (result, listing) = match content_type {
                ContentType::Library => (
                    api_client
                        .save_open_content(content_id, &SaveOpenContent::Remove)
                        .await,
                    LIBRARIES_KEY,
                ),
                ContentType::Video => (api_client.toggle_video_favorite(content_id).await, VIDEOS_KEY),
            };
            in_flight.set(None);

            match result {
                Ok(_) => {
                    favorites.mutate(|list| {
                        list.retain(|f| !(f.content_id == content_id && f.content_type == content_type))
                    });
                    cache.invalidate(listing);
                    let noun = match content_type {
                        ContentType::Library => "Library",
                        ContentType::Video => "Video",
                    };
                    toast.toaster(favorite_toast_text(noun, false), ToastState::Success);
                }
                Err(e) => {
                    tracing::warn!(content_id, %content_type, error = %e, "unfavorite failed");
                    toast.toaster(e.user_message(), ToastState::Error);
                }
            }
        });
    };

    view! {
        <div class="flex flex-col gap-4">
            {move || favorites.error.get().map(|e| view! {
                <div class="flex flex-col items-start gap-2">
                    <ErrorAlert message=e.user_message() />
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| favorites.revalidate()>
                        "Retry"
                    </Button>
                </div>
            })}
            <Show when=move || favorites.loading.get() && favorites.data.with(|d| d.is_none()) fallback=|| ().into_view()>
                <Loading />
            </Show>
            <Show
                when=move || favorites.data.with(|d| d.as_ref().is_some_and(|l| l.is_empty()))
                fallback=|| ().into_view()
            >
                <p class="text-sm text-muted-foreground">"No favorites yet."</p>
            </Show>
            <div class="flex flex-row flex-wrap gap-6">
                <For
                    each=move || favorites.data.get().unwrap_or_default()
                    key=|f| (f.content_id, f.content_type)
                    let:favorite
                >
                    {
                        let item = (favorite.content_id, favorite.content_type);
                        view! {
                            <FavoriteCard
                                favorite=favorite
                                busy=Signal::derive(move || in_flight.get() == Some(item))
                                on_unfavorite=move |_| unfavorite(item.0, item.1)
                            />
                        }
                    }
                </For>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_favorites_dedups_by_content_and_type() {
        let v = serde_json::json!({
            "data": [
                {"id": 1, "content_id": 10, "name": "Old", "type": "library"},
                {"id": 2, "content_id": 10, "name": "Khan", "type": "video"},
                {"id": 3, "content_id": 10, "name": "New", "type": "library"}
            ],
            "meta": {"total": 3, "per_page": 20, "page": 1, "current_page": 1, "last_page": 1}
        });
        let favs = decode_favorites(v).expect("decode");
        assert_eq!(favs.len(), 2);
        assert_eq!(favs[0].name, "Khan");
        assert_eq!(favs[1].name, "New");
    }
}
