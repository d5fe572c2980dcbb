use crate::api::{ApiError, FAVORITES_KEY, VIDEOS_KEY};
use crate::components::favorite_star::FavoriteStar;
use crate::components::hooks::{use_favorite, use_live_favorite};
use crate::components::live_status::LiveStatus;
use crate::components::ui::{ErrorAlert, Loading};
use crate::models::Video;
use crate::state::{AppContext, PathValue, PathValueContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

#[component]
pub fn VideoViewer() -> impl IntoView {
    let api = expect_context::<AppContext>().0.api_client;
    let path_values = expect_context::<PathValueContext>();
    let params = use_params_map();

    let video_id = Memo::new(move |_| params.with(|p| p.get("id").and_then(|s| s.parse::<u32>().ok())));
    let video: RwSignal<Option<Video>> = RwSignal::new(None);
    let error: RwSignal<Option<ApiError>> = RwSignal::new(None);
    let loading = RwSignal::new(true);

    let favorite = use_favorite(false, "Video", &[FAVORITES_KEY, VIDEOS_KEY]);

    let load = move |id: u32| {
        let api_client = api.get_untracked();
        spawn_local(async move {
            let result = api_client.get_video(id).await;
            if video_id.get_untracked() != Some(id) {
                return;
            }
            match result {
                Ok(v) => {
                    path_values.set_path_val(vec![PathValue::new(":video_name", v.title.clone())]);
                    favorite.reconcile(v.is_favorited);
                    video.set(Some(v));
                }
                Err(e) => {
                    tracing::warn!(video_id = id, error = %e, "failed to load video");
                    error.set(Some(e));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| match video_id.get() {
        Some(id) => {
            loading.set(true);
            error.set(None);
            load(id);
        }
        None => {
            error.set(Some(ApiError::NotFound));
            loading.set(false);
        }
    });

    let live = use_live_favorite(favorite, move || {
        if let Some(id) = video_id.get_untracked() {
            load(id);
        }
    });

    let on_star = move |_: ()| {
        let Some(id) = video_id.get_untracked() else {
            return;
        };
        let api_client = api.get_untracked();
        favorite.toggle(move |_| async move { api_client.toggle_video_favorite(id).await });
    };

    view! {
        <div class="flex flex-col gap-4 px-8 pb-4">
            <div class="flex items-center gap-4">
                <h1 class="text-2xl font-semibold">
                    {move || video.with(|v| v.as_ref().map(|v| v.title.clone()).unwrap_or_else(|| "Video".to_string()))}
                </h1>
                <FavoriteStar
                    class="size-6"
                    favorited=Signal::derive(move || favorite.favorited())
                    disabled=Signal::derive(move || favorite.pending() || video.with(|v| v.is_none()))
                    on_toggle=on_star
                />
                <LiveStatus live=live />
            </div>
            {move || {
                if loading.get() && video.with(|v| v.is_none()) {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(e) = error.get() {
                    return view! { <ErrorAlert message=e.user_message() /> }.into_any();
                }
                video
                    .get()
                    .map(|v| {
                        let player = match v.url.clone() {
                            Some(src) => view! {
                                <video class="aspect-video w-full max-w-4xl rounded-md bg-black" controls=true poster=v.thumbnail_url.clone() src=src />
                            }
                                .into_any(),
                            None => view! {
                                <img class="aspect-video w-full max-w-4xl rounded-md object-cover" src=v.thumbnail_url.clone() alt=v.title.clone() />
                            }
                                .into_any(),
                        };
                        view! {
                            <div class="flex flex-col gap-2">
                                {player}
                                <p class="text-sm font-medium">{v.channel_title.clone()}</p>
                                <p class="text-sm text-muted-foreground">{v.description.clone().unwrap_or_default()}</p>
                            </div>
                        }
                    })
                    .into_any()
            }}
        </div>
    }
}
