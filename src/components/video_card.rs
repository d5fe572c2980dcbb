use crate::api::{FAVORITES_KEY, VIDEOS_KEY};
use crate::components::favorite_star::FavoriteStar;
use crate::components::hooks::use_favorite;
use crate::components::ui::{Card, CardContent, CardDescription, CardTitle};
use crate::models::{UserRole, Video};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn VideoCard(video: Video, role: UserRole) -> impl IntoView {
    let api = expect_context::<AppContext>().0.api_client;
    let navigate = StoredValue::new(use_navigate());

    let id = video.id;
    let favorite = use_favorite(video.is_favorited, "Video", &[FAVORITES_KEY, VIDEOS_KEY]);

    let on_favorite = move |_: ()| {
        let api_client = api.get_untracked();
        favorite.toggle(move |_| async move { api_client.toggle_video_favorite(id).await });
    };

    let status = role.is_admin().then(|| {
        let (label, tone) = if video.visibility_status {
            ("Visible", "text-green-700")
        } else {
            ("Hidden", "text-muted-foreground")
        };
        view! { <span class=format!("text-xs font-medium {tone}")>{label}</span> }
    });

    view! {
        <Card
            class="cursor-pointer transition-shadow hover:shadow-md"
            on:click=move |_| {
                navigate.with_value(|nav| nav(&format!("/viewer/videos/{id}"), Default::default()));
            }
        >
            <img class="aspect-video w-full object-cover" src=video.thumbnail_url.clone() alt=video.title.clone() />
            <CardContent>
                <div class="flex items-start gap-2">
                    <CardTitle>{video.title.clone()}</CardTitle>
                    <FavoriteStar
                        favorited=Signal::derive(move || favorite.favorited())
                        disabled=Signal::derive(move || favorite.pending())
                        on_toggle=on_favorite
                    />
                </div>
                <p class="text-xs font-medium">{video.channel_title.clone()}</p>
                <CardDescription>{video.description.unwrap_or_default()}</CardDescription>
                {status}
            </CardContent>
        </Card>
    }
}
