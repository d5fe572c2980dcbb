use crate::api::{SaveOpenContent, FAVORITES_KEY, LIBRARIES_KEY};
use crate::components::favorite_star::FavoriteStar;
use crate::components::hooks::use_favorite;
use crate::components::ui::{Card, CardContent, CardDescription, CardHeader, CardTitle};
use crate::components::visible_hidden_toggle::VisibleHiddenToggle;
use crate::models::{Library, UserRole};
use crate::state::{AppContext, ToastContext, ToastState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[component]
pub fn LibraryCard(library: Library, role: UserRole) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = app_state.0.api_client;
    let cache = app_state.0.cache;
    let toast = expect_context::<ToastContext>();
    let navigate = StoredValue::new(use_navigate());

    let id = library.id;
    let favorite = use_favorite(
        library.is_favorited.unwrap_or(false),
        "Library",
        &[FAVORITES_KEY, LIBRARIES_KEY],
    );
    let visible = RwSignal::new(library.visibility_status);

    let name = StoredValue::new(library.name.clone());
    let provider_id = library.open_content_provider_id;

    let on_favorite = move |_: ()| {
        let api_client = api.get_untracked();
        favorite.toggle(move |target| async move {
            let op = if target {
                SaveOpenContent::upsert_library(id, &name.get_value(), provider_id)
            } else {
                SaveOpenContent::Remove
            };
            api_client.save_open_content(id, &op).await
        });
    };

    let on_visibility = move |next: bool| {
        visible.set(next);
        let api_client = api.get_untracked();
        spawn_local(async move {
            match api_client.toggle_library_visibility(id).await {
                Ok(message) => {
                    tracing::info!(library_id = id, visible = next, "library visibility changed");
                    toast.toaster(message, ToastState::Success);
                    cache.invalidate(LIBRARIES_KEY);
                }
                Err(e) => {
                    tracing::warn!(library_id = id, error = %e, "library visibility change failed");
                    visible.set(!next);
                    toast.toaster(e.user_message(), ToastState::Error);
                }
            }
        });
    };

    let thumbnail_alt = format!("{} thumbnail", library.name);
    let provider = library.provider_display_name();

    view! {
        <Card
            class="cursor-pointer transition-shadow hover:shadow-md"
            on:click=move |_| {
                navigate.with_value(|nav| nav(&format!("/viewer/libraries/{id}"), Default::default()));
            }
        >
            <CardHeader>
                <figure class="size-12 shrink-0 overflow-hidden rounded">
                    <img class="size-full object-cover" src=library.image_url.unwrap_or_default() alt=thumbnail_alt />
                </figure>
                <CardTitle>{library.name.clone()}</CardTitle>
                <FavoriteStar
                    favorited=Signal::derive(move || favorite.favorited())
                    disabled=Signal::derive(move || favorite.pending())
                    on_toggle=on_favorite
                />
            </CardHeader>
            <CardContent>
                <p class="text-xs font-medium">{provider}</p>
                <CardDescription class="h-10">{library.description.unwrap_or_default()}</CardDescription>
                {role.is_admin().then(|| view! {
                    <VisibleHiddenToggle visible=visible on_change=on_visibility />
                })}
            </CardContent>
        </Card>
    }
}
